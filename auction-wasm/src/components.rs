use auction_client::{CardAction, CardImage, ListingCard, Notice};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AuctionCardProps {
    pub card: Rc<ListingCard>,
    pub on_action: Callback<CardAction>,
}

#[function_component(AuctionCard)]
pub fn auction_card(props: &AuctionCardProps) -> Html {
    let card = &props.card;

    let image = match &card.image {
        CardImage::Url { src, alt } => html! { <img src={src.clone()} alt={alt.clone()} /> },
        CardImage::Placeholder => html! { { "🏷️" } },
    };

    let actions = card.actions.iter().map(|action| {
        let action = *action;
        let class = match action {
            CardAction::ViewDetails(_) => "btn btn-primary",
            CardAction::PlaceBid(_) => "btn btn-outline",
        };
        let onclick = props.on_action.reform(move |_: MouseEvent| action);
        html! {
            <button class={class} {onclick}>{ action.label() }</button>
        }
    });

    html! {
        <div class="auction-card">
            <div class="auction-image">{ image }</div>
            <div class="auction-content">
                <h3 class="auction-title">{ &card.title }</h3>
                <p class="auction-description">{ &card.description }</p>
                <div class="auction-meta">
                    <div class="auction-price">{ &card.price }</div>
                    <span class={classes!("status-badge", card.badge.class.clone())}>
                        { &card.badge.label }
                    </span>
                </div>
                <div class="auction-time">{ format!("Ends: {}", card.ends) }</div>
                <div class="auction-actions">
                    { for actions }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeListProps {
    pub notices: Vec<(usize, Notice)>,
    pub on_dismiss: Callback<usize>,
}

/// Toast stack; notices stay until dismissed and never block input.
#[function_component(NoticeList)]
pub fn notice_list(props: &NoticeListProps) -> Html {
    html! {
        <div class="notifications">
            { for props.notices.iter().map(|(id, notice)| {
                let id = *id;
                let dismiss = props.on_dismiss.reform(move |_: MouseEvent| id);
                html! {
                    <div key={id} class={classes!("notification", format!("notification-{}", notice.level.as_str()))}>
                        <span>{ &notice.message }</span>
                        <button class="notification-close" onclick={dismiss}>{ "×" }</button>
                    </div>
                }
            }) }
        </div>
    }
}
