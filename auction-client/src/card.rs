//! Render-ready projection of a listing.
//!
//! Front ends (the Yew grid, the CLI printer) build markup from
//! [`ListingCard`] only and never look at a raw [`Listing`].

use crate::models::Listing;
use crate::session::Session;
use chrono::{DateTime, Utc};
use std::rc::Rc;

pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardImage {
    Url { src: String, alt: String },
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    ViewDetails(i64),
    PlaceBid(i64),
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::ViewDetails(_) => "View Details",
            CardAction::PlaceBid(_) => "Place Bid",
        }
    }

    pub fn listing_id(&self) -> i64 {
        match self {
            CardAction::ViewDetails(id) | CardAction::PlaceBid(id) => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: String,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCard {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: String,
    pub badge: StatusBadge,
    pub ends: String,
    pub image: CardImage,
    pub seller: Option<String>,
    pub bid_count: u32,
    pub actions: Vec<CardAction>,
}

impl ListingCard {
    pub fn project(listing: &Listing, session: Option<&Session>) -> Self {
        let status = listing.status.as_str();

        let image = match &listing.image_url {
            Some(src) if !src.is_empty() => CardImage::Url {
                src: src.clone(),
                alt: listing.title.clone(),
            },
            _ => CardImage::Placeholder,
        };

        let mut actions = vec![CardAction::ViewDetails(listing.id)];
        if session.is_some() && listing.status.is_active() {
            actions.push(CardAction::PlaceBid(listing.id));
        }

        Self {
            id: listing.id,
            title: listing.title.clone(),
            description: listing
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            price: format_price(listing.current_price),
            badge: StatusBadge {
                label: capitalize_first(status),
                class: format!("status-{}", status.to_lowercase()),
            },
            ends: format_end_date(&listing.end_time),
            image,
            seller: listing.seller_username.clone(),
            bid_count: listing.bid_count,
            actions,
        }
    }

    pub fn can_bid(&self) -> bool {
        self.actions
            .iter()
            .any(|a| matches!(a, CardAction::PlaceBid(_)))
    }
}

pub fn render(listings: &[Listing], session: Option<&Session>) -> Vec<ListingCard> {
    listings
        .iter()
        .map(|listing| ListingCard::project(listing, session))
        .collect()
}

// Карточки проецируются один раз, при загрузке страницы.
// Пересборка всех карточек только при входе/выходе: проекция зависит лишь от листинга и наличия сессии.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardList {
    cards: Vec<Rc<ListingCard>>,
    signed_in: bool,
}

impl CardList {
    pub fn new(session: Option<&Session>) -> Self {
        Self {
            cards: Vec::new(),
            signed_in: session.is_some(),
        }
    }

    pub fn cards(&self) -> &[Rc<ListingCard>] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn extend(&mut self, fresh: &[Listing], session: Option<&Session>) -> &[Rc<ListingCard>] {
        let start = self.cards.len();
        self.cards.extend(
            fresh
                .iter()
                .map(|listing| Rc::new(ListingCard::project(listing, session))),
        );
        &self.cards[start..]
    }

    // true, если карточки были пересобраны
    pub fn sync_session(&mut self, listings: &[Listing], session: Option<&Session>) -> bool {
        if self.signed_in == session.is_some() {
            return false;
        }

        self.signed_in = session.is_some();
        self.cards = listings
            .iter()
            .map(|listing| Rc::new(ListingCard::project(listing, session)))
            .collect();
        true
    }
}

pub fn format_price(amount: f64) -> String {
    let amount = if amount == 0.0 { 0.0 } else { amount };
    format!("${:.2}", amount)
}

pub fn format_end_date(end_time: &DateTime<Utc>) -> String {
    end_time.format("%b %-d, %Y").to_string()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::tests::listing;
    use crate::models::ListingStatus;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session {
            username: "alice".into(),
        }
    }

    #[test]
    fn active_listing_with_session_offers_bid() {
        let card = ListingCard::project(&listing(1, ListingStatus::Active), Some(&session()));
        assert!(card.can_bid());
        assert_eq!(
            card.actions,
            vec![CardAction::ViewDetails(1), CardAction::PlaceBid(1)]
        );
        assert_eq!(card.actions[1].label(), "Place Bid");
    }

    #[test]
    fn no_bid_without_session() {
        let card = ListingCard::project(&listing(1, ListingStatus::Active), None);
        assert!(!card.can_bid());
        assert_eq!(card.actions, vec![CardAction::ViewDetails(1)]);
    }

    #[test]
    fn no_bid_on_inactive_listing() {
        for status in [
            ListingStatus::Draft,
            ListingStatus::Ended,
            ListingStatus::Cancelled,
            ListingStatus::Other("Active".into()),
        ] {
            let card = ListingCard::project(&listing(2, status), Some(&session()));
            assert!(!card.can_bid());
        }
    }

    #[test]
    fn missing_description_uses_placeholder() {
        let card = ListingCard::project(&listing(1, ListingStatus::Active), None);
        assert_eq!(card.description, NO_DESCRIPTION);

        let mut described = listing(1, ListingStatus::Active);
        described.description = Some("Mint condition".into());
        let card = ListingCard::project(&described, None);
        assert_eq!(card.description, "Mint condition");
    }

    #[test]
    fn formats_price_badge_and_date() {
        let mut lot = listing(4, ListingStatus::Cancelled);
        lot.current_price = 1234.5;
        let card = ListingCard::project(&lot, None);

        assert_eq!(card.price, "$1234.50");
        assert_eq!(card.badge.label, "Cancelled");
        assert_eq!(card.badge.class, "status-cancelled");
        assert_eq!(card.ends, "Mar 5, 2025");
        assert_eq!(card.image, CardImage::Placeholder);
    }

    #[test]
    fn zero_price_never_shows_a_sign() {
        assert_eq!(format_price(-0.0), "$0.00");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(7.005), "$7.00");
    }

    #[test]
    fn unknown_status_badge_keeps_rest_of_word() {
        let card = ListingCard::project(&listing(4, ListingStatus::Other("onHold".into())), None);
        assert_eq!(card.badge.label, "OnHold");
        assert_eq!(card.badge.class, "status-onhold");
    }

    #[test]
    fn image_url_becomes_img_with_title_alt() {
        let mut lot = listing(8, ListingStatus::Active);
        lot.image_url = Some("https://img.example.com/8.jpg".into());
        let card = ListingCard::project(&lot, None);
        assert_eq!(
            card.image,
            CardImage::Url {
                src: "https://img.example.com/8.jpg".into(),
                alt: "Lot 8".into(),
            }
        );
    }

    #[test]
    fn render_keeps_input_order() {
        let lots = vec![
            listing(3, ListingStatus::Active),
            listing(1, ListingStatus::Active),
        ];
        let ids: Vec<i64> = render(&lots, None).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn card_list_keeps_existing_cards_on_extend() {
        let mut list = CardList::new(None);
        let first_page = vec![listing(1, ListingStatus::Active), listing(2, ListingStatus::Ended)];
        list.extend(&first_page, None);
        let before: Vec<Rc<ListingCard>> = list.cards().to_vec();

        let fresh = list.extend(&[listing(3, ListingStatus::Active)], None);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].id, 3);

        assert_eq!(list.len(), 3);
        for (old, now) in before.iter().zip(list.cards()) {
            assert!(Rc::ptr_eq(old, now));
        }
    }

    #[test]
    fn card_list_rebuilds_only_when_login_state_changes() {
        let lots = vec![listing(1, ListingStatus::Active)];
        let mut list = CardList::new(None);
        list.extend(&lots, None);
        let before = Rc::clone(&list.cards()[0]);

        assert!(!list.sync_session(&lots, None));
        assert!(Rc::ptr_eq(&before, &list.cards()[0]));

        let alice = session();
        assert!(list.sync_session(&lots, Some(&alice)));
        assert!(list.cards()[0].can_bid());

        // Another user is still "logged in": projections are unchanged.
        let bob = Session {
            username: "bob".into(),
        };
        assert!(!list.sync_session(&lots, Some(&bob)));

        assert!(list.sync_session(&lots, None));
        assert!(!list.cards()[0].can_bid());
    }
}
