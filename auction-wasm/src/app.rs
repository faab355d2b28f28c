use crate::api::ApiClient;
use crate::components::{AuctionCard, NoticeList};
use crate::storage::LocalStorageTokenStore;
use auction_client::models::{LoginForm, PageQuery, RegisterRequest};
use auction_client::notice::{LOGIN_FAILED, REGISTRATION_FAILED};
use auction_client::{
    AuthBackend, CardAction, CardList, FeedController, Listing, Notice, SessionGate, TokenResponse,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub enum Msg {
    // Modals
    ShowModal(Modal),
    HideModals,

    // Auth form updates
    UpdateLoginUsername(String),
    UpdateLoginPassword(String),
    UpdateRegisterUsername(String),
    UpdateRegisterEmail(String),
    UpdateRegisterPassword(String),

    // Auth
    Login,
    LoginSucceeded(String, TokenResponse),
    Register,
    Registered,
    AuthFailed(Notice),
    Logout,

    // Feed
    LoadFirstPage,
    LoadMore,
    PageLoaded(Vec<Listing>),

    // Card actions
    CardAction(CardAction),

    // Notifications
    DismissNotice(usize),
}

#[derive(Clone, Copy, PartialEq)]
pub enum Modal {
    None,
    Login,
    Register,
}

pub struct App {
    // Feed and session state
    feed: FeedController,
    gate: SessionGate<LocalStorageTokenStore>,
    cards: CardList,

    // Forms
    login_username: String,
    login_password: String,
    register_username: String,
    register_email: String,
    register_password: String,

    // UI state
    modal: Modal,
    notices: Vec<(usize, Notice)>,
    next_notice_id: usize,

    // Колбэки создаются один раз, чтобы пропсы карточек оставались равными
    on_card_action: Callback<CardAction>,
    on_dismiss: Callback<usize>,

    // API client
    api: ApiClient,
}

impl App {
    fn notify(&mut self, notice: Notice) {
        self.notices.push((self.next_notice_id, notice));
        self.next_notice_id += 1;
    }

    fn fetch(&self, ctx: &Context<Self>, query: PageQuery) {
        let api = self.api.clone();
        let link = ctx.link().clone();

        spawn_local(async move {
            let page = FeedController::fetch_query(&api, &query).await;
            link.send_message(Msg::PageLoaded(page));
        });
    }

    fn sync_cards(&mut self) {
        self.cards.sync_session(self.feed.listings(), self.gate.session());
    }

    fn clear_forms(&mut self) {
        self.login_username.clear();
        self.login_password.clear();
        self.register_username.clear();
        self.register_email.clear();
        self.register_password.clear();
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        // Токен из localStorage принимается без проверки на сервере
        let mut gate = SessionGate::new(LocalStorageTokenStore);
        gate.restore_session();
        let cards = CardList::new(gate.session());

        ctx.link().send_message(Msg::LoadFirstPage);

        Self {
            feed: FeedController::default(),
            gate,
            cards,
            login_username: String::new(),
            login_password: String::new(),
            register_username: String::new(),
            register_email: String::new(),
            register_password: String::new(),
            modal: Modal::None,
            notices: Vec::new(),
            next_notice_id: 0,
            on_card_action: ctx.link().callback(Msg::CardAction),
            on_dismiss: ctx.link().callback(Msg::DismissNotice),
            api: ApiClient::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ShowModal(modal) => {
                self.modal = modal;
                true
            }
            Msg::HideModals => {
                self.modal = Modal::None;
                true
            }

            Msg::UpdateLoginUsername(val) => {
                self.login_username = val;
                true
            }
            Msg::UpdateLoginPassword(val) => {
                self.login_password = val;
                true
            }
            Msg::UpdateRegisterUsername(val) => {
                self.register_username = val;
                true
            }
            Msg::UpdateRegisterEmail(val) => {
                self.register_email = val;
                true
            }
            Msg::UpdateRegisterPassword(val) => {
                self.register_password = val;
                true
            }

            Msg::Login => {
                if self.login_username.is_empty() || self.login_password.is_empty() {
                    self.notify(Notice::error("Username and password are required"));
                    return true;
                }

                let form = LoginForm {
                    username: self.login_username.clone(),
                    password: self.login_password.clone(),
                };

                let api = self.api.clone();
                let link = ctx.link().clone();

                spawn_local(async move {
                    match api.login(&form).await {
                        Ok(token) => link.send_message(Msg::LoginSucceeded(form.username, token)),
                        Err(e) => {
                            log::debug!("Login failed: {}", e);
                            link.send_message(Msg::AuthFailed(Notice::from_error(&e, LOGIN_FAILED)))
                        }
                    }
                });

                false
            }

            Msg::LoginSucceeded(username, token) => {
                let result = self.gate.complete_login(username, token).map(|_| ());
                match result {
                    Ok(()) => {
                        self.modal = Modal::None;
                        self.clear_forms();
                        self.sync_cards();
                        self.notify(Notice::logged_in());
                    }
                    Err(e) => self.notify(Notice::from_error(&e, LOGIN_FAILED)),
                }
                true
            }

            Msg::Register => {
                if self.register_username.is_empty()
                    || self.register_email.is_empty()
                    || self.register_password.is_empty()
                {
                    self.notify(Notice::error("All fields are required"));
                    return true;
                }

                let req = RegisterRequest {
                    username: self.register_username.clone(),
                    email: self.register_email.clone(),
                    password: self.register_password.clone(),
                };

                let api = self.api.clone();
                let link = ctx.link().clone();

                spawn_local(async move {
                    match api.register(&req).await {
                        Ok(()) => link.send_message(Msg::Registered),
                        Err(e) => {
                            log::debug!("Registration failed: {}", e);
                            link.send_message(Msg::AuthFailed(Notice::from_error(
                                &e,
                                REGISTRATION_FAILED,
                            )))
                        }
                    }
                });

                false
            }

            Msg::Registered => {
                self.clear_forms();
                self.notify(Notice::registered());
                self.modal = Modal::Login;
                true
            }

            Msg::AuthFailed(notice) => {
                self.notify(notice);
                true
            }

            Msg::Logout => {
                match self.gate.logout() {
                    Ok(()) => self.notify(Notice::logged_out()),
                    Err(e) => log::warn!("Failed to clear token: {}", e),
                }
                self.sync_cards();
                true
            }

            Msg::LoadFirstPage => {
                let query = self.feed.first_page_query();
                self.fetch(ctx, query);
                true
            }

            Msg::LoadMore => {
                let query = self.feed.next_page_query();
                self.fetch(ctx, query);
                true
            }

            Msg::PageLoaded(page) => {
                let fresh = self.feed.accept_page(page);
                self.cards.extend(fresh, self.gate.session());
                true
            }

            Msg::CardAction(action) => {
                let notice = match action {
                    CardAction::ViewDetails(id) => Notice::view_coming_soon(id),
                    CardAction::PlaceBid(id) => Notice::bid_coming_soon(id),
                };
                self.notify(notice);
                true
            }

            Msg::DismissNotice(id) => {
                self.notices.retain(|(notice_id, _)| *notice_id != id);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { self.view_header(ctx) }

                <NoticeList
                    notices={self.notices.clone()}
                    on_dismiss={self.on_dismiss.clone()}
                />

                { self.view_auctions(ctx) }

                { self.view_modal(ctx) }
            </div>
        }
    }
}

impl App {
    fn view_header(&self, ctx: &Context<Self>) -> Html {
        let auth_buttons = match self.gate.session() {
            Some(session) => html! {
                <>
                    <span class="user-info">{ format!("Logged in as: {}", session.username) }</span>
                    <button id="loginBtn" class="btn" onclick={ctx.link().callback(|_| Msg::Logout)}>
                        { "Logout" }
                    </button>
                </>
            },
            None => html! {
                <>
                    <button id="loginBtn" class="btn" onclick={ctx.link().callback(|_| Msg::ShowModal(Modal::Login))}>
                        { "Login" }
                    </button>
                    <button id="registerBtn" class="btn" onclick={ctx.link().callback(|_| Msg::ShowModal(Modal::Register))}>
                        { "Register" }
                    </button>
                </>
            },
        };

        html! {
            <header class="header">
                <h1>{ "Auction House" }</h1>
                <nav class="nav-buttons">{ auth_buttons }</nav>
            </header>
        }
    }

    fn view_auctions(&self, ctx: &Context<Self>) -> Html {
        let loading = self.feed.is_loading();

        html! {
            <section class="auctions-section">
                <h2>{ "Live Auctions" }</h2>

                <div id="auctionsGrid" class="auctions-grid">
                    { for self.cards.cards().iter().enumerate().map(|(i, card)| html! {
                        <AuctionCard
                            key={i}
                            card={card.clone()}
                            on_action={self.on_card_action.clone()}
                        />
                    }) }
                </div>

                if self.cards.is_empty() && !loading {
                    <p class="empty">{ "No auctions yet." }</p>
                }

                if loading {
                    <div class="loading">{ "Loading..." }</div>
                }

                <button id="loadMoreBtn" class="btn btn-outline" onclick={ctx.link().callback(|_| Msg::LoadMore)}>
                    { "Load More" }
                </button>
            </section>
        }
    }

    fn view_modal(&self, ctx: &Context<Self>) -> Html {
        let body = match self.modal {
            Modal::None => return html! {},
            Modal::Login => self.view_login_form(ctx),
            Modal::Register => self.view_register_form(ctx),
        };

        html! {
            <div class="modal" style="display: block" onclick={ctx.link().callback(|_| Msg::HideModals)}>
                <div class="modal-content" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                    <span class="modal-close" onclick={ctx.link().callback(|_| Msg::HideModals)}>{ "×" }</span>
                    { body }
                </div>
            </div>
        }
    }

    fn view_login_form(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Login
        });

        html! {
            <form id="loginForm" {onsubmit}>
                <h3>{ "Login" }</h3>
                <input
                    type="text"
                    placeholder="Username"
                    value={self.login_username.clone()}
                    oninput={ctx.link().callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::UpdateLoginUsername(input.value())
                    })}
                />
                <input
                    type="password"
                    placeholder="Password"
                    value={self.login_password.clone()}
                    oninput={ctx.link().callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::UpdateLoginPassword(input.value())
                    })}
                />
                <button type="submit" class="btn btn-primary">{ "Login" }</button>
            </form>
        }
    }

    fn view_register_form(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Register
        });

        html! {
            <form id="registerForm" {onsubmit}>
                <h3>{ "Register" }</h3>
                <input
                    type="text"
                    placeholder="Username"
                    value={self.register_username.clone()}
                    oninput={ctx.link().callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::UpdateRegisterUsername(input.value())
                    })}
                />
                <input
                    type="email"
                    placeholder="Email"
                    value={self.register_email.clone()}
                    oninput={ctx.link().callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::UpdateRegisterEmail(input.value())
                    })}
                />
                <input
                    type="password"
                    placeholder="Password"
                    value={self.register_password.clone()}
                    oninput={ctx.link().callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::UpdateRegisterPassword(input.value())
                    })}
                />
                <button type="submit" class="btn btn-primary">{ "Register" }</button>
            </form>
        }
    }
}
