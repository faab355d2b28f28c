pub mod backend;
pub mod card;
pub mod config;
pub mod error;
pub mod feed;
#[cfg(feature = "http")]
pub mod http_client;
pub mod models;
pub mod notice;
pub mod session;
pub mod token_store;

pub use backend::{AuthBackend, ListingSource};
pub use card::{CardAction, CardImage, CardList, ListingCard, StatusBadge};
pub use config::ClientConfig;
pub use error::AuctionClientError;
pub use feed::FeedController;
pub use models::{Listing, ListingStatus, PageQuery, TokenResponse};
pub use notice::{Notice, NoticeLevel};
pub use session::{Session, SessionGate};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

#[cfg(feature = "http")]
pub use client::AuctionClient;

#[cfg(feature = "http")]
mod client {
    use crate::card::{self, ListingCard};
    use crate::config::ClientConfig;
    use crate::error::AuctionClientError;
    use crate::feed::FeedController;
    use crate::http_client::HttpClient;
    use crate::session::{Session, SessionGate};
    use crate::token_store::TokenStore;

    /// One view's worth of client state: the feed, the session gate and the
    /// HTTP backend they talk to. Construct once and pass by reference.
    #[derive(Debug)]
    pub struct AuctionClient<T: TokenStore> {
        http: HttpClient,
        feed: FeedController,
        gate: SessionGate<T>,
    }

    impl<T: TokenStore> AuctionClient<T> {
        pub fn new(config: &ClientConfig, store: T) -> Result<Self, AuctionClientError> {
            config.validate()?;

            Ok(Self {
                http: HttpClient::from_config(config),
                feed: FeedController::from_config(config)?,
                gate: SessionGate::new(store),
            })
        }

        pub fn feed(&self) -> &FeedController {
            &self.feed
        }

        pub fn gate(&self) -> &SessionGate<T> {
            &self.gate
        }

        pub fn session(&self) -> Option<&Session> {
            self.gate.session()
        }

        pub fn http(&self) -> &HttpClient {
            &self.http
        }

        pub fn restore_session(&mut self) -> Option<&Session> {
            self.gate.restore_session()
        }

        /// Load page 0 and return its cards.
        pub async fn load_first_page(&mut self) -> Vec<ListingCard> {
            let fresh = self.feed.load_first_page(&self.http).await;
            card::render(fresh, self.gate.session())
        }

        /// Advance to the next page and return cards for the new listings only.
        pub async fn load_more(&mut self) -> Vec<ListingCard> {
            let fresh = self.feed.load_more(&self.http).await;
            card::render(fresh, self.gate.session())
        }

        pub async fn login(
            &mut self,
            username: impl Into<String>,
            password: impl Into<String>,
        ) -> Result<&Session, AuctionClientError> {
            self.gate.login(&self.http, username, password).await
        }

        pub async fn register(
            &self,
            username: impl Into<String>,
            email: impl Into<String>,
            password: impl Into<String>,
        ) -> Result<(), AuctionClientError> {
            self.gate
                .register(&self.http, username, email, password)
                .await
        }

        pub fn logout(&mut self) -> Result<(), AuctionClientError> {
            self.gate.logout()
        }
    }
}
