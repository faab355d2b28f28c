//! Transport seams between the feed/session logic and the REST backend.
//!
//! Futures are not required to be `Send`: the browser front end runs them on
//! a single-threaded executor with `!Send` fetch handles.

use crate::error::AuctionClientError;
use crate::models::{Listing, LoginForm, PageQuery, RegisterRequest, TokenResponse};
use async_trait::async_trait;

// GET /items/
#[async_trait(?Send)]
pub trait ListingSource {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Listing>, AuctionClientError>;
}

// POST /auth/login, POST /auth/register
#[async_trait(?Send)]
pub trait AuthBackend {
    async fn login(&self, form: &LoginForm) -> Result<TokenResponse, AuctionClientError>;

    async fn register(&self, req: &RegisterRequest) -> Result<(), AuctionClientError>;
}
