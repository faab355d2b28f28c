use async_trait::async_trait;
use auction_client::config::DEFAULT_API_BASE;
use auction_client::models::{
    ErrorDetail, Listing, LoginForm, PageQuery, RegisterRequest, TokenResponse,
};
use auction_client::{AuctionClientError, AuthBackend, ListingSource};
use gloo_net::http::{Request, Response};
use web_sys::UrlSearchParams;

/// Browser `fetch` access to the auction REST API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn api_error(response: Response) -> AuctionClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        AuctionClientError::Api {
            status,
            detail: ErrorDetail::from_body(&body),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn network(e: gloo_net::Error) -> AuctionClientError {
    AuctionClientError::TransportError(e.to_string())
}

#[async_trait(?Send)]
impl ListingSource for ApiClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Listing>, AuctionClientError> {
        let response = Request::get(&self.url("/items/"))
            .query(query.pairs())
            .send()
            .await
            .map_err(network)?;

        if response.ok() {
            response
                .json::<Vec<Listing>>()
                .await
                .map_err(|e| AuctionClientError::SerializationError(e.to_string()))
        } else {
            Err(Self::api_error(response).await)
        }
    }
}

#[async_trait(?Send)]
impl AuthBackend for ApiClient {
    async fn login(&self, form: &LoginForm) -> Result<TokenResponse, AuctionClientError> {
        let params = UrlSearchParams::new()
            .map_err(|e| AuctionClientError::TransportError(format!("{:?}", e)))?;
        params.append("username", &form.username);
        params.append("password", &form.password);

        // fetch сам выставит application/x-www-form-urlencoded
        let response = Request::post(&self.url("/auth/login"))
            .body(params)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;

        if response.ok() {
            response
                .json::<TokenResponse>()
                .await
                .map_err(|e| AuctionClientError::SerializationError(e.to_string()))
        } else {
            Err(Self::api_error(response).await)
        }
    }

    async fn register(&self, req: &RegisterRequest) -> Result<(), AuctionClientError> {
        let response = Request::post(&self.url("/auth/register"))
            .json(req)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;

        if response.ok() {
            Ok(())
        } else {
            Err(Self::api_error(response).await)
        }
    }
}
