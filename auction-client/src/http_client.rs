use crate::backend::{AuthBackend, ListingSource};
use crate::config::ClientConfig;
use crate::error::AuctionClientError;
use crate::models::{ErrorDetail, Listing, LoginForm, PageQuery, RegisterRequest, TokenResponse};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn list_items(&self, query: &PageQuery) -> Result<Vec<Listing>, AuctionClientError> {
        let url = self.url("/items/");
        let response = self.client.get(&url).query(&query.pairs()).send().await?;

        let status = response.status();
        if status.is_success() {
            let listings = response.json::<Vec<Listing>>().await?;
            Ok(listings)
        } else {
            Err(Self::api_error(response).await)
        }
    }

    pub async fn login(&self, form: &LoginForm) -> Result<TokenResponse, AuctionClientError> {
        let url = self.url("/auth/login");
        let response = self.client.post(&url).form(form).send().await?;

        let status = response.status();
        if status.is_success() {
            let token = response.json::<TokenResponse>().await?;
            Ok(token)
        } else {
            Err(Self::api_error(response).await)
        }
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<(), AuctionClientError> {
        let url = self.url("/auth/register");
        let response = self.client.post(&url).json(req).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(response).await)
        }
    }

    async fn api_error(response: Response) -> AuctionClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, body = %body, "API request rejected");

        AuctionClientError::Api {
            status: status.as_u16(),
            detail: ErrorDetail::from_body(&body),
        }
    }
}

#[async_trait(?Send)]
impl ListingSource for HttpClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Listing>, AuctionClientError> {
        self.list_items(query).await
    }
}

#[async_trait(?Send)]
impl AuthBackend for HttpClient {
    async fn login(&self, form: &LoginForm) -> Result<TokenResponse, AuctionClientError> {
        HttpClient::login(self, form).await
    }

    async fn register(&self, req: &RegisterRequest) -> Result<(), AuctionClientError> {
        HttpClient::register(self, req).await
    }
}
