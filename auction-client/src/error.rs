use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

#[derive(Debug, Error)]
pub enum AuctionClientError {
    // HTTP ошибки
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    // Бэкенд ответил не-2xx статусом
    #[error("API error (HTTP {status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    // Транспортные ошибки (браузерный fetch и т.п.)
    #[error("Transport error: {0}")]
    TransportError(String),

    // Ошибки сериализации/десериализации
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // Хранилище токена
    #[error("Token storage error: {0}")]
    TokenStore(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AuctionClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AuctionClientError::Api { status: 401, .. })
    }

    pub fn is_api_error(&self) -> bool {
        matches!(self, AuctionClientError::Api { .. })
    }

    // detail сервера, иначе сетевое сообщение или fallback
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AuctionClientError::Api {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            AuctionClientError::TransportError(_) => NETWORK_ERROR_MESSAGE.to_string(),
            #[cfg(feature = "http")]
            AuctionClientError::HttpError(_) => NETWORK_ERROR_MESSAGE.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for AuctionClientError {
    fn from(e: serde_json::Error) -> Self {
        AuctionClientError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for AuctionClientError {
    fn from(e: std::io::Error) -> Self {
        AuctionClientError::TokenStore(e.to_string())
    }
}
