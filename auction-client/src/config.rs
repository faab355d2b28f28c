use crate::error::AuctionClientError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_PAGE_SIZE: u32 = 12;
// Бэкенд отвечает 422 на limit > 100
pub const MAX_PAGE_SIZE: u32 = 100;

// Ключ токена в хранилище
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub page_size: u32,
    pub active_only: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            active_only: false,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), AuctionClientError> {
        if self.api_base.trim().is_empty() {
            return Err(AuctionClientError::InvalidConfig(
                "api base URL must not be empty".into(),
            ));
        }
        check_page_size(self.page_size)
    }
}

pub(crate) fn check_page_size(page_size: u32) -> Result<(), AuctionClientError> {
    if page_size == 0 {
        return Err(AuctionClientError::InvalidConfig(
            "page size must be positive".into(),
        ));
    }
    if page_size > MAX_PAGE_SIZE {
        return Err(AuctionClientError::InvalidConfig(format!(
            "page size must be at most {MAX_PAGE_SIZE}, got {page_size}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.page_size, 12);
        assert!(!config.active_only);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_page_size_and_blank_base() {
        let zero = ClientConfig {
            page_size: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(zero.validate(), Err(AuctionClientError::InvalidConfig(_))));

        let blank = ClientConfig {
            api_base: "  ".into(),
            ..ClientConfig::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn rejects_page_size_above_backend_limit() {
        let largest = ClientConfig {
            page_size: MAX_PAGE_SIZE,
            ..ClientConfig::default()
        };
        assert!(largest.validate().is_ok());

        let too_large = ClientConfig {
            page_size: 500,
            ..ClientConfig::default()
        };
        match too_large.validate() {
            Err(AuctionClientError::InvalidConfig(msg)) => {
                assert_eq!(msg, "page size must be at most 100, got 500")
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }
}
