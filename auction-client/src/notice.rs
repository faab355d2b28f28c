use crate::error::AuctionClientError;
use std::fmt;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
            NoticeLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn from_error(err: &AuctionClientError, fallback: &str) -> Self {
        Self::error(err.user_message(fallback))
    }

    pub fn logged_in() -> Self {
        Self::success("Login successful!")
    }

    pub fn registered() -> Self {
        Self::success("Registration successful! Please login.")
    }

    pub fn logged_out() -> Self {
        Self::success("Logged out successfully")
    }

    // Детали лота и ставки пока не реализованы
    pub fn view_coming_soon(listing_id: i64) -> Self {
        Self::info(format!("View auction {listing_id} - Feature coming soon!"))
    }

    pub fn bid_coming_soon(listing_id: i64) -> Self {
        Self::info(format!("Place bid on auction {listing_id} - Feature coming soon!"))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level.as_str().to_uppercase(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_level_prefix() {
        assert_eq!(Notice::logged_in().to_string(), "SUCCESS: Login successful!");
        assert_eq!(
            Notice::bid_coming_soon(5).to_string(),
            "INFO: Place bid on auction 5 - Feature coming soon!"
        );
    }

    #[test]
    fn error_notice_uses_server_detail_or_fallback() {
        let with_detail = AuctionClientError::Api {
            status: 400,
            detail: Some("Email already registered".into()),
        };
        let notice = Notice::from_error(&with_detail, REGISTRATION_FAILED);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Email already registered");

        let bare = AuctionClientError::Api {
            status: 422,
            detail: None,
        };
        assert_eq!(Notice::from_error(&bare, LOGIN_FAILED).message, LOGIN_FAILED);
    }
}
