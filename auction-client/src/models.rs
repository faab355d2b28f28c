use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ==================== Модели лотов ====================

// Статус аукциона; неизвестные значения сохраняются в Other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ListingStatus {
    Draft,
    Active,
    Ended,
    Cancelled,
    Other(String),
}

impl ListingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ListingStatus::Draft => "draft",
            ListingStatus::Active => "active",
            ListingStatus::Ended => "ended",
            ListingStatus::Cancelled => "cancelled",
            ListingStatus::Other(raw) => raw,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ListingStatus::Active)
    }
}

impl From<String> for ListingStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "draft" => ListingStatus::Draft,
            "active" => ListingStatus::Active,
            "ended" => ListingStatus::Ended,
            "cancelled" => ListingStatus::Cancelled,
            _ => ListingStatus::Other(raw),
        }
    }
}

impl From<ListingStatus> for String {
    fn from(status: ListingStatus) -> Self {
        match status {
            ListingStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ListingRecord")]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub current_price: f64,
    pub status: ListingStatus,
    pub end_time: DateTime<Utc>,
    pub image_url: Option<String>,
    pub seller_username: Option<String>,
    pub category_name: Option<String>,
    pub bid_count: u32,
}

// Полная запись или краткая сводка (auction_end, is_auction_active)
#[derive(Debug, Deserialize)]
struct ListingRecord {
    id: i64,
    title: String,
    description: Option<String>,
    current_price: f64,
    status: Option<ListingStatus>,
    is_auction_active: Option<bool>,
    #[serde(alias = "auction_end", deserialize_with = "deserialize_timestamp")]
    end_time: DateTime<Utc>,
    image_url: Option<String>,
    seller_username: Option<String>,
    category_name: Option<String>,
    #[serde(default)]
    bid_count: u32,
}

impl TryFrom<ListingRecord> for Listing {
    type Error = String;

    fn try_from(record: ListingRecord) -> Result<Self, Self::Error> {
        if record.current_price.is_nan() || record.current_price < 0.0 {
            return Err(format!(
                "listing {} has invalid current_price {}",
                record.id, record.current_price
            ));
        }

        let status = record.status.unwrap_or(match record.is_auction_active {
            Some(false) => ListingStatus::Ended,
            _ => ListingStatus::Active,
        });

        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            // -0.0 -> 0.0
            current_price: record.current_price + 0.0,
            status,
            end_time: record.end_time,
            image_url: record.image_url,
            seller_username: record.seller_username,
            category_name: record.category_name,
            bid_count: record.bid_count,
        })
    }
}

// RFC 3339 или наивное время (считается UTC)
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

// ==================== Пагинация ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub skip: u64,
    pub limit: u32,
    pub active_only: bool,
}

impl PageQuery {
    pub fn for_page(cursor: u32, page_size: u32, active_only: bool) -> Self {
        Self {
            skip: u64::from(cursor) * u64::from(page_size),
            limit: page_size,
            active_only,
        }
    }

    /// Query pairs in wire order. `active_only` is omitted entirely unless set.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if self.active_only {
            pairs.push(("active_only", "true".to_string()));
        }
        pairs
    }
}

// ==================== Модели авторизации ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

// ==================== Общие ошибки ====================

/// Error body returned by the backend. `detail` is a plain string for
/// business errors and a structured list for validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorDetail {
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn from_body(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorDetail>(body)
            .ok()
            .and_then(|e| e.message())
    }
}
