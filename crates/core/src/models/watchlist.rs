use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A symbol the user is keeping an eye on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistItem {
    pub id: i64,
    pub symbol: String,
    pub added_at: NaiveDateTime,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub target_price: Option<f64>,
    pub is_active: bool,
}

/// Body of the add-to-watchlist call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistAdd {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_price: Option<f64>,
}

impl WatchlistAdd {
    pub fn symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into().trim().to_uppercase(),
            notes: None,
            target_price: None,
        }
    }
}
