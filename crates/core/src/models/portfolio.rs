use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A recorded position as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHolding {
    pub id: i64,
    pub symbol: String,
    pub shares: f64,
    pub purchase_price: f64,
    pub purchase_date: NaiveDateTime,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A holding enriched with live market data.
///
/// The valuation fields are computed server-side and are `None` when the
/// backend could not price the symbol. They are never derived locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHoldingWithValue {
    #[serde(flatten)]
    pub holding: PortfolioHolding,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub gain_loss: Option<f64>,
    #[serde(default)]
    pub gain_loss_percent: Option<f64>,
}

/// Aggregate view of the whole portfolio, authoritative only from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_percent: f64,
    pub holdings_count: usize,
    /// Holdings in the order the backend returned them
    #[serde(default)]
    pub holdings: Vec<PortfolioHoldingWithValue>,
}

impl PortfolioSummary {
    /// An empty portfolio is a distinct render branch, not an error.
    pub fn is_empty(&self) -> bool {
        self.holdings_count == 0
    }
}

/// Body of the add-holding call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHoldingCreate {
    pub symbol: String,
    pub shares: f64,
    pub purchase_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of the update-holding call; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHoldingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PortfolioHoldingUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
