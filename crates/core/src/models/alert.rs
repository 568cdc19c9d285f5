use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Condition an alert watches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    PriceAbove,
    PriceBelow,
    PercentChange,
}

impl AlertType {
    /// Short label used in tables and form selectors.
    pub fn label(&self) -> &'static str {
        match self {
            AlertType::PriceAbove => "Price Above",
            AlertType::PriceBelow => "Price Below",
            AlertType::PercentChange => "% Change",
        }
    }

    /// Wire name (e.g., "price_above").
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::PriceAbove => "price_above",
            AlertType::PriceBelow => "price_below",
            AlertType::PercentChange => "percent_change",
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "price_above" | "above" => Ok(AlertType::PriceAbove),
            "price_below" | "below" => Ok(AlertType::PriceBelow),
            "percent_change" | "change" => Ok(AlertType::PercentChange),
            other => Err(format!(
                "unknown alert type '{other}' (expected price_above, price_below or percent_change)"
            )),
        }
    }
}

/// A user-defined trigger on a stock price, evaluated by the backend on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub symbol: String,
    pub alert_type: AlertType,
    pub target_value: f64,
    pub is_active: bool,
    pub is_triggered: bool,
    #[serde(default)]
    pub triggered_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub notes: Option<String>,
}

/// What the user sees for an alert. Derived from `(is_active, is_triggered)`
/// and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertStatus {
    Inactive,
    Triggered,
    Watching,
}

impl AlertStatus {
    pub fn of(alert: &Alert) -> Self {
        Self::from_flags(alert.is_active, alert.is_triggered)
    }

    pub fn from_flags(is_active: bool, is_triggered: bool) -> Self {
        match (is_active, is_triggered) {
            (false, _) => AlertStatus::Inactive,
            (true, true) => AlertStatus::Triggered,
            (true, false) => AlertStatus::Watching,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertStatus::Inactive => "Inactive",
            AlertStatus::Triggered => "Triggered",
            AlertStatus::Watching => "Watching",
        }
    }
}

impl Alert {
    pub fn status(&self) -> AlertStatus {
        AlertStatus::of(self)
    }
}

/// Body of the create-alert call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertCreate {
    pub symbol: String,
    pub alert_type: AlertType,
    pub target_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Result of evaluating one alert during a "Check Now".
/// Transient: kept only until the next check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertCheck {
    pub alert: Alert,
    #[serde(default)]
    pub current_price: Option<f64>,
    pub should_trigger: bool,
    pub message: String,
}
