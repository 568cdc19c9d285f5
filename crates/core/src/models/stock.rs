use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single stock as returned by the screening and detail endpoints.
///
/// Every fundamental metric is optional: the backend leaves a field out (or
/// sends `null`) when it has no data, and that absence must survive all the
/// way to the table as "N/A" instead of turning into zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    /// Ticker symbol, unique within any list the backend returns
    pub symbol: String,

    pub name: String,

    pub sector: String,

    /// Last price in USD
    pub price: f64,

    /// Dividend yield in percent (3.0 means 3%)
    #[serde(default)]
    pub dividend_yield: Option<f64>,

    #[serde(default)]
    pub pe_ratio: Option<f64>,

    /// Market capitalisation in billions of USD
    #[serde(default)]
    pub market_cap: Option<f64>,

    #[serde(default)]
    pub beta: Option<f64>,

    #[serde(default)]
    pub debt_to_equity: Option<f64>,

    #[serde(default)]
    pub fifty_two_week_high: Option<f64>,

    #[serde(default)]
    pub fifty_two_week_low: Option<f64>,
}

/// Screening criteria. Every criterion is optional and an unset one is never
/// sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_dividend_yield: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pe_ratio: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_market_cap: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_beta: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_debt_to_equity: Option<f64>,
}

impl ScreeningFilters {
    /// True when no criterion is set (the backend applies its defaults).
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Query parameters for the screen request, in a stable order.
    /// Unset criteria and blank sectors are left out entirely.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(sector) = self.sector.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("sector", sector.to_string()));
        }
        let numeric = [
            ("min_dividend_yield", self.min_dividend_yield),
            ("max_pe_ratio", self.max_pe_ratio),
            ("min_market_cap", self.min_market_cap),
            ("max_beta", self.max_beta),
            ("max_debt_to_equity", self.max_debt_to_equity),
        ];
        for (key, value) in numeric {
            if let Some(v) = value {
                pairs.push((key, v.to_string()));
            }
        }
        pairs
    }
}

/// A value echoed back in `filters_applied`: the backend mixes strings
/// (sector) and numbers (thresholds) in the same map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(n) => write!(f, "{n}"),
            FilterValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Response of the screen endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockScreenResponse {
    pub stocks: Vec<Stock>,

    pub total: usize,

    /// The criteria the backend actually applied, keyed by filter name.
    #[serde(default)]
    pub filters_applied: BTreeMap<String, FilterValue>,
}

/// Response of the compare endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockComparison {
    pub stocks: Vec<Stock>,
    pub count: usize,
}

/// Body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}
