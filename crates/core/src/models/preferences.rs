use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::stock::ScreeningFilters;

/// Saved screening thresholds, stored server-side under a profile name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub min_dividend_yield: Option<f64>,
    #[serde(default)]
    pub max_pe_ratio: Option<f64>,
    #[serde(default)]
    pub min_market_cap: Option<f64>,
    #[serde(default)]
    pub max_beta: Option<f64>,
    #[serde(default)]
    pub max_debt_to_equity: Option<f64>,
    #[serde(default)]
    pub preferred_sectors: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl UserPreferences {
    /// Screening criteria saved in this profile. Only the first preferred
    /// sector maps onto the single-sector screen.
    pub fn filters(&self) -> ScreeningFilters {
        ScreeningFilters {
            sector: self.preferred_sectors.first().cloned(),
            min_dividend_yield: self.min_dividend_yield,
            max_pe_ratio: self.max_pe_ratio,
            min_market_cap: self.min_market_cap,
            max_beta: self.max_beta,
            max_debt_to_equity: self.max_debt_to_equity,
        }
    }
}

/// Partial preferences sent to the save endpoint. Fields left `None` are not
/// serialized at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_sectors: Option<Vec<String>>,
}
