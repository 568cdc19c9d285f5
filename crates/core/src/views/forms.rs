use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::alert::{AlertCreate, AlertType};
use crate::models::portfolio::{PortfolioHoldingCreate, PortfolioHoldingUpdate};
use crate::models::stock::ScreeningFilters;

/// Raw screener inputs, exactly as typed. A blank input means "no criterion".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenerForm {
    pub sector: String,
    pub min_dividend_yield: String,
    pub max_pe_ratio: String,
    pub min_market_cap: String,
    pub max_beta: String,
    pub max_debt_to_equity: String,
}

impl ScreenerForm {
    /// Build filters, leaving out every blank input.
    pub fn to_filters(&self) -> Result<ScreeningFilters, CoreError> {
        let sector = self.sector.trim();
        Ok(ScreeningFilters {
            sector: (!sector.is_empty()).then(|| sector.to_string()),
            min_dividend_yield: parse_optional("Min dividend yield", &self.min_dividend_yield)?,
            max_pe_ratio: parse_optional("Max P/E ratio", &self.max_pe_ratio)?,
            min_market_cap: parse_optional("Min market cap", &self.min_market_cap)?,
            max_beta: parse_optional("Max beta", &self.max_beta)?,
            max_debt_to_equity: parse_optional("Max debt/equity", &self.max_debt_to_equity)?,
        })
    }

    /// Pre-fill from existing filters (e.g., saved preferences).
    pub fn from_filters(filters: &ScreeningFilters) -> Self {
        fn text(v: Option<f64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_default()
        }
        Self {
            sector: filters.sector.clone().unwrap_or_default(),
            min_dividend_yield: text(filters.min_dividend_yield),
            max_pe_ratio: text(filters.max_pe_ratio),
            min_market_cap: text(filters.min_market_cap),
            max_beta: text(filters.max_beta),
            max_debt_to_equity: text(filters.max_debt_to_equity),
        }
    }
}

fn parse_optional(label: &str, raw: &str) -> Result<Option<f64>, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(CoreError::ValidationError(format!(
            "{label} must be a non-negative number, got '{raw}'"
        ))),
    }
}

fn require_positive(label: &str, value: f64) -> Result<f64, CoreError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CoreError::ValidationError(format!(
            "{label} must be greater than zero"
        )))
    }
}

pub(crate) fn require_symbol(symbol: &str) -> Result<String, CoreError> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(CoreError::ValidationError("Symbol is required".into()));
    }
    Ok(symbol)
}

fn non_blank(notes: &Option<String>) -> Option<String> {
    notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Inputs of the add-holding form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingForm {
    pub symbol: String,
    pub shares: f64,
    pub purchase_price: f64,
    /// Defaults to "now" on the backend when left empty
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl HoldingForm {
    pub fn new(symbol: impl Into<String>, shares: f64, purchase_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            shares,
            purchase_price,
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Symbol non-empty, shares > 0 and purchase price > 0.
    pub fn validate(&self) -> Result<PortfolioHoldingCreate, CoreError> {
        Ok(PortfolioHoldingCreate {
            symbol: require_symbol(&self.symbol)?,
            shares: require_positive("Shares", self.shares)?,
            purchase_price: require_positive("Purchase price", self.purchase_price)?,
            purchase_date: self.purchase_date.and_then(|d| d.and_hms_opt(0, 0, 0)),
            notes: non_blank(&self.notes),
        })
    }
}

/// Validate a partial holding update with the same rules as creation.
pub fn validate_holding_update(update: &PortfolioHoldingUpdate) -> Result<PortfolioHoldingUpdate, CoreError> {
    if update.is_empty() {
        return Err(CoreError::ValidationError("Nothing to update".into()));
    }
    Ok(PortfolioHoldingUpdate {
        symbol: update.symbol.as_deref().map(require_symbol).transpose()?,
        shares: update
            .shares
            .map(|v| require_positive("Shares", v))
            .transpose()?,
        purchase_price: update
            .purchase_price
            .map(|v| require_positive("Purchase price", v))
            .transpose()?,
        purchase_date: update.purchase_date,
        notes: non_blank(&update.notes),
    })
}

/// Inputs of the create-alert form.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertForm {
    pub symbol: String,
    pub alert_type: AlertType,
    pub target_value: f64,
    pub notes: Option<String>,
}

impl Default for AlertForm {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            alert_type: AlertType::PriceAbove,
            target_value: 0.0,
            notes: None,
        }
    }
}

impl AlertForm {
    pub fn new(symbol: impl Into<String>, alert_type: AlertType, target_value: f64) -> Self {
        Self {
            symbol: symbol.into(),
            alert_type,
            target_value,
            notes: None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Symbol non-empty and target value > 0.
    pub fn validate(&self) -> Result<AlertCreate, CoreError> {
        Ok(AlertCreate {
            symbol: require_symbol(&self.symbol)?,
            alert_type: self.alert_type,
            target_value: require_positive("Target value", self.target_value)?,
            notes: non_blank(&self.notes),
        })
    }
}
