use super::format::{
    format_currency, format_market_cap, format_number, format_percent, format_signed_percent,
};
use super::tone::{alert_status_tone, beta_tone, dividend_tone, gain_loss_tone, Tone};
use crate::models::alert::{Alert, AlertStatus};
use crate::models::portfolio::PortfolioHoldingWithValue;
use crate::models::stock::Stock;

pub const STOCK_COLUMNS: [&str; 8] = [
    "Symbol", "Name", "Sector", "Price", "Div Yield", "P/E", "Market Cap", "Beta",
];

pub const HOLDING_COLUMNS: [&str; 7] = [
    "Symbol", "Name", "Shares", "Cost", "Price", "Value", "Gain/Loss",
];

pub const ALERT_COLUMNS: [&str; 4] = ["Symbol", "Type", "Target", "Status"];

/// One screener table row, keyed by symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub price: String,
    pub dividend_yield: String,
    pub dividend_tone: Tone,
    pub pe_ratio: String,
    pub market_cap: String,
    pub beta: String,
    pub beta_tone: Tone,
}

impl From<&Stock> for StockRow {
    fn from(stock: &Stock) -> Self {
        Self {
            symbol: stock.symbol.clone(),
            name: stock.name.clone(),
            sector: stock.sector.clone(),
            price: format!("${}", format_number(Some(stock.price), 2)),
            dividend_yield: format_percent(stock.dividend_yield),
            dividend_tone: dividend_tone(stock.dividend_yield),
            pe_ratio: format_number(stock.pe_ratio, 1),
            market_cap: format_market_cap(stock.market_cap),
            beta: format_number(stock.beta, 2),
            beta_tone: beta_tone(stock.beta),
        }
    }
}

impl StockRow {
    /// Cells in `STOCK_COLUMNS` order.
    pub fn cells(&self) -> [&str; 8] {
        [
            self.symbol.as_str(),
            self.name.as_str(),
            self.sector.as_str(),
            self.price.as_str(),
            self.dividend_yield.as_str(),
            self.pe_ratio.as_str(),
            self.market_cap.as_str(),
            self.beta.as_str(),
        ]
    }
}

pub fn stock_rows(stocks: &[Stock]) -> Vec<StockRow> {
    stocks.iter().map(StockRow::from).collect()
}

/// One holdings table row, keyed by holding id.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingRow {
    pub id: i64,
    pub symbol: String,
    pub name: String,
    pub shares: String,
    pub purchase_price: String,
    pub current_price: String,
    pub current_value: String,
    /// "$150.00 (+10.00%)"
    pub gain_loss: String,
    pub gain_loss_tone: Tone,
}

impl From<&PortfolioHoldingWithValue> for HoldingRow {
    fn from(h: &PortfolioHoldingWithValue) -> Self {
        Self {
            id: h.holding.id,
            symbol: h.holding.symbol.clone(),
            name: h.name.clone().unwrap_or_else(|| "-".to_string()),
            shares: format!("{:.2}", h.holding.shares),
            purchase_price: format_currency(Some(h.holding.purchase_price)),
            current_price: format_currency(h.current_price),
            current_value: format_currency(h.current_value),
            gain_loss: format!(
                "{} ({})",
                format_currency(h.gain_loss),
                format_signed_percent(h.gain_loss_percent)
            ),
            gain_loss_tone: gain_loss_tone(h.gain_loss),
        }
    }
}

impl HoldingRow {
    pub fn cells(&self) -> [&str; 7] {
        [
            self.symbol.as_str(),
            self.name.as_str(),
            self.shares.as_str(),
            self.purchase_price.as_str(),
            self.current_price.as_str(),
            self.current_value.as_str(),
            self.gain_loss.as_str(),
        ]
    }
}

pub fn holding_rows(holdings: &[PortfolioHoldingWithValue]) -> Vec<HoldingRow> {
    holdings.iter().map(HoldingRow::from).collect()
}

/// One alerts table row, keyed by alert id.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRow {
    pub id: i64,
    pub symbol: String,
    pub alert_type: &'static str,
    pub target: String,
    pub status: AlertStatus,
    pub status_tone: Tone,
}

impl From<&Alert> for AlertRow {
    fn from(alert: &Alert) -> Self {
        let status = alert.status();
        Self {
            id: alert.id,
            symbol: alert.symbol.clone(),
            alert_type: alert.alert_type.label(),
            target: format_currency(Some(alert.target_value)),
            status,
            status_tone: alert_status_tone(status),
        }
    }
}

impl AlertRow {
    pub fn cells(&self) -> [&str; 4] {
        [self.symbol.as_str(), self.alert_type, self.target.as_str(), self.status.label()]
    }
}

pub fn alert_rows(alerts: &[Alert]) -> Vec<AlertRow> {
    alerts.iter().map(AlertRow::from).collect()
}
