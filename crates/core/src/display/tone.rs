use crate::models::alert::AlertStatus;
use crate::models::analysis::{Recommendation, RiskLevel};

/// Colour band a host maps to its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Strong green
    Strong,
    /// Light green
    Good,
    /// Yellow
    Caution,
    /// Orange
    Warning,
    /// Red
    Negative,
    /// Grey / no data
    Muted,
}

/// Lower beta means a calmer stock.
pub fn beta_tone(beta: Option<f64>) -> Tone {
    match beta {
        None => Tone::Muted,
        Some(b) if b < 0.8 => Tone::Strong,
        Some(b) if b < 1.0 => Tone::Good,
        Some(b) if b < 1.2 => Tone::Caution,
        Some(_) => Tone::Negative,
    }
}

pub fn dividend_tone(dividend_yield: Option<f64>) -> Tone {
    match dividend_yield {
        None => Tone::Muted,
        Some(d) if d >= 3.0 => Tone::Strong,
        Some(d) if d >= 2.0 => Tone::Good,
        Some(d) if d >= 1.0 => Tone::Caution,
        Some(_) => Tone::Muted,
    }
}

pub fn gain_loss_tone(value: Option<f64>) -> Tone {
    match value {
        Some(v) if v > 0.0 => Tone::Strong,
        Some(v) if v < 0.0 => Tone::Negative,
        _ => Tone::Muted,
    }
}

pub fn risk_tone(risk: RiskLevel) -> Tone {
    match risk {
        RiskLevel::Low => Tone::Strong,
        RiskLevel::Medium => Tone::Caution,
        RiskLevel::High => Tone::Negative,
    }
}

pub fn recommendation_tone(recommendation: Recommendation) -> Tone {
    match recommendation {
        Recommendation::StrongBuy => Tone::Strong,
        Recommendation::Buy => Tone::Good,
        Recommendation::Hold => Tone::Caution,
        Recommendation::Sell => Tone::Warning,
        Recommendation::StrongSell => Tone::Negative,
    }
}

pub fn alert_status_tone(status: AlertStatus) -> Tone {
    match status {
        AlertStatus::Inactive => Tone::Muted,
        AlertStatus::Triggered => Tone::Strong,
        AlertStatus::Watching => Tone::Caution,
    }
}
