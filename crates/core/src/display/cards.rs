use super::format::{format_currency, format_signed_percent};
use super::tone::{gain_loss_tone, recommendation_tone, risk_tone, Tone};
use crate::models::analysis::StockRecommendation;
use crate::models::portfolio::PortfolioSummary;

/// The four headline figures above the holdings table.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioTotals {
    pub total_value: String,
    pub total_cost: String,
    pub total_gain_loss: String,
    pub total_gain_loss_percent: String,
    pub tone: Tone,
}

impl From<&PortfolioSummary> for PortfolioTotals {
    fn from(summary: &PortfolioSummary) -> Self {
        Self {
            total_value: format_currency(Some(summary.total_value)),
            total_cost: format_currency(Some(summary.total_cost)),
            total_gain_loss: format_currency(Some(summary.total_gain_loss)),
            total_gain_loss_percent: format_signed_percent(Some(summary.total_gain_loss_percent)),
            tone: gain_loss_tone(Some(summary.total_gain_loss)),
        }
    }
}

/// Rendered analysis result.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisCard {
    pub title: String,
    pub recommendation: &'static str,
    pub recommendation_tone: Tone,
    /// "85%"
    pub confidence: String,
    pub summary: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub risk_level: &'static str,
    pub risk_tone: Tone,
    /// Only present when the backend gave a target
    pub target_price: Option<String>,
}

impl From<&StockRecommendation> for AnalysisCard {
    fn from(rec: &StockRecommendation) -> Self {
        Self {
            title: format!("Analysis: {}", rec.symbol),
            recommendation: rec.recommendation.label(),
            recommendation_tone: recommendation_tone(rec.recommendation),
            confidence: format!("{}%", rec.confidence_percent()),
            summary: rec.summary.clone(),
            pros: rec.pros.clone(),
            cons: rec.cons.clone(),
            risk_level: rec.risk_level.label(),
            risk_tone: risk_tone(rec.risk_level),
            target_price: rec.target_price.map(|p| format_currency(Some(p))),
        }
    }
}
