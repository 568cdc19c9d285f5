use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Five-step rating scale returned by both analysis endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
            Recommendation::StrongSell => "Strong Sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Recommendation for a single symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecommendation {
    pub symbol: String,
    pub recommendation: Recommendation,
    /// Confidence in [0, 1]
    pub confidence: f64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub target_price: Option<f64>,
    pub risk_level: RiskLevel,
}

impl StockRecommendation {
    /// Confidence as a whole percentage, clamped to [0, 100].
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Body of the portfolio-analysis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioAnalysisRequest {
    pub symbols: Vec<String>,
}

/// Backend assessment of a set of symbols taken as a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAnalysis {
    /// 0.0 to 10.0
    pub overall_score: f64,
    pub diversification_score: f64,
    pub risk_assessment: String,
    pub summary: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Sector name → weight
    #[serde(default)]
    pub sector_allocation: BTreeMap<String, f64>,
}
