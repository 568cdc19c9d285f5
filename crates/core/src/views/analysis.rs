use log::warn;

use super::lifecycle::{Lifecycle, Ticket};
use super::load_state::LoadState;
use crate::api::ApiClient;
use crate::errors::CoreError;
use crate::models::analysis::StockRecommendation;

/// Which backend analysis the panel asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisSource {
    /// Rule-based, no AI
    #[default]
    Quick,
    /// AI-backed
    Ai,
}

/// Analysis for exactly one symbol.
///
/// `NotLoaded` (unrequested) → `Loading` → `Loaded` | `Error`. Nothing is
/// fetched until the user asks; from `Error` the user may retry. Dropping
/// the panel discards everything, so reopening starts from scratch.
#[derive(Debug)]
pub struct AnalysisPanel {
    symbol: String,
    source: AnalysisSource,
    state: LoadState<StockRecommendation>,
    lifecycle: Lifecycle,
}

impl AnalysisPanel {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::with_source(symbol, AnalysisSource::default())
    }

    pub fn with_source(symbol: impl Into<String>, source: AnalysisSource) -> Self {
        Self {
            symbol: symbol.into().trim().to_uppercase(),
            source,
            state: LoadState::NotLoaded,
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn source(&self) -> AnalysisSource {
        self.source
    }

    pub fn state(&self) -> &LoadState<StockRecommendation> {
        &self.state
    }

    /// The retry control is only offered after a failure.
    pub fn can_retry(&self) -> bool {
        matches!(self.state, LoadState::Error(_))
    }

    /// The request control is only offered before the first request.
    pub fn can_request(&self) -> bool {
        matches!(self.state, LoadState::NotLoaded)
    }

    /// Start the first request.
    pub fn begin_request(&mut self) -> Option<Ticket> {
        if !self.can_request() {
            return None;
        }
        self.state = LoadState::Loading;
        Some(self.lifecycle.issue())
    }

    /// Start again after a failure.
    pub fn begin_retry(&mut self) -> Option<Ticket> {
        if !self.can_retry() {
            return None;
        }
        self.state = LoadState::Loading;
        Some(self.lifecycle.issue())
    }

    /// Apply a result. Returns `false` when the result was discarded.
    pub fn finish(&mut self, ticket: Ticket, result: Result<StockRecommendation, CoreError>) -> bool {
        if !self.lifecycle.accepts(ticket) {
            return false;
        }
        if let Err(e) = &result {
            warn!("Analysis for {} failed: {e}", self.symbol);
        }
        self.state = LoadState::from_result(result);
        true
    }

    /// Stop accepting results for requests already in flight.
    pub fn close(&mut self) {
        self.lifecycle.unmount();
    }

    /// Issue the analysis call for this panel's symbol and source.
    pub async fn call(api: &ApiClient, symbol: &str, source: AnalysisSource) -> Result<StockRecommendation, CoreError> {
        match source {
            AnalysisSource::Quick => api.get_quick_analysis(symbol).await,
            AnalysisSource::Ai => api.get_stock_analysis(symbol).await,
        }
    }
}
