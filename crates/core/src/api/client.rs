use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::http::HttpTransport;
use super::request::{ApiRequest, ApiResponse};
use super::transport::Transport;
use crate::config::ApiConfig;
use crate::errors::CoreError;
use crate::models::alert::{Alert, AlertCheck, AlertCreate};
use crate::models::analysis::{PortfolioAnalysis, PortfolioAnalysisRequest, StockRecommendation};
use crate::models::portfolio::{
    PortfolioHolding, PortfolioHoldingCreate, PortfolioHoldingUpdate, PortfolioHoldingWithValue,
    PortfolioSummary,
};
use crate::models::preferences::{PreferencesUpdate, UserPreferences};
use crate::models::stock::{
    HealthStatus, ScreeningFilters, Stock, StockComparison, StockScreenResponse,
};
use crate::models::watchlist::{WatchlistAdd, WatchlistItem};

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Build path segments under `/api/v1`.
fn v1<const N: usize>(rest: [&str; N]) -> Vec<String> {
    API_PREFIX
        .iter()
        .chain(rest.iter())
        .map(|s| s.to_string())
        .collect()
}

/// Typed client for every backend operation.
///
/// One method per endpoint. Each call:
/// 1. builds an [`ApiRequest`] (query parameters only for values that are set),
/// 2. sends it through the [`Transport`],
/// 3. turns any non-2xx status into [`CoreError::RequestFailed`] carrying the
///    status text, and
/// 4. decodes the JSON body into the declared type.
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("transport", &self.transport.name())
            .finish()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client over HTTP for the given configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self, CoreError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// Client over HTTP configured from the environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_config(&ApiConfig::from_env()?)
    }

    // ── Plumbing ────────────────────────────────────────────────────

    async fn execute(&self, operation: &str, request: ApiRequest) -> Result<ApiResponse, CoreError> {
        debug!("{operation}: {request}");
        let response = match self.transport.send(request).await {
            Ok(r) => r,
            Err(e) => {
                warn!("{operation} did not complete: {e}");
                return Err(e);
            }
        };

        if !response.is_success() {
            let err = CoreError::request_failed(operation, response.status, response.status_text);
            if err.is_transient() {
                warn!("{err} ({})", response.status);
            } else {
                error!("{err} ({})", response.status);
            }
            return Err(err);
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, operation: &str, request: ApiRequest) -> Result<T, CoreError> {
        let response = self.execute(operation, request).await?;
        serde_json::from_slice(&response.body).map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse response to {operation}: {e}"))
        })
    }

    /// For calls whose response body carries nothing the caller needs.
    async fn discard(&self, operation: &str, request: ApiRequest) -> Result<(), CoreError> {
        self.execute(operation, request).await.map(|_| ())
    }

    // ── Stocks ──────────────────────────────────────────────────────

    /// Screen the stock universe with the given criteria.
    pub async fn screen_stocks(&self, filters: &ScreeningFilters) -> Result<StockScreenResponse, CoreError> {
        let request = ApiRequest::get(v1(["stocks", "screen"])).query_pairs(filters.query_pairs());
        self.fetch("screen stocks", request).await
    }

    pub async fn get_stock(&self, symbol: &str) -> Result<Stock, CoreError> {
        let request = ApiRequest::get(v1(["stocks", symbol.trim()]));
        self.fetch("get stock details", request).await
    }

    /// Symbols in the screening universe.
    pub async fn get_universe(&self) -> Result<Vec<String>, CoreError> {
        self.fetch("get stock universe", ApiRequest::get(v1(["stocks", "universe"])))
            .await
    }

    /// Sectors available for the screener dropdown.
    pub async fn get_sectors(&self) -> Result<Vec<String>, CoreError> {
        self.fetch("get sectors", ApiRequest::get(v1(["stocks", "sectors"])))
            .await
    }

    pub async fn compare_stocks(&self, symbols: &[String]) -> Result<StockComparison, CoreError> {
        let joined = symbols
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        if joined.is_empty() {
            return Err(CoreError::ValidationError(
                "At least one symbol is required to compare".into(),
            ));
        }
        let request = ApiRequest::get(v1(["stocks", "compare", joined.as_str()]));
        self.fetch("compare stocks", request).await
    }

    // ── Preferences & watchlist ─────────────────────────────────────

    pub async fn get_preferences(&self, name: &str) -> Result<UserPreferences, CoreError> {
        let request = ApiRequest::get(v1(["preferences"])).query("name", name);
        self.fetch("get preferences", request).await
    }

    pub async fn save_preferences(&self, preferences: &PreferencesUpdate) -> Result<UserPreferences, CoreError> {
        let request = ApiRequest::post(v1(["preferences"])).json(preferences)?;
        self.fetch("save preferences", request).await
    }

    pub async fn get_watchlist(&self, active_only: bool) -> Result<Vec<WatchlistItem>, CoreError> {
        let request = ApiRequest::get(v1(["watchlist"])).query("active_only", active_only);
        self.fetch("get watchlist", request).await
    }

    pub async fn add_to_watchlist(&self, item: &WatchlistAdd) -> Result<WatchlistItem, CoreError> {
        let request = ApiRequest::post(v1(["watchlist"])).json(item)?;
        self.fetch("add to watchlist", request).await
    }

    pub async fn remove_from_watchlist(&self, symbol: &str) -> Result<(), CoreError> {
        let request = ApiRequest::delete(v1(["watchlist", symbol.trim()]));
        self.discard("remove from watchlist", request).await
    }

    // ── Analysis ────────────────────────────────────────────────────

    /// AI-backed recommendation for one symbol.
    pub async fn get_stock_analysis(&self, symbol: &str) -> Result<StockRecommendation, CoreError> {
        let request = ApiRequest::get(v1(["analysis", "stock", symbol.trim()]));
        self.fetch("get stock analysis", request).await
    }

    /// Rule-based recommendation for one symbol (no AI).
    pub async fn get_quick_analysis(&self, symbol: &str) -> Result<StockRecommendation, CoreError> {
        let request = ApiRequest::get(v1(["analysis", "quick", symbol.trim()]));
        self.fetch("get quick analysis", request).await
    }

    pub async fn analyze_portfolio(&self, symbols: &[String]) -> Result<PortfolioAnalysis, CoreError> {
        let body = PortfolioAnalysisRequest {
            symbols: symbols.to_vec(),
        };
        let request = ApiRequest::post(v1(["analysis", "portfolio"])).json(&body)?;
        self.fetch("analyze portfolio", request).await
    }

    // ── Portfolio ───────────────────────────────────────────────────

    /// Full portfolio with backend-computed valuations and totals.
    pub async fn get_portfolio(&self) -> Result<PortfolioSummary, CoreError> {
        self.fetch("get portfolio", ApiRequest::get(v1(["portfolio", ""])))
            .await
    }

    /// Raw holdings without valuations.
    pub async fn list_holdings(&self) -> Result<Vec<PortfolioHolding>, CoreError> {
        self.fetch("list holdings", ApiRequest::get(v1(["portfolio", "holdings"])))
            .await
    }

    pub async fn get_holding(&self, holding_id: i64) -> Result<PortfolioHoldingWithValue, CoreError> {
        let id = holding_id.to_string();
        let request = ApiRequest::get(v1(["portfolio", "holdings", id.as_str()]));
        self.fetch("get holding", request).await
    }

    pub async fn add_holding(&self, holding: &PortfolioHoldingCreate) -> Result<PortfolioHolding, CoreError> {
        let request = ApiRequest::post(v1(["portfolio", "holdings"])).json(holding)?;
        self.fetch("add holding", request).await
    }

    pub async fn update_holding(
        &self,
        holding_id: i64,
        updates: &PortfolioHoldingUpdate,
    ) -> Result<PortfolioHolding, CoreError> {
        let id = holding_id.to_string();
        let request = ApiRequest::put(v1(["portfolio", "holdings", id.as_str()])).json(updates)?;
        self.fetch("update holding", request).await
    }

    pub async fn delete_holding(&self, holding_id: i64) -> Result<(), CoreError> {
        let id = holding_id.to_string();
        let request = ApiRequest::delete(v1(["portfolio", "holdings", id.as_str()]));
        self.discard("delete holding", request).await
    }

    // ── Alerts ──────────────────────────────────────────────────────

    pub async fn get_alerts(&self, active_only: bool) -> Result<Vec<Alert>, CoreError> {
        let request = ApiRequest::get(v1(["alerts", ""])).query("active_only", active_only);
        self.fetch("get alerts", request).await
    }

    pub async fn get_alert(&self, alert_id: i64) -> Result<Alert, CoreError> {
        let id = alert_id.to_string();
        self.fetch("get alert", ApiRequest::get(v1(["alerts", id.as_str()])))
            .await
    }

    pub async fn get_alerts_for_symbol(&self, symbol: &str, active_only: bool) -> Result<Vec<Alert>, CoreError> {
        let request = ApiRequest::get(v1(["alerts", "symbol", symbol.trim()]))
            .query("active_only", active_only);
        self.fetch("get alerts for symbol", request).await
    }

    pub async fn create_alert(&self, alert: &AlertCreate) -> Result<Alert, CoreError> {
        let request = ApiRequest::post(v1(["alerts", ""])).json(alert)?;
        self.fetch("create alert", request).await
    }

    pub async fn deactivate_alert(&self, alert_id: i64) -> Result<Alert, CoreError> {
        let id = alert_id.to_string();
        let request = ApiRequest::post(v1(["alerts", id.as_str(), "deactivate"]));
        self.fetch("deactivate alert", request).await
    }

    pub async fn delete_alert(&self, alert_id: i64) -> Result<(), CoreError> {
        let id = alert_id.to_string();
        self.discard("delete alert", ApiRequest::delete(v1(["alerts", id.as_str()])))
            .await
    }

    /// Evaluate every active alert server-side.
    pub async fn check_alerts(&self) -> Result<Vec<AlertCheck>, CoreError> {
        self.fetch("check alerts", ApiRequest::get(v1(["alerts", "check", "all"])))
            .await
    }

    // ── Health ──────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthStatus, CoreError> {
        self.fetch("check health", ApiRequest::get(["health"]))
            .await
    }
}
