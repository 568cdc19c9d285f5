pub mod api;
pub mod config;
pub mod display;
pub mod errors;
pub mod models;
pub mod views;

use api::ApiClient;
use config::ApiConfig;
use errors::CoreError;
use views::{alerts::AlertsView, portfolio::PortfolioView, screener::ScreenerView};

/// Main entry point for the Stratos dashboard core.
///
/// Holds one API client and one instance of each top-level container. The
/// containers do not share state; the struct only exists so a host can mount
/// and unmount everything in one place. Fields are public so a host can
/// borrow a container mutably alongside the client.
#[must_use]
pub struct Dashboard {
    pub api: ApiClient,
    pub screener: ScreenerView,
    pub portfolio: PortfolioView,
    pub alerts: AlertsView,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("api", &self.api)
            .field("has_searched", &self.screener.has_searched())
            .field("portfolio_loaded", &self.portfolio.summary().is_loaded())
            .field("alerts", &self.alerts.alert_list().len())
            .finish()
    }
}

impl Dashboard {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            screener: ScreenerView::new(),
            portfolio: PortfolioView::new(),
            alerts: AlertsView::new(),
        }
    }

    /// Dashboard over HTTP for the given configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self, CoreError> {
        Ok(Self::new(ApiClient::from_config(config)?))
    }

    /// Dashboard over HTTP configured from the environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Ok(Self::new(ApiClient::from_env()?))
    }

    /// Run every container's on-mount fetch: sectors, portfolio, alerts.
    /// Failures land in each container's own state.
    pub async fn mount_all(&mut self) {
        self.screener.mount(&self.api).await;
        self.portfolio.mount(&self.api).await;
        self.alerts.mount(&self.api).await;
    }

    /// Discard every result still in flight.
    pub fn unmount_all(&mut self) {
        self.screener.unmount();
        self.portfolio.unmount();
        self.alerts.unmount();
    }
}
