use log::{info, warn};
use std::collections::BTreeMap;

use super::analysis::{AnalysisPanel, AnalysisSource};
use super::forms::{require_symbol, ScreenerForm};
use super::lifecycle::{Lifecycle, Ticket};
use super::load_state::LoadState;
use super::notifications::Notification;
use crate::api::ApiClient;
use crate::display::tables::{stock_rows, StockRow};
use crate::errors::CoreError;
use crate::models::stock::{FilterValue, ScreeningFilters, Stock, StockScreenResponse};
use crate::models::analysis::StockRecommendation;
use crate::models::preferences::UserPreferences;
use crate::models::watchlist::{WatchlistAdd, WatchlistItem};

/// Screener page state.
///
/// `results` is the screen state machine: `NotLoaded` until the first submit,
/// then `Loading` → `Loaded` (possibly empty) | `Error`.
#[derive(Debug, Default)]
pub struct ScreenerView {
    pub form: ScreenerForm,
    sectors: Vec<String>,
    results: LoadState<Vec<Stock>>,
    filters_applied: BTreeMap<String, FilterValue>,
    has_searched: bool,
    analysis: Option<AnalysisPanel>,
    notifications: Vec<Notification>,
    lifecycle: Lifecycle,
}

/// What the screener shows, derived from its state.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerLayout {
    /// Investment philosophy panel, only before the first search
    pub show_philosophy: bool,
    /// Inline error, shown instead of the results panel
    pub error: Option<String>,
    pub results: Option<ResultsPanel>,
    /// Submit button disabled while a screen is in flight
    pub submit_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPanel {
    pub heading: String,
    /// "min dividend yield: 2, sector: Healthcare" or `None` when nothing applied
    pub filters_summary: Option<String>,
    pub rows: Vec<StockRow>,
    /// Shown when the search succeeded with zero matches
    pub empty_message: Option<&'static str>,
    pub loading: bool,
}

pub const NO_MATCHES_MESSAGE: &str = "No stocks match your criteria. Try adjusting your filters.";

impl ScreenerView {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn sectors(&self) -> &[String] {
        &self.sectors
    }

    pub fn results(&self) -> &LoadState<Vec<Stock>> {
        &self.results
    }

    /// Stocks currently displayed (empty unless the last search succeeded).
    pub fn stocks(&self) -> &[Stock] {
        self.results.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn filters_applied(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters_applied
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn error(&self) -> Option<&str> {
        self.results.error()
    }

    pub fn is_searching(&self) -> bool {
        self.results.is_loading()
    }

    pub fn analysis(&self) -> Option<&AnalysisPanel> {
        self.analysis.as_ref()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Hand pending notifications to the host, clearing them.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Discard in-flight results. A search that was running is rolled back so
    /// the next submit is accepted, and the analysis panel is dropped.
    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
        self.results.cancel();
        self.close_analysis();
    }

    // ── Sectors (on mount) ──────────────────────────────────────────

    pub fn begin_load_sectors(&mut self) -> Ticket {
        self.lifecycle.issue()
    }

    /// A failure here is logged and leaves the dropdown empty.
    pub fn finish_load_sectors(&mut self, ticket: Ticket, result: Result<Vec<String>, CoreError>) {
        if !self.lifecycle.accepts(ticket) {
            return;
        }
        match result {
            Ok(sectors) => self.sectors = sectors,
            Err(e) => {
                warn!("Failed to load sectors: {e}");
                self.sectors.clear();
            }
        }
    }

    pub async fn mount(&mut self, api: &ApiClient) {
        self.lifecycle.remount();
        let ticket = self.begin_load_sectors();
        let result = api.get_sectors().await;
        self.finish_load_sectors(ticket, result);
    }

    /// Pre-fill the form from a saved preferences profile.
    pub fn apply_preferences(&mut self, preferences: &UserPreferences) {
        self.form = ScreenerForm::from_filters(&preferences.filters());
    }

    // ── Search ──────────────────────────────────────────────────────

    /// Submit the form. `None` when a search is already running or the
    /// form was rejected locally (the rejection lands in the error state).
    pub fn begin_search(&mut self) -> Option<(Ticket, ScreeningFilters)> {
        if self.results.is_loading() {
            return None;
        }
        self.has_searched = true;
        match self.form.to_filters() {
            Ok(filters) => {
                self.results = LoadState::Loading;
                Some((self.lifecycle.issue(), filters))
            }
            Err(e) => {
                self.results = LoadState::Error(e.to_string());
                None
            }
        }
    }

    pub fn finish_search(&mut self, ticket: Ticket, result: Result<StockScreenResponse, CoreError>) {
        if !self.lifecycle.accepts(ticket) {
            return;
        }
        match result {
            Ok(response) => {
                info!("Screen returned {} stocks", response.stocks.len());
                self.filters_applied = response.filters_applied;
                self.results = LoadState::Loaded(response.stocks);
            }
            Err(e) => {
                self.results = LoadState::Error(e.to_string());
            }
        }
    }

    pub async fn search(&mut self, api: &ApiClient) {
        if let Some((ticket, filters)) = self.begin_search() {
            let result = api.screen_stocks(&filters).await;
            self.finish_search(ticket, result);
        }
    }

    // ── Watchlist (fire-and-forget) ─────────────────────────────────

    /// `None` for a blank symbol; the rejection becomes an error notification.
    pub fn begin_add_to_watchlist(&mut self, symbol: &str) -> Option<(Ticket, WatchlistAdd)> {
        match require_symbol(symbol) {
            Ok(symbol) => Some((self.lifecycle.issue(), WatchlistAdd::symbol(symbol))),
            Err(e) => {
                self.notifications.push(Notification::error(e.to_string()));
                None
            }
        }
    }

    /// Surfaces the outcome as a notification; the table is left alone.
    pub fn finish_add_to_watchlist(
        &mut self,
        ticket: Ticket,
        symbol: &str,
        result: Result<WatchlistItem, CoreError>,
    ) {
        if !self.lifecycle.accepts(ticket) {
            return;
        }
        let notification = match result {
            Ok(item) => Notification::success(format!("{} added to watchlist!", item.symbol)),
            Err(e) => {
                warn!("Failed to add {symbol} to watchlist: {e}");
                Notification::error(format!("Failed to add {symbol} to watchlist"))
            }
        };
        self.notifications.push(notification);
    }

    pub async fn add_to_watchlist(&mut self, api: &ApiClient, symbol: &str) {
        if let Some((ticket, item)) = self.begin_add_to_watchlist(symbol) {
            let result = api.add_to_watchlist(&item).await;
            self.finish_add_to_watchlist(ticket, &item.symbol, result);
        }
    }

    // ── Analysis panel ──────────────────────────────────────────────

    /// Open the panel for `symbol`, replacing any panel already open.
    pub fn open_analysis(&mut self, symbol: &str) {
        self.open_analysis_with(symbol, AnalysisSource::default());
    }

    pub fn open_analysis_with(&mut self, symbol: &str, source: AnalysisSource) {
        if let Some(old) = self.analysis.as_mut() {
            old.close();
        }
        self.analysis = Some(AnalysisPanel::with_source(symbol, source));
    }

    pub fn close_analysis(&mut self) {
        if let Some(mut panel) = self.analysis.take() {
            panel.close();
        }
    }

    /// Request or retry the open panel's analysis.
    pub fn begin_analysis(&mut self) -> Option<(Ticket, String, AnalysisSource)> {
        let panel = self.analysis.as_mut()?;
        let ticket = panel.begin_request().or_else(|| panel.begin_retry())?;
        Some((ticket, panel.symbol().to_string(), panel.source()))
    }

    /// Route a result to the open panel; stale results are dropped.
    pub fn finish_analysis(&mut self, ticket: Ticket, result: Result<StockRecommendation, CoreError>) {
        if let Some(panel) = self.analysis.as_mut() {
            let _ = panel.finish(ticket, result);
        }
    }

    pub async fn analyze(&mut self, api: &ApiClient) {
        if let Some((ticket, symbol, source)) = self.begin_analysis() {
            let result = AnalysisPanel::call(api, &symbol, source).await;
            self.finish_analysis(ticket, result);
        }
    }

    // ── Presentation ────────────────────────────────────────────────

    pub fn layout(&self) -> ScreenerLayout {
        let error = self.results.error().map(str::to_string);
        let results = (self.has_searched && error.is_none()).then(|| {
            let stocks = self.stocks();
            ResultsPanel {
                heading: format!("Results ({} stocks)", stocks.len()),
                filters_summary: summarize_filters(&self.filters_applied),
                rows: stock_rows(stocks),
                empty_message: (self.results.is_loaded() && stocks.is_empty())
                    .then_some(NO_MATCHES_MESSAGE),
                loading: self.results.is_loading(),
            }
        });

        ScreenerLayout {
            show_philosophy: !self.has_searched,
            error,
            results,
            submit_enabled: !self.results.is_loading(),
        }
    }
}

/// "max beta: 1, sector: Healthcare". Underscores in keys become spaces.
pub fn summarize_filters(filters: &BTreeMap<String, FilterValue>) -> Option<String> {
    if filters.is_empty() {
        return None;
    }
    let parts: Vec<String> = filters
        .iter()
        .map(|(key, value)| format!("{}: {value}", key.replace('_', " ")))
        .collect();
    Some(parts.join(", "))
}
