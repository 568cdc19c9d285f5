use log::{debug, info, warn};

use super::forms::{validate_holding_update, HoldingForm};
use super::lifecycle::{Followup, Lifecycle, Ticket};
use super::load_state::LoadState;
use super::notifications::Confirm;
use crate::api::ApiClient;
use crate::errors::CoreError;
use crate::models::portfolio::{
    PortfolioHolding, PortfolioHoldingCreate, PortfolioHoldingUpdate, PortfolioSummary,
};

pub const REMOVE_HOLDING_PROMPT: &str = "Are you sure you want to remove this holding?";

/// Portfolio card state.
///
/// The summary is only ever replaced by a fresh backend response; after any
/// successful mutation the container asks for a re-fetch instead of patching
/// totals locally. While a re-fetch runs, the previous summary stays visible.
#[derive(Debug, Default)]
pub struct PortfolioView {
    pub form: HoldingForm,
    show_add_form: bool,
    summary: LoadState<PortfolioSummary>,
    refreshing: bool,
    /// A mutation landed while a fetch was in flight
    refetch_pending: bool,
    submitting: bool,
    /// Inline error from the last failed operation
    error: Option<String>,
    lifecycle: Lifecycle,
}

/// Mutually exclusive render branches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PortfolioDisplay<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Holdings(&'a PortfolioSummary),
}

pub const EMPTY_PORTFOLIO_MESSAGE: &str = "No holdings in your portfolio yet.";

impl PortfolioView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> &LoadState<PortfolioSummary> {
        &self.summary
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.refreshing || self.submitting || self.summary.is_loading()
    }

    pub fn is_add_form_visible(&self) -> bool {
        self.show_add_form
    }

    pub fn toggle_add_form(&mut self) {
        self.show_add_form = !self.show_add_form;
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
        self.summary.cancel();
        self.refreshing = false;
        self.refetch_pending = false;
        self.submitting = false;
    }

    /// Which branch to render. The empty state is distinct from loading and
    /// error; an inline mutation error is shown alongside loaded data.
    pub fn display(&self) -> PortfolioDisplay<'_> {
        match &self.summary {
            LoadState::NotLoaded | LoadState::Loading => PortfolioDisplay::Loading,
            LoadState::Error(message) => PortfolioDisplay::Error(message),
            LoadState::Loaded(summary) if summary.is_empty() => PortfolioDisplay::Empty,
            LoadState::Loaded(summary) => PortfolioDisplay::Holdings(summary),
        }
    }

    // ── Fetch ───────────────────────────────────────────────────────

    /// `None` while a fetch is already in flight. After a mutation that case
    /// is covered: the running fetch's `finish_refresh` asks for another.
    pub fn begin_refresh(&mut self) -> Option<Ticket> {
        if self.refreshing || self.summary.is_loading() {
            return None;
        }
        self.error = None;
        if self.summary.is_loaded() {
            self.refreshing = true;
        } else {
            self.summary = LoadState::Loading;
        }
        Some(self.lifecycle.issue())
    }

    /// Apply a fetched summary. Returns `Refetch` instead when a mutation
    /// succeeded while this fetch was in flight: its answer predates the
    /// change, so it is dropped and the previous summary stays visible.
    pub fn finish_refresh(&mut self, ticket: Ticket, result: Result<PortfolioSummary, CoreError>) -> Followup {
        if !self.lifecycle.accepts(ticket) {
            return Followup::None;
        }
        self.refreshing = false;
        if std::mem::take(&mut self.refetch_pending) {
            debug!("Dropping portfolio fetched before the last change");
            self.summary.cancel();
            return Followup::Refetch;
        }
        match result {
            Ok(summary) => self.summary = LoadState::Loaded(summary),
            Err(e) => {
                warn!("Failed to load portfolio: {e}");
                if self.summary.is_loaded() {
                    self.error = Some(e.to_string());
                } else {
                    self.summary = LoadState::Error(e.to_string());
                }
            }
        }
        Followup::None
    }

    pub async fn refresh(&mut self, api: &ApiClient) {
        while let Some(ticket) = self.begin_refresh() {
            let result = api.get_portfolio().await;
            if self.finish_refresh(ticket, result) == Followup::None {
                break;
            }
        }
    }

    pub async fn mount(&mut self, api: &ApiClient) {
        self.lifecycle.remount();
        self.refresh(api).await;
    }

    // ── Add ─────────────────────────────────────────────────────────

    /// Validate the form. Invalid input never produces a request.
    pub fn begin_add(&mut self) -> Option<(Ticket, PortfolioHoldingCreate)> {
        if self.submitting {
            return None;
        }
        match self.form.validate() {
            Ok(create) => {
                self.submitting = true;
                self.error = None;
                Some((self.lifecycle.issue(), create))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn finish_add(&mut self, ticket: Ticket, result: Result<PortfolioHolding, CoreError>) -> Followup {
        self.finish_mutation(ticket, result, "add holding", true)
    }

    pub async fn add_holding(&mut self, api: &ApiClient) {
        if let Some((ticket, create)) = self.begin_add() {
            let result = api.add_holding(&create).await;
            if self.finish_add(ticket, result) == Followup::Refetch {
                self.refresh(api).await;
            }
        }
    }

    // ── Update ──────────────────────────────────────────────────────

    pub fn begin_update(&mut self, update: &PortfolioHoldingUpdate) -> Option<(Ticket, PortfolioHoldingUpdate)> {
        if self.submitting {
            return None;
        }
        match validate_holding_update(update) {
            Ok(update) => {
                self.submitting = true;
                self.error = None;
                Some((self.lifecycle.issue(), update))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn finish_update(&mut self, ticket: Ticket, result: Result<PortfolioHolding, CoreError>) -> Followup {
        self.finish_mutation(ticket, result, "update holding", false)
    }

    pub async fn update_holding(&mut self, api: &ApiClient, holding_id: i64, update: &PortfolioHoldingUpdate) {
        if let Some((ticket, update)) = self.begin_update(update) {
            let result = api.update_holding(holding_id, &update).await;
            if self.finish_update(ticket, result) == Followup::Refetch {
                self.refresh(api).await;
            }
        }
    }

    // ── Delete ──────────────────────────────────────────────────────

    /// Ask for confirmation first; a declined prompt sends nothing.
    pub fn begin_delete(&mut self, holding_id: i64, confirm: &dyn Confirm) -> Option<(Ticket, i64)> {
        if self.submitting || !confirm.confirm(REMOVE_HOLDING_PROMPT) {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some((self.lifecycle.issue(), holding_id))
    }

    pub fn finish_delete(&mut self, ticket: Ticket, result: Result<(), CoreError>) -> Followup {
        self.finish_mutation(ticket, result, "delete holding", false)
    }

    pub async fn delete_holding(&mut self, api: &ApiClient, holding_id: i64, confirm: &dyn Confirm) {
        if let Some((ticket, id)) = self.begin_delete(holding_id, confirm) {
            let result = api.delete_holding(id).await;
            if self.finish_delete(ticket, result) == Followup::Refetch {
                self.refresh(api).await;
            }
        }
    }

    fn finish_mutation<T>(
        &mut self,
        ticket: Ticket,
        result: Result<T, CoreError>,
        operation: &str,
        reset_form: bool,
    ) -> Followup {
        if !self.lifecycle.accepts(ticket) {
            return Followup::None;
        }
        self.submitting = false;
        match result {
            Ok(_) => {
                info!("{operation} succeeded");
                if reset_form {
                    self.form.clear();
                    self.show_add_form = false;
                }
                if self.refreshing || self.summary.is_loading() {
                    self.refetch_pending = true;
                }
                Followup::Refetch
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Followup::None
            }
        }
    }
}
