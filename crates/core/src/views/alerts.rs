use log::{debug, info, warn};

use super::forms::AlertForm;
use super::lifecycle::{Followup, Lifecycle, Ticket};
use super::load_state::LoadState;
use super::notifications::{Confirm, Notification};
use crate::api::ApiClient;
use crate::errors::CoreError;
use crate::models::alert::{Alert, AlertCheck, AlertCreate};

pub const DELETE_ALERT_PROMPT: &str = "Are you sure you want to delete this alert?";

pub const EMPTY_ALERTS_MESSAGE: &str = "No alerts set up yet.";

/// Price alerts card state.
///
/// The list always holds every alert (active or not) so that inactive ones
/// can be shown with their status.
#[derive(Debug, Default)]
pub struct AlertsView {
    pub form: AlertForm,
    show_add_form: bool,
    alerts: LoadState<Vec<Alert>>,
    last_checks: Vec<AlertCheck>,
    refreshing: bool,
    /// A mutation or check landed while a fetch was in flight
    refetch_pending: bool,
    checking: bool,
    submitting: bool,
    error: Option<String>,
    notifications: Vec<Notification>,
    lifecycle: Lifecycle,
}

impl AlertsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> &LoadState<Vec<Alert>> {
        &self.alerts
    }

    pub fn alert_list(&self) -> &[Alert] {
        self.alerts.data().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Results of the last "Check Now".
    pub fn last_checks(&self) -> &[AlertCheck] {
        &self.last_checks
    }

    /// Only the checks that fired.
    pub fn triggered_checks(&self) -> impl Iterator<Item = &AlertCheck> {
        self.last_checks.iter().filter(|c| c.should_trigger)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().or_else(|| self.alerts.error())
    }

    pub fn is_checking(&self) -> bool {
        self.checking
    }

    /// "Check Now" is disabled while anything in this card is in flight.
    pub fn can_check(&self) -> bool {
        !(self.checking || self.refreshing || self.alerts.is_loading())
    }

    pub fn is_add_form_visible(&self) -> bool {
        self.show_add_form
    }

    pub fn toggle_add_form(&mut self) {
        self.show_add_form = !self.show_add_form;
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
        self.alerts.cancel();
        self.refreshing = false;
        self.refetch_pending = false;
        self.checking = false;
        self.submitting = false;
    }

    // ── Fetch ───────────────────────────────────────────────────────

    pub fn begin_refresh(&mut self) -> Option<Ticket> {
        if self.refreshing || self.alerts.is_loading() {
            return None;
        }
        if self.alerts.is_loaded() {
            self.refreshing = true;
        } else {
            self.alerts = LoadState::Loading;
        }
        Some(self.lifecycle.issue())
    }

    /// Returns `Refetch` instead of applying the list when a mutation or
    /// check succeeded while this fetch was in flight.
    pub fn finish_refresh(&mut self, ticket: Ticket, result: Result<Vec<Alert>, CoreError>) -> Followup {
        if !self.lifecycle.accepts(ticket) {
            return Followup::None;
        }
        self.refreshing = false;
        if std::mem::take(&mut self.refetch_pending) {
            debug!("Dropping alerts fetched before the last change");
            self.alerts.cancel();
            return Followup::Refetch;
        }
        match result {
            Ok(alerts) => {
                self.alerts = LoadState::Loaded(alerts);
            }
            Err(e) => {
                warn!("Failed to load alerts: {e}");
                if self.alerts.is_loaded() {
                    self.error = Some(e.to_string());
                } else {
                    self.alerts = LoadState::Error(e.to_string());
                }
            }
        }
        Followup::None
    }

    pub async fn refresh(&mut self, api: &ApiClient) {
        while let Some(ticket) = self.begin_refresh() {
            let result = api.get_alerts(false).await;
            if self.finish_refresh(ticket, result) == Followup::None {
                break;
            }
        }
    }

    pub async fn mount(&mut self, api: &ApiClient) {
        self.lifecycle.remount();
        self.refresh(api).await;
    }

    // ── Check Now ───────────────────────────────────────────────────

    pub fn begin_check(&mut self) -> Option<Ticket> {
        if !self.can_check() {
            return None;
        }
        self.checking = true;
        self.error = None;
        Some(self.lifecycle.issue())
    }

    /// Store the results, notify for every alert that fired, and ask for a
    /// re-fetch so the list reflects any trigger recorded server-side.
    pub fn finish_check(&mut self, ticket: Ticket, result: Result<Vec<AlertCheck>, CoreError>) -> Followup {
        if !self.lifecycle.accepts(ticket) {
            return Followup::None;
        }
        self.checking = false;
        match result {
            Ok(checks) => {
                let fired: Vec<Notification> = checks
                    .iter()
                    .filter(|c| c.should_trigger)
                    .map(|c| Notification::info(c.message.clone()))
                    .collect();
                info!("Checked {} alerts, {} triggered", checks.len(), fired.len());
                self.notifications.extend(fired);
                self.last_checks = checks;
                self.refetch()
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Followup::None
            }
        }
    }

    pub async fn check_now(&mut self, api: &ApiClient) {
        if let Some(ticket) = self.begin_check() {
            let result = api.check_alerts().await;
            if self.finish_check(ticket, result) == Followup::Refetch {
                self.refresh(api).await;
            }
        }
    }

    // ── Create ──────────────────────────────────────────────────────

    pub fn begin_create(&mut self) -> Option<(Ticket, AlertCreate)> {
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

    pub fn finish_create(&mut self, ticket: Ticket, result: Result<Alert, CoreError>) -> Followup {
        self.finish_mutation(ticket, result, "create alert", true)
    }

    pub async fn create_alert(&mut self, api: &ApiClient) {
        if let Some((ticket, create)) = self.begin_create() {
            let result = api.create_alert(&create).await;
            if self.finish_create(ticket, result) == Followup::Refetch {
                self.refresh(api).await;
            }
        }
    }

    // ── Deactivate ──────────────────────────────────────────────────

    pub fn begin_deactivate(&mut self, alert_id: i64) -> Option<(Ticket, i64)> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some((self.lifecycle.issue(), alert_id))
    }

    pub fn finish_deactivate(&mut self, ticket: Ticket, result: Result<Alert, CoreError>) -> Followup {
        self.finish_mutation(ticket, result, "deactivate alert", false)
    }

    pub async fn deactivate_alert(&mut self, api: &ApiClient, alert_id: i64) {
        if let Some((ticket, id)) = self.begin_deactivate(alert_id) {
            let result = api.deactivate_alert(id).await;
            if self.finish_deactivate(ticket, result) == Followup::Refetch {
                self.refresh(api).await;
            }
        }
    }

    // ── Delete ──────────────────────────────────────────────────────

    pub fn begin_delete(&mut self, alert_id: i64, confirm: &dyn Confirm) -> Option<(Ticket, i64)> {
        if self.submitting || !confirm.confirm(DELETE_ALERT_PROMPT) {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some((self.lifecycle.issue(), alert_id))
    }

    pub fn finish_delete(&mut self, ticket: Ticket, result: Result<(), CoreError>) -> Followup {
        self.finish_mutation(ticket, result, "delete alert", false)
    }

    pub async fn delete_alert(&mut self, api: &ApiClient, alert_id: i64, confirm: &dyn Confirm) {
        if let Some((ticket, id)) = self.begin_delete(alert_id, confirm) {
            let result = api.delete_alert(id).await;
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
                self.refetch()
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Followup::None
            }
        }
    }

    /// Ask for a re-fetch, or queue one behind the fetch already running.
    fn refetch(&mut self) -> Followup {
        if self.refreshing || self.alerts.is_loading() {
            self.refetch_pending = true;
        }
        Followup::Refetch
    }
}
