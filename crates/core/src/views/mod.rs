//! View-state containers.
//!
//! Each container owns its own state machine and nothing else; there is no
//! shared store. Operations come in two halves so a host event loop can
//! spawn the network call and come back later:
//!
//! - `begin_*` validates input, moves the state to loading and hands back a
//!   [`Ticket`] plus the payload to send (or `None` when nothing should be
//!   sent: control disabled, validation failed, confirmation declined);
//! - `finish_*` applies the result, unless the ticket went stale because the
//!   container was unmounted in between.
//!
//! The async methods (`search`, `refresh`, `add_holding`, ...) chain both
//! halves around an [`ApiClient`](crate::api::ApiClient) call for hosts that
//! simply await.

pub mod alerts;
pub mod analysis;
pub mod forms;
pub mod lifecycle;
pub mod load_state;
pub mod notifications;
pub mod portfolio;
pub mod screener;

pub use lifecycle::{Followup, Lifecycle, Ticket};
pub use load_state::LoadState;
pub use notifications::{Confirm, Notification, NotificationLevel};
