use async_trait::async_trait;

use super::request::{ApiRequest, ApiResponse};
use crate::errors::CoreError;

/// Seam between the typed client and the wire.
///
/// `HttpTransport` talks to the real backend; tests plug in recording mocks.
/// A transport only reports what the server said. Returning `Err` is reserved
/// for requests that never completed (connection refused, DNS, TLS, ...).
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    /// Human-readable name of this transport (for logs).
    fn name(&self) -> &str;

    /// Send one request and return the raw response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, CoreError>;
}
