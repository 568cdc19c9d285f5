use thiserror::Error;

/// Unified error type for the entire stratos-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    /// The backend answered with a non-2xx status. The message only ever
    /// uses the status text; the response body shape is not assumed.
    #[error("Failed to {operation}: {status_text}")]
    RequestFailed {
        operation: String,
        status: u16,
        status_text: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Encoding ────────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Local input ─────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// Build a `RequestFailed` from a raw status code.
    pub fn request_failed(operation: impl Into<String>, status: u16, status_text: impl Into<String>) -> Self {
        CoreError::RequestFailed {
            operation: operation.into(),
            status,
            status_text: status_text.into(),
        }
    }

    /// HTTP status of a failed request, if the failure came from the backend.
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether re-submitting the same action later could succeed.
    ///
    /// Transport failures, timeouts, throttling and 5xx answers are transient;
    /// other 4xx answers and local validation failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            CoreError::Network(_) => true,
            CoreError::RequestFailed { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            _ => false,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            return CoreError::Config(e.to_string());
        }
        CoreError::Network(e.without_url().to_string())
    }
}
