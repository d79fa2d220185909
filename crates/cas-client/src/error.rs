//! Anchor service client error types.

use std::time::Duration;

/// Failure of a single request/response round trip.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP transport error (connection refused, reset, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),
    /// The service answered with a non-2xx status.
    #[error("anchor service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The request did not complete within its timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// The response body could not be parsed as JSON.
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),
    /// The request was aborted by the client's cancellation token.
    #[error("request aborted")]
    Aborted,
    /// Failure reported by an injected transport.
    #[error("{0}")]
    Other(String),
}

/// A structural violation found while validating a payload.
///
/// `path` locates the offending value in the response schema, e.g.
/// `/(SupportedChainsResponse)/supportedChains(supportedChains)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value {value} supplied to {path}")]
pub struct SchemaViolation {
    pub path: String,
    pub value: String,
}

/// A response that does not satisfy the anchor service contract.
///
/// Messages embed the literal serialized payload so contract drift can be
/// diagnosed without reproducing the request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The supported-chains payload is absent, empty, or has more than one entry.
    #[error(
        "SupportedChains response : {payload} does not contain contain the field <supportedChains> or is of size more than 1{}",
        cause_suffix(.cause)
    )]
    SupportedChains {
        payload: String,
        cause: Option<SchemaViolation>,
    },
    /// The payload is not a valid anchor request record.
    #[error("{operation} response : {payload} is not a valid anchor request: {reason}")]
    AnchorRequest {
        operation: &'static str,
        payload: String,
        reason: String,
    },
}

fn cause_suffix(cause: &Option<SchemaViolation>) -> String {
    cause.as_ref().map(|c| format!(": {c}")).unwrap_or_default()
}

/// Errors from anchor service client operations.
#[derive(Debug, thiserror::Error)]
pub enum CasError {
    /// Transport-level failure. Retried only by retrying operations.
    #[error("{operation} failed: {source}")]
    Network {
        operation: &'static str,
        source: TransportError,
    },
    /// The service response failed validation. Never retried.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The client was closed while the operation was pending.
    #[error("{operation} cancelled: anchor service client is closed")]
    Cancelled { operation: &'static str },
    /// The retry budget ran out before any attempt succeeded.
    #[error("{operation} timed out after {attempts} attempt(s) within {budget:?}")]
    Timeout {
        operation: &'static str,
        budget: Duration,
        attempts: u32,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl CasError {
    /// Whether a retrying operation should try again after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Whether this error came from closing the client.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
