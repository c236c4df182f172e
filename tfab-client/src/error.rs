//! Client error types.

use thiserror::Error;

/// Errors surfaced by controller calls.
///
/// A missing object is not an error: resolution returns `Ok(None)` for 404.
#[derive(Debug, Error)]
pub enum Error {
    /// The controller rejected the call for credential/permission reasons.
    #[error("authorization rejected by controller: {0}")]
    Authorization(String),

    /// Any other non-success response; the body is the diagnostic.
    #[error("controller returned {status}: {body}")]
    Remote { status: u16, body: String },

    /// A dependency the caller referenced does not exist. Raised before any
    /// mutating call is attempted.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The per-request timeout elapsed.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Result type for controller operations.
pub type Result<T> = std::result::Result<T, Error>;
