//! Error types for the `eastmoney-mcp` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, QuoteError>`.
//!
//! [`QuoteError`] covers:
//! - **API errors** — Eastmoney envelopes carrying a non-zero `rc`
//! - **HTTP status errors** — Unexpected status codes with response body
//! - **HTTP transport errors** — Network, TLS, timeout failures
//! - **JSON errors** — Deserialization failures
//! - **Malformed records** — Kline rows that do not match the expected layout
//! - **Configuration errors** — Bad environment values at startup
//!
//! These never reach a tool caller directly: the history handler folds every
//! `QuoteError` into an `API_ERROR` [`ErrorResult`](crate::handler::ErrorResult).

use std::fmt;

/// Error envelope returned by the Eastmoney kline endpoint.
///
/// A healthy response has `rc == 0`; anything else is a provider-side
/// rejection.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiErrorBody {
    /// Eastmoney return code (`0` means success).
    pub rc: i64,
    /// Server timing tag, echoed for diagnostics.
    #[serde(default)]
    pub rt: Option<i64>,
    /// Optional message some gateways attach to failures.
    #[serde(default)]
    pub message: Option<String>,
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rc={} rt={}: {}",
            self.rc,
            self.rt.map(|rt| rt.to_string()).as_deref().unwrap_or("-"),
            self.message.as_deref().unwrap_or("No message"),
        )
    }
}

/// All possible errors produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    /// An error envelope returned by the Eastmoney API.
    #[error("API error: {0}")]
    Api(ApiErrorBody),

    /// The server returned an unexpected HTTP status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body text.
        body: String,
    },

    /// A network or transport-level error from `reqwest`.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to (de)serialize a JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error building or parsing a URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Reading from or writing to a transport or log file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A kline row could not be parsed into a record.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration value could not be used.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QuoteError>;
