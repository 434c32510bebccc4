//! Core HTTP client for the Eastmoney quote service.
//!
//! The [`EastmoneyClient`] struct wraps [`reqwest::Client`] with the headers
//! the public web endpoints expect and provides a typed `get` method.
//!
//! Endpoint methods are added to `EastmoneyClient` via `impl` blocks in the
//! [`crate::api`] module.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::constants::API_BASE_URL;
use crate::error::{ApiErrorBody, QuoteError, Result};

/// Per-request timeout applied by the underlying `reqwest::Client`.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Core HTTP client for the Eastmoney quote service.
///
/// Cheap to clone; clones share the connection pool.
///
/// # Example
///
/// ```no_run
/// use eastmoney_mcp::client::EastmoneyClient;
///
/// # fn main() -> eastmoney_mcp::error::Result<()> {
/// let client = EastmoneyClient::new()?;
/// assert_eq!(client.base_url(), "https://push2his.eastmoney.com");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EastmoneyClient {
    http: reqwest::Client,
    /// Base URL for requests (defaults to [`API_BASE_URL`]).
    base_url: String,
}

impl EastmoneyClient {
    /// Create a client pointing at the public Eastmoney host.
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client pointing at a custom base URL.
    ///
    /// Useful for testing against a mirror or mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        // Reject garbage early rather than on the first tool call.
        Url::parse(&base_url)?;

        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Returns a reference to the underlying `reqwest::Client`.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Generic HTTP helpers
    // -----------------------------------------------------------------------

    /// Perform a GET request with query parameters and deserialize the JSON
    /// response.
    pub async fn get<R: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<R> {
        let url = self.url(path, query)?;
        tracing::debug!(%url, "GET");

        let resp = self.http.get(url).send().await?;

        self.handle_response(resp).await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Build the full URL from a path segment and query pairs.
    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let joined = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        let mut url = Url::parse(&joined)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Default headers applied to every request.
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (X11; Linux x86_64) eastmoney-mcp"),
        );
        headers.insert(
            header::REFERER,
            HeaderValue::from_static("https://quote.eastmoney.com/"),
        );
        headers
    }

    /// Read a response, returning either the deserialized body or a
    /// `QuoteError`.
    async fn handle_response<R: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<R> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if status.is_success() {
            serde_json::from_slice(&bytes).map_err(QuoteError::Json)
        } else {
            let body = String::from_utf8_lossy(&bytes);
            Err(self.parse_error_body(status, &body))
        }
    }

    /// Try to parse an Eastmoney error envelope; fall back to a raw HTTP
    /// status error.
    pub(crate) fn parse_error_body(&self, status: reqwest::StatusCode, body: &str) -> QuoteError {
        if let Ok(api_err) = serde_json::from_str::<ApiErrorBody>(body) {
            if api_err.rc != 0 {
                return QuoteError::Api(api_err);
            }
        }
        QuoteError::HttpStatus {
            status,
            body: body.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = EastmoneyClient::with_base_url("http://127.0.0.1:9/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = EastmoneyClient::with_base_url("not a url").unwrap_err();
        assert!(matches!(err, QuoteError::Url(_)));
    }

    #[test]
    fn url_encodes_query_pairs() {
        let client = EastmoneyClient::with_base_url("http://example.com").unwrap();
        let url = client
            .url("api/x", &[("secid", "105.AAPL".to_owned()), ("beg", "20210101".to_owned())])
            .unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/x?secid=105.AAPL&beg=20210101");
    }

    #[test]
    fn error_body_with_rc_maps_to_api() {
        let client = EastmoneyClient::with_base_url("http://example.com").unwrap();
        let err = client.parse_error_body(reqwest::StatusCode::BAD_REQUEST, r#"{"rc":102}"#);
        assert!(matches!(err, QuoteError::Api(ref b) if b.rc == 102));

        let err = client.parse_error_body(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(err, QuoteError::HttpStatus { .. }));
    }
}
