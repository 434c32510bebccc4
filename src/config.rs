//! Server configuration read from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `HOST` | `127.0.0.1` | Bind host for the SSE transport |
//! | `PORT` | `8005` | Bind port for the SSE transport |
//! | `TRANSPORT` | `sse` | `sse` or `stdio` |
//! | `LOG_DIR` | `logs` | Directory of the server log file |
//! | `EASTMONEY_BASE_URL` | `https://push2his.eastmoney.com` | Quote service host |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{API_BASE_URL, DEFAULT_HOST, DEFAULT_LOG_DIR, DEFAULT_PORT, SERVER_NAME};
use crate::error::{QuoteError, Result};

/// How the server talks to its client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Newline-delimited JSON-RPC over stdin/stdout.
    Stdio,
    /// MCP HTTP+SSE: `GET /sse` event stream plus `POST /messages`.
    Sse,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stdio => "stdio",
            Self::Sse => "sse",
        })
    }
}

impl FromStr for Transport {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "sse" => Ok(Self::Sse),
            other => Err(QuoteError::Config(format!(
                "unsupported TRANSPORT '{other}', expected 'sse' or 'stdio'"
            ))),
        }
    }
}

/// Startup configuration of the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub transport: Transport,
    pub server_name: String,
    pub log_dir: PathBuf,
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            transport: Transport::Sse,
            server_name: SERVER_NAME.to_owned(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            base_url: API_BASE_URL.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Unset or blank
    /// keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host.trim().to_owned();
        }
        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| QuoteError::Config(format!("invalid PORT '{port}': {e}")))?;
        }
        if let Some(transport) = get("TRANSPORT") {
            config.transport = transport.parse()?;
        }
        if let Some(dir) = get("LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(url) = get("EASTMONEY_BASE_URL") {
            config.base_url = url.trim().to_owned();
        }
        Ok(config)
    }

    /// `host:port` string for the HTTP listener.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
