//! Constants for the Eastmoney kline API and the MCP server surface.
//!
//! These are used internally by [`EastmoneyClient`](crate::client::EastmoneyClient)
//! and the server, but are also exported for advanced usage.

// ---------------------------------------------------------------------------
// Base URLs
// ---------------------------------------------------------------------------

/// Base URL for the Eastmoney historical quote service.
pub const API_BASE_URL: &str = "https://push2his.eastmoney.com";

/// Path of the kline (candle) endpoint, relative to [`API_BASE_URL`].
pub const KLINE_PATH: &str = "/api/qt/stock/kline/get";

// ---------------------------------------------------------------------------
// Kline query parameters
// ---------------------------------------------------------------------------

/// Public web token accepted by the kline endpoint.
pub const KLINE_UT: &str = "7eea3edcaed734bea9cbfc24409ed989";

/// Header fields requested alongside the klines.
pub const KLINE_FIELDS1: &str = "f1,f2,f3,f4,f5,f6";

/// Per-row fields: date, open, close, high, low, volume, amount, amplitude,
/// change percent, change amount, turnover rate.
pub const KLINE_FIELDS2: &str = "f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61";

/// Number of comma-separated values in one kline row.
pub const KLINE_ROW_FIELDS: usize = 11;

/// Eastmoney market prefixes used to build a `secid`.
pub mod secid {
    /// Shanghai Stock Exchange.
    pub const SHANGHAI: &str = "1";
    /// Shenzhen and Beijing exchanges.
    pub const SHENZHEN: &str = "0";
    /// Hong Kong main board and GEM.
    pub const HONG_KONG: &str = "116";
    /// Default US prefix (NASDAQ) for bare tickers.
    pub const US_DEFAULT: &str = "105";
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// MCP protocol revision advertised in `initialize`.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "Eastmoney-MCP-Server";

/// Default bind host for the TCP transport.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port for the TCP transport.
pub const DEFAULT_PORT: u16 = 8005;

/// Default directory for the log file.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// File name of the server log inside the log directory.
pub const LOG_FILE_NAME: &str = "eastmoney_mcp.log";

/// Attribution line appended to every report.
pub const DATA_SOURCE: &str = "*数据来源：东方财富网*";
