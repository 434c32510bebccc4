//! # eastmoney-mcp
//!
//! An MCP tool server that serves historical quotes for US, Hong Kong and
//! China A-share equities from Eastmoney, rendered as Markdown reports.
//!
//! The three tools (`stock_us_hist`, `stock_hk_hist`, `stock_zh_a_hist`) share
//! one [`HistoryQueryHandler`] parameterized by a [`MarketConfig`]:
//! validate the request, fetch through an injected [`HistoryProvider`],
//! render a [`HistoryReport`] or a structured [`ErrorResult`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use eastmoney_mcp::{EastmoneyClient, HistoryArgs, HistoryQueryHandler, MarketConfig};
//!
//! #[tokio::main]
//! async fn main() -> eastmoney_mcp::error::Result<()> {
//!     let client = EastmoneyClient::new()?;
//!     let [us, ..] = <[MarketConfig; 3]>::try_from(MarketConfig::eastmoney_all(&client))
//!         .expect("three markets");
//!     let handler = HistoryQueryHandler::new(us);
//!     let text = handler
//!         .handle_to_string(HistoryArgs::new("105.AAPL", "daily", "20240101", "20240201", "qfq"))
//!         .await;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
#[cfg(feature = "cli")]
pub mod logging;
pub mod market;
pub mod provider;
pub mod report;
pub mod server;
pub mod types;

/// Re-export the main client type at crate root for convenience.
pub use client::EastmoneyClient;
/// Re-export the error type and Result alias.
pub use error::{QuoteError, Result};
pub use handler::{ErrorCode, ErrorResult, HistoryArgs, HistoryQueryHandler};
pub use market::MarketConfig;
pub use provider::{EastmoneyProvider, HistoryProvider};
pub use report::HistoryReport;
