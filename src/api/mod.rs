//! REST endpoint implementations.
//!
//! Each sub-module adds high-level `async` methods to
//! [`EastmoneyClient`](crate::client::EastmoneyClient) via `impl` blocks.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use eastmoney_mcp::EastmoneyClient;
//! use eastmoney_mcp::types::{Adjust, Market, Period};
//! use eastmoney_mcp::types::history::HistoryRequest;
//!
//! # #[tokio::main]
//! # async fn main() -> eastmoney_mcp::Result<()> {
//! let client = EastmoneyClient::new()?;
//! let req = HistoryRequest {
//!     symbol: "00700".into(),
//!     period: Period::Daily,
//!     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     end_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     adjust: Adjust::Forward,
//! };
//! let bars = client.get_kline(Market::Hk, &req).await?;
//! # Ok(())
//! # }
//! ```

pub mod kline;
