//! Per-market parameters for the shared history handler.
//!
//! The three tools run the same validate → fetch → format pipeline; a
//! [`MarketConfig`] carries everything that differs between them.

use std::fmt;
use std::sync::Arc;

use crate::client::EastmoneyClient;
use crate::provider::{EastmoneyProvider, HistoryProvider};
use crate::types::enums::Market;

/// Static description of one market plus its fetch capability.
#[derive(Clone)]
pub struct MarketConfig {
    pub market: Market,
    /// Tool name exposed over MCP.
    pub tool_name: &'static str,
    /// Currency label printed in the report header.
    pub currency: &'static str,
    /// Header of the date column in the rendered table.
    pub date_column: &'static str,
    /// Start date used when the caller omits one (`YYYYMMDD`).
    pub default_start: &'static str,
    /// End date used when the caller omits one (`YYYYMMDD`).
    pub default_end: &'static str,
    /// Example symbol quoted in the tool description.
    pub symbol_hint: &'static str,
    pub provider: Arc<dyn HistoryProvider>,
}

impl MarketConfig {
    /// US equities, prices in USD.
    pub fn us(provider: Arc<dyn HistoryProvider>) -> Self {
        Self {
            market: Market::Us,
            tool_name: "stock_us_hist",
            currency: "美元 (USD)",
            date_column: "日期",
            default_start: "19700101",
            default_end: "22220101",
            symbol_hint: "美股代码，例如 '105.AAPL'、'106.BABA'，纯代码默认按纳斯达克 (105) 处理",
            provider,
        }
    }

    /// Hong Kong equities, prices in HKD.
    pub fn hk(provider: Arc<dyn HistoryProvider>) -> Self {
        Self {
            market: Market::Hk,
            tool_name: "stock_hk_hist",
            currency: "港元 (HKD)",
            date_column: "日期",
            default_start: "19700101",
            default_end: "22220101",
            symbol_hint: "港股代码，例如 '00593' 或 '08367'",
            provider,
        }
    }

    /// China A-shares, prices in CNY.
    pub fn cn_a(provider: Arc<dyn HistoryProvider>) -> Self {
        Self {
            market: Market::CnA,
            tool_name: "stock_zh_a_hist",
            currency: "人民币 (CNY)",
            date_column: "日期",
            default_start: "19901219",
            default_end: "20500101",
            symbol_hint: "A股代码，例如 '600519' 或 '000001'",
            provider,
        }
    }

    /// All three markets bound to one shared Eastmoney client.
    pub fn eastmoney_all(client: &EastmoneyClient) -> Vec<Self> {
        [
            (Market::Us, Self::us as fn(Arc<dyn HistoryProvider>) -> Self),
            (Market::Hk, Self::hk),
            (Market::CnA, Self::cn_a),
        ]
        .into_iter()
        .map(|(market, build)| build(Arc::new(EastmoneyProvider::new(client.clone(), market))))
        .collect()
    }

    /// Report title, e.g. `港股历史行情数据`.
    pub fn title(&self) -> String {
        format!("{}历史行情数据", self.market.display_name())
    }
}

impl fmt::Debug for MarketConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketConfig")
            .field("market", &self.market)
            .field("tool_name", &self.tool_name)
            .field("currency", &self.currency)
            .field("default_start", &self.default_start)
            .field("default_end", &self.default_end)
            .finish_non_exhaustive()
    }
}
