//! Kline endpoint — daily, weekly and monthly bars for any Eastmoney market.

use crate::client::EastmoneyClient;
use crate::constants::{KLINE_FIELDS1, KLINE_FIELDS2, KLINE_PATH, KLINE_UT, secid};
use crate::error::{ApiErrorBody, QuoteError, Result};
use crate::types::enums::Market;
use crate::types::history::*;

impl EastmoneyClient {
    /// Retrieve historical bars for one security.
    ///
    /// A `null` data block (unknown code, empty range) yields an empty vector;
    /// a non-zero `rc` is reported as [`QuoteError::Api`].
    ///
    /// **Endpoint:** `GET /api/qt/stock/kline/get`
    pub async fn get_kline(&self, market: Market, req: &HistoryRequest) -> Result<Vec<HistoryRecord>> {
        let query = [
            ("secid", secid_for(market, &req.symbol)?),
            ("ut", KLINE_UT.to_owned()),
            ("fields1", KLINE_FIELDS1.to_owned()),
            ("fields2", KLINE_FIELDS2.to_owned()),
            ("klt", req.period.klt().to_string()),
            ("fqt", req.adjust.fqt().to_string()),
            ("beg", req.start_date.format("%Y%m%d").to_string()),
            ("end", req.end_date.format("%Y%m%d").to_string()),
            ("lmt", "1000000".to_owned()),
        ];

        let resp: KlineResponse = self.get(KLINE_PATH, &query).await?;
        if resp.rc != 0 {
            return Err(QuoteError::Api(ApiErrorBody {
                rc: resp.rc,
                rt: resp.rt,
                message: None,
            }));
        }

        let Some(data) = resp.data else {
            return Ok(Vec::new());
        };

        // Only A-share tables carry the security code column.
        let code = match market {
            Market::CnA => Some(data.code.as_str()),
            Market::Us | Market::Hk => None,
        };

        data.klines
            .iter()
            .map(|row| HistoryRecord::parse_kline_row(row, code))
            .collect()
    }
}

/// Map a caller-facing symbol onto an Eastmoney `secid` (`market.code`).
///
/// Symbols that already contain a `.` are taken as full secids, which is how
/// US listings outside NASDAQ (`106.BABA`, `107.SPY`) are addressed.
pub fn secid_for(market: Market, symbol: &str) -> Result<String> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(QuoteError::InvalidArgument("symbol must not be empty".into()));
    }
    if symbol.contains('.') {
        return Ok(symbol.to_owned());
    }

    let prefix = match market {
        Market::Us => secid::US_DEFAULT,
        Market::Hk => secid::HONG_KONG,
        Market::CnA if symbol.starts_with('6') || symbol.starts_with("900") => secid::SHANGHAI,
        Market::CnA => secid::SHENZHEN,
    };
    let code = match market {
        Market::Us => symbol.to_ascii_uppercase(),
        Market::Hk | Market::CnA => symbol.to_owned(),
    };
    Ok(format!("{prefix}.{code}"))
}
