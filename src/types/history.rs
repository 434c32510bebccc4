#![allow(missing_docs)]
//! History types — validated requests, parsed records and the kline wire
//! envelope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::KLINE_ROW_FIELDS;
use crate::error::{QuoteError, Result};
use crate::types::enums::*;

// ---------------------------------------------------------------------------
// History Request
// ---------------------------------------------------------------------------

/// A validated history request.
///
/// Built by the handler from raw tool arguments once the period and both
/// dates have been checked. `start_date <= end_date` is deliberately not
/// enforced; the provider decides what an inverted range returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRequest {
    /// Market-specific code (`"105.AAPL"`, `"00700"`, `"600519"`).
    pub symbol: String,
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub adjust: Adjust,
}

// ---------------------------------------------------------------------------
// History Record
// ---------------------------------------------------------------------------

/// One bar of historical market data.
///
/// Fields the provider leaves blank (`"-"`) are carried as `NaN` and rendered
/// as empty table cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub date: NaiveDate,
    /// Security code; only A-share rows carry it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    /// Traded volume (shares, or lots for A-shares).
    pub volume: i64,
    /// Traded value in the market's currency.
    pub amount: f64,
    /// High-low range as a percentage of the previous close.
    pub amplitude: f64,
    pub change_pct: f64,
    pub change: f64,
    pub turnover_rate: f64,
}

impl HistoryRecord {
    /// Parse one comma-separated kline row.
    ///
    /// Layout: `date,open,close,high,low,volume,amount,amplitude,pct,change,turnover`.
    pub fn parse_kline_row(row: &str, code: Option<&str>) -> Result<Self> {
        let cols: Vec<&str> = row.split(',').map(str::trim).collect();
        if cols.len() < KLINE_ROW_FIELDS {
            return Err(QuoteError::MalformedRecord(format!(
                "expected {KLINE_ROW_FIELDS} fields, got {}: '{row}'",
                cols.len()
            )));
        }

        let date = parse_row_date(cols[0])
            .ok_or_else(|| QuoteError::MalformedRecord(format!("bad date in row '{row}'")))?;

        Ok(Self {
            date,
            code: code.map(str::to_owned),
            open: parse_float(cols[1], row)?,
            close: parse_float(cols[2], row)?,
            high: parse_float(cols[3], row)?,
            low: parse_float(cols[4], row)?,
            volume: parse_volume(cols[5], row)?,
            amount: parse_float(cols[6], row)?,
            amplitude: parse_float(cols[7], row)?,
            change_pct: parse_float(cols[8], row)?,
            change: parse_float(cols[9], row)?,
            turnover_rate: parse_float(cols[10], row)?,
        })
    }
}

/// Kline dates come as `YYYY-MM-DD`; some feeds append a time part.
fn parse_row_date(s: &str) -> Option<NaiveDate> {
    let day = s.split_whitespace().next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(day, "%Y%m%d"))
        .ok()
}

fn parse_float(s: &str, row: &str) -> Result<f64> {
    if s.is_empty() || s == "-" {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .map_err(|e| QuoteError::MalformedRecord(format!("'{s}' in row '{row}': {e}")))
}

fn parse_volume(s: &str, row: &str) -> Result<i64> {
    if s.is_empty() || s == "-" {
        return Ok(0);
    }
    // Some feeds send volume with a trailing ".0".
    match s.parse::<i64>() {
        Ok(v) => Ok(v),
        Err(_) => s
            .parse::<f64>()
            .map(|v| v.round() as i64)
            .map_err(|e| QuoteError::MalformedRecord(format!("'{s}' in row '{row}': {e}"))),
    }
}

// ---------------------------------------------------------------------------
// Kline Response
// ---------------------------------------------------------------------------

/// Envelope returned by `GET /api/qt/stock/kline/get`.
#[derive(Debug, Clone, Deserialize)]
pub struct KlineResponse {
    /// Return code; `0` on success.
    pub rc: i64,
    #[serde(default)]
    pub rt: Option<i64>,
    /// `null` when the security is unknown or the range is empty.
    #[serde(default)]
    pub data: Option<KlineData>,
}

/// Payload of a successful kline response.
#[derive(Debug, Clone, Deserialize)]
pub struct KlineData {
    pub code: String,
    pub market: i64,
    #[serde(default)]
    pub name: Option<String>,
    /// One comma-separated row per bar.
    #[serde(default)]
    pub klines: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_row() {
        let row = "2021-01-04,133.520,129.410,133.610,126.760,143301887,18720000000.000,5.18,-2.47,-3.280,0.86";
        let rec = HistoryRecord::parse_kline_row(row, None).unwrap();
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2021, 1, 4).unwrap());
        assert_eq!(rec.open, 133.52);
        assert_eq!(rec.close, 129.41);
        assert_eq!(rec.volume, 143_301_887);
        assert_eq!(rec.change_pct, -2.47);
        assert!(rec.code.is_none());
    }

    #[test]
    fn dash_becomes_nan() {
        let row = "2021-01-04,1,2,3,4,-,-,-,-,-,-";
        let rec = HistoryRecord::parse_kline_row(row, Some("600519")).unwrap();
        assert_eq!(rec.volume, 0);
        assert!(rec.turnover_rate.is_nan());
        assert_eq!(rec.code.as_deref(), Some("600519"));
    }

    #[test]
    fn short_row_is_malformed() {
        let err = HistoryRecord::parse_kline_row("2021-01-04,1,2", None).unwrap_err();
        assert!(matches!(err, QuoteError::MalformedRecord(_)));
    }

    #[test]
    fn bad_number_is_malformed() {
        let row = "2021-01-04,x,2,3,4,5,6,7,8,9,10";
        let err = HistoryRecord::parse_kline_row(row, None).unwrap_err();
        assert!(matches!(err, QuoteError::MalformedRecord(_)));
    }
}
