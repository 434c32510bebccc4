//! The validate → fetch → format pipeline shared by all history tools.
//!
//! [`HistoryQueryHandler`] is parameterized by a [`MarketConfig`]; the three
//! tools differ only in the config they are built with. Every failure is
//! folded into an [`ErrorResult`] at this boundary, so a tool call always
//! produces a string for the caller.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::market::MarketConfig;
use crate::report::HistoryReport;
use crate::types::enums::{Adjust, Period};
use crate::types::history::HistoryRequest;

// ---------------------------------------------------------------------------
// Raw arguments
// ---------------------------------------------------------------------------

/// Unvalidated tool arguments. Omitted fields fall back to the market's
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryArgs {
    /// Ticker as the market writes it, e.g. `AAPL`, `00700`, `000001`.
    pub symbol: String,
    /// `daily`, `weekly` or `monthly`; defaults to `daily`.
    #[serde(default)]
    pub period: Option<String>,
    /// First day, `YYYYMMDD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day, `YYYYMMDD`.
    #[serde(default)]
    pub end_date: Option<String>,
    /// `""` (none), `qfq` (forward) or `hfq` (backward).
    #[serde(default)]
    pub adjust: Option<String>,
}

impl HistoryArgs {
    /// Arguments with every optional field spelled out.
    pub fn new(
        symbol: impl Into<String>,
        period: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        adjust: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            period: Some(period.into()),
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
            adjust: Some(adjust.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Error result
// ---------------------------------------------------------------------------

/// Caller-facing failure category. Callers branch on this, never on the
/// message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// `period` is not one of the supported values.
    InvalidPeriod,
    /// A date is not a real `YYYYMMDD` day.
    InvalidDateFormat,
    /// The provider answered with no rows.
    NoDataFound,
    /// The provider failed or rejected the request.
    ApiError,
}

impl ErrorCode {
    /// Wire name, e.g. `NO_DATA_FOUND`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPeriod => "INVALID_PERIOD",
            Self::InvalidDateFormat => "INVALID_DATE_FORMAT",
            Self::NoDataFound => "NO_DATA_FOUND",
            Self::ApiError => "API_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure returned in place of a report.
///
/// Serializes as `{"error": "...", "code": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("[{code}] {error}")]
pub struct ErrorResult {
    /// Human-readable message; not stable.
    pub error: String,
    /// Stable category.
    pub code: ErrorCode,
}

impl ErrorResult {
    /// Failure with `code` and a human-readable message.
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }

    /// JSON form sent back to tool callers. Non-ASCII text is kept as-is.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"error":"internal serialization failure","code":"{}"}}"#, self.code)
        })
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// History handler for one market.
///
/// Holds no per-call state; a single instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct HistoryQueryHandler {
    config: MarketConfig,
}

impl HistoryQueryHandler {
    /// Handler serving the market described by `config`.
    pub fn new(config: MarketConfig) -> Self {
        Self { config }
    }

    /// Market this handler serves.
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Validate `args`, fetch from the market's provider and render a report.
    pub async fn handle(&self, args: HistoryArgs) -> Result<HistoryReport, ErrorResult> {
        let market = self.config.market;
        let req = self.validate(&args).inspect_err(|e| {
            tracing::error!(
                %market,
                symbol = %args.symbol,
                start_date = %args.start_date.as_deref().unwrap_or(self.config.default_start),
                end_date = %args.end_date.as_deref().unwrap_or(self.config.default_end),
                code = %e.code,
                "{}",
                e.error
            );
        })?;

        tracing::info!(
            %market,
            symbol = %req.symbol,
            period = %req.period,
            start_date = %req.start_date.format("%Y%m%d"),
            end_date = %req.end_date.format("%Y%m%d"),
            adjust = %req.adjust,
            "fetching history"
        );

        let records = match self.config.provider.fetch(&req).await {
            Ok(records) => records,
            Err(e) => {
                let err = ErrorResult::new(
                    ErrorCode::ApiError,
                    format!("获取{}历史数据失败: {e}", market.display_name()),
                );
                self.log_failure(&req, &err);
                return Err(err);
            }
        };

        if records.is_empty() {
            let err = ErrorResult::new(ErrorCode::NoDataFound, "未找到数据，请检查股票代码或日期范围");
            self.log_failure(&req, &err);
            return Err(err);
        }

        let report = HistoryReport::render(&self.config, &req, &records);
        tracing::info!(%market, symbol = %req.symbol, count = records.len(), "history fetched");
        Ok(report)
    }

    /// [`handle`](Self::handle), collapsed into the string a tool returns.
    pub async fn handle_to_string(&self, args: HistoryArgs) -> String {
        match self.handle(args).await {
            Ok(report) => report.into_string(),
            Err(err) => err.to_json(),
        }
    }

    /// Turn raw arguments into a typed request. Period first, then dates,
    /// then the adjust flag; nothing here touches the provider.
    fn validate(&self, args: &HistoryArgs) -> Result<HistoryRequest, ErrorResult> {
        let period: Period = args
            .period
            .as_deref()
            .unwrap_or(Period::Daily.as_str())
            .parse()
            .map_err(|_| {
                ErrorResult::new(
                    ErrorCode::InvalidPeriod,
                    "period参数必须是 'daily', 'weekly', 'monthly' 之一",
                )
            })?;

        let start = args.start_date.as_deref().unwrap_or(self.config.default_start);
        let end = args.end_date.as_deref().unwrap_or(self.config.default_end);
        let (Some(start_date), Some(end_date)) = (parse_yyyymmdd(start), parse_yyyymmdd(end)) else {
            return Err(ErrorResult::new(
                ErrorCode::InvalidDateFormat,
                "日期格式错误，请使用 YYYYMMDD 格式",
            ));
        };

        // An unknown adjust flag is an upstream rejection in the provider's
        // contract, so it keeps the API_ERROR code.
        let adjust: Adjust = args.adjust.as_deref().unwrap_or("").parse().map_err(|e| {
            ErrorResult::new(
                ErrorCode::ApiError,
                format!("获取{}历史数据失败: {e}", self.config.market.display_name()),
            )
        })?;

        Ok(HistoryRequest {
            symbol: args.symbol.clone(),
            period,
            start_date,
            end_date,
            adjust,
        })
    }

    fn log_failure(&self, req: &HistoryRequest, err: &ErrorResult) {
        tracing::error!(
            market = %self.config.market,
            symbol = %req.symbol,
            start_date = %req.start_date.format("%Y%m%d"),
            end_date = %req.end_date.format("%Y%m%d"),
            code = %err.code,
            "{}",
            err.error
        );
    }
}

/// Strict `YYYYMMDD`: exactly eight ASCII digits forming a real date in
/// year 1 or later.
pub fn parse_yyyymmdd(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y%m%d")
        .ok()
        .filter(|d| d.year() >= 1)
}
