//! Shared enum types for history requests.
//!
//! Each enum parses from the exact string a tool caller sends and knows the
//! numeric code the Eastmoney kline endpoint expects for it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// Bar period of a history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    /// All accepted periods, in the order they are advertised.
    pub const ALL: [Period; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// Wire value accepted from tool callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Eastmoney `klt` code.
    pub fn klt(self) -> u16 {
        match self {
            Self::Daily => 101,
            Self::Weekly => 102,
            Self::Monthly => 103,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(QuoteError::InvalidArgument(format!(
                "unknown period '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Adjust
// ---------------------------------------------------------------------------

/// Price adjustment applied to historical bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Adjust {
    /// Raw prices (`""`).
    #[default]
    #[serde(rename = "")]
    None,
    /// Forward-adjusted, current price level kept fixed (`"qfq"`).
    #[serde(rename = "qfq")]
    Forward,
    /// Backward-adjusted, historical price level kept fixed (`"hfq"`).
    #[serde(rename = "hfq")]
    Backward,
}

impl Adjust {
    /// Wire value accepted from tool callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Forward => "qfq",
            Self::Backward => "hfq",
        }
    }

    /// Human-readable label shown in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "不复权",
            Self::Forward => "前复权",
            Self::Backward => "后复权",
        }
    }

    /// Eastmoney `fqt` code.
    pub fn fqt(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Forward => 1,
            Self::Backward => 2,
        }
    }
}

impl fmt::Display for Adjust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Adjust {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::None),
            "qfq" => Ok(Self::Forward),
            "hfq" => Ok(Self::Backward),
            other => Err(QuoteError::InvalidArgument(format!(
                "unknown adjust '{other}', expected '', 'qfq' or 'hfq'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

/// Equity market served by one history tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    /// US equities (NASDAQ / NYSE / AMEX).
    Us,
    /// Hong Kong equities.
    Hk,
    /// China A-shares (Shanghai / Shenzhen / Beijing).
    CnA,
}

impl Market {
    /// Short name used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Hk => "HK",
            Self::CnA => "CN-A",
        }
    }

    /// Name used in report titles and error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Us => "美股",
            Self::Hk => "港股",
            Self::CnA => "A股",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
