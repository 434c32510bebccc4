//! Request, record and wire types.
//!
//! ## Organization
//!
//! - [`enums`] — Period, price adjustment and market enumerations
//! - [`history`] — Validated requests, parsed records, kline envelope
//!
//! All enums are re-exported at the module root via `pub use enums::*`.

pub mod enums;
pub mod history;

pub use enums::*;
