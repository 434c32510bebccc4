//! Stub providers shared by the integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration as Delay;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use eastmoney_mcp::error::{QuoteError, Result};
use eastmoney_mcp::provider::HistoryProvider;
use eastmoney_mcp::types::history::{HistoryRecord, HistoryRequest};

/// What a [`StubProvider`] does when called.
#[derive(Debug, Clone)]
pub enum Behaviour {
    /// Return `n` deterministic bars starting at the request's start date.
    Records(usize),
    /// Return no bars.
    Empty,
    /// Fail with the given message.
    Fail(String),
    /// Return `n` bars after sleeping for the given delay.
    Slow(usize, Delay),
}

/// Deterministic provider that records how often it was called.
#[derive(Debug)]
pub struct StubProvider {
    behaviour: Behaviour,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    with_code: bool,
}

impl StubProvider {
    pub fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            with_code: false,
        })
    }

    /// Like [`new`](Self::new) but bars carry a security code, as A-share
    /// rows do.
    pub fn with_code(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            with_code: true,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most calls that were ever running at the same time.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn records(&self, req: &HistoryRequest, n: usize) -> Vec<HistoryRecord> {
        (0..n)
            .map(|i| {
                bar(
                    req.start_date + Duration::days(i as i64),
                    i,
                    self.with_code.then_some(req.symbol.as_str()),
                )
            })
            .collect()
    }
}

#[async_trait]
impl HistoryProvider for StubProvider {
    async fn fetch(&self, req: &HistoryRequest) -> Result<Vec<HistoryRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let out = match &self.behaviour {
            Behaviour::Records(n) => Ok(self.records(req, *n)),
            Behaviour::Empty => Ok(Vec::new()),
            Behaviour::Fail(msg) => Err(QuoteError::InvalidArgument(msg.clone())),
            Behaviour::Slow(n, delay) => {
                tokio::time::sleep(*delay).await;
                Ok(self.records(req, *n))
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        out
    }
}

pub fn bar(date: NaiveDate, i: usize, code: Option<&str>) -> HistoryRecord {
    let base = 100.0 + i as f64;
    HistoryRecord {
        date,
        code: code.map(str::to_owned),
        open: base,
        close: base + 0.5,
        high: base + 1.25,
        low: base - 0.75,
        volume: 1_000_000 + i as i64,
        amount: 123_456_789.123,
        amplitude: 2.0,
        change_pct: 0.5,
        change: 0.5,
        turnover_rate: 0.31,
    }
}
