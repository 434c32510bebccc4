//! Data-provider seam between the history handler and a quote source.
//!
//! The handler only sees [`HistoryProvider`]; each market gets its own
//! binding so a test (or another vendor) can replace one market without
//! touching the others.

use async_trait::async_trait;

use crate::client::EastmoneyClient;
use crate::error::Result;
use crate::types::enums::Market;
use crate::types::history::{HistoryRecord, HistoryRequest};

/// Fetch capability for one market.
///
/// Implementations may fail for any reason (network, upstream rejection,
/// unexpected payload); the handler reports every failure as `API_ERROR`.
/// An empty vector means "no bars", not a failure.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Retrieve all bars matching `req`.
    async fn fetch(&self, req: &HistoryRequest) -> Result<Vec<HistoryRecord>>;
}

/// [`HistoryProvider`] backed by the Eastmoney kline endpoint.
#[derive(Debug, Clone)]
pub struct EastmoneyProvider {
    client: EastmoneyClient,
    market: Market,
}

impl EastmoneyProvider {
    pub fn new(client: EastmoneyClient, market: Market) -> Self {
        Self { client, market }
    }

    pub fn market(&self) -> Market {
        self.market
    }
}

#[async_trait]
impl HistoryProvider for EastmoneyProvider {
    async fn fetch(&self, req: &HistoryRequest) -> Result<Vec<HistoryRecord>> {
        self.client.get_kline(self.market, req).await
    }
}
