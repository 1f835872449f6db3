//! Route loaders
//!
//! A loader is bound to a route and resolves before the route's page
//! renders. The page receives whatever the loader returned, error included.

use async_trait::async_trait;
use std::sync::Arc;

use crate::models::{PriceQuote, RouteParams};
use crate::FetchResult;

/// Route parameter holding the asset symbol
pub const SYMBOL_PARAM: &str = "symbol";

/// Data dependency of a page
#[async_trait]
pub trait PageLoader: Send + Sync {
    type Data;

    async fn load(&self, params: &RouteParams) -> FetchResult<Self::Data>;
}

/// Anything that can quote one asset against another
#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    async fn exchange_rate(&self, base: &str, quote: &str) -> FetchResult<PriceQuote>;
}

/// Source reference type
pub type SourceRef = Arc<dyn ExchangeRateSource>;

/// Loader for the price page: quotes `symbol` against a fixed currency
#[derive(Clone)]
pub struct PriceLoader {
    source: SourceRef,
    quote_currency: String,
}

impl PriceLoader {
    pub fn new(source: SourceRef, quote_currency: impl Into<String>) -> Self {
        Self {
            source,
            quote_currency: quote_currency.into(),
        }
    }

    pub fn quote_currency(&self) -> &str {
        &self.quote_currency
    }
}

#[async_trait]
impl PageLoader for PriceLoader {
    type Data = PriceQuote;

    async fn load(&self, params: &RouteParams) -> FetchResult<PriceQuote> {
        let symbol = params.require(SYMBOL_PARAM)?;
        self.source.exchange_rate(symbol, &self.quote_currency).await
    }
}
