//! Exchange-rate loading and page data
//!
//! - models: route parameters and the quote record
//! - loader: the `PageLoader` contract and the price page loader
//! - coinapi: reqwest client for the CoinAPI exchange-rate endpoint

pub mod error;
pub mod models;
pub mod loader;
pub mod coinapi;

pub use error::{ErrorCode, ErrorDetails, FetchError, FetchResult};
pub use models::{PriceQuote, RouteParams};
pub use loader::{ExchangeRateSource, PageLoader, PriceLoader, SourceRef, SYMBOL_PARAM};
pub use coinapi::CoinApiClient;
