//! Price routes - Exchange rate for one asset
//!
//! Both endpoints run the price loader before producing a response:
//! - api.rs: JSON quote
//! - page.rs: HTMX page rendering

pub mod api;
pub mod page;

pub use api::api_price;
pub use page::page_price;
