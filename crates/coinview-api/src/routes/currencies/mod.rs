//! Currencies routes - Tracked currency list

pub mod api;
pub mod page;

pub use api::api_currencies;
pub use page::page_currencies;
