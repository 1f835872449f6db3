//! Route modules for the server
//!
//! - main: Landing page
//! - currencies: Currency list page and JSON endpoint
//! - price: Exchange-rate page and JSON endpoint, both fed by the price loader
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints
//! - page.rs: HTMX page rendering

pub mod main;
pub mod currencies;
pub mod price;
