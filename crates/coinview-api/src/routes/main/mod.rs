//! Main route - Landing page

pub mod page;

pub use page::page_main;
