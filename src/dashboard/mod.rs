//! Dashboard module
//!
//! Provides a page showing a month of transactions with its statistics and
//! charts. The month and search controls update the page in place with htmx.

mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
