//! Monthly aggregates over the stored transactions.
//!
//! - Sales statistics for a month
//! - A histogram of prices in fixed ranges
//! - The number of items per category
//! - All of the above plus a page of transactions in one response

mod bar_chart;
mod combined;
mod pie_chart;
mod statistics;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{AppState, pagination::PaginationConfig};

pub use bar_chart::{BarChartRow, get_bar_chart_data, get_bar_chart_endpoint};
pub use combined::{CombinedData, get_combined_data, get_combined_data_endpoint};
pub use pie_chart::{CategoryCount, get_pie_chart_data, get_pie_chart_endpoint};
pub use statistics::{Statistics, get_statistics, get_statistics_endpoint};

/// The state needed for the aggregate routes.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The default page and page size for the combined listing.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}
