//! The number of a month's transactions in each category.

use axum::{
    Json,
    extract::{Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    analytics::AnalyticsState,
    api_error::RouteError,
    db::lock_connection,
    month::{MONTH_CONDITION, MonthQuery},
};

const PIE_CHART_ERROR: &str = "Error fetching pie chart data";

/// The number of a month's transactions in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category as it appears in the feed.
    pub category: String,
    /// The number of transactions in the category.
    pub count: u32,
}

/// Count the transactions of `month` per category, ordered by category.
///
/// Categories without transactions in the month are left out.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_pie_chart_data(
    month: Option<u8>,
    connection: &Connection,
) -> Result<Vec<CategoryCount>, Error> {
    connection
        .prepare_cached(&format!(
            "SELECT category, COUNT(row_id) FROM \"transaction\"
             WHERE {MONTH_CONDITION}
             GROUP BY category
             ORDER BY category"
        ))?
        .query_map(&[(":month", &month)], |row| {
            Ok(CategoryCount {
                category: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| error.into())
}

/// Route handler for a month's category breakdown.
pub async fn get_pie_chart_endpoint(
    State(state): State<AnalyticsState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, RouteError> {
    let connection = lock_connection(&state.db_connection)
        .map_err(|error| error.into_route_error(PIE_CHART_ERROR))?;

    get_pie_chart_data(query.month, &connection)
        .map(Json)
        .map_err(|error| error.into_route_error(PIE_CHART_ERROR))
}
