//! A histogram of a month's prices over fixed ranges.

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

const BAR_CHART_ERROR: &str = "Error fetching bar chart data";

/// An inclusive price range. A range without a maximum has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PriceRange {
    label: &'static str,
    min: f64,
    max: Option<f64>,
}

impl PriceRange {
    const fn new(label: &'static str, min: f64, max: Option<f64>) -> Self {
        Self { label, min, max }
    }
}

/// The histogram ranges in ascending order.
///
/// The bounds are whole numbers, so a price such as 100.5 falls between two
/// ranges and is not counted.
const PRICE_RANGES: [PriceRange; 10] = [
    PriceRange::new("0 - 100", 0.0, Some(100.0)),
    PriceRange::new("101 - 200", 101.0, Some(200.0)),
    PriceRange::new("201 - 300", 201.0, Some(300.0)),
    PriceRange::new("301 - 400", 301.0, Some(400.0)),
    PriceRange::new("401 - 500", 401.0, Some(500.0)),
    PriceRange::new("501 - 600", 501.0, Some(600.0)),
    PriceRange::new("601 - 700", 601.0, Some(700.0)),
    PriceRange::new("701 - 800", 701.0, Some(800.0)),
    PriceRange::new("801 - 900", 801.0, Some(900.0)),
    PriceRange::new("901 - above", 901.0, None),
];

/// The number of a month's transactions priced within one range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartRow {
    /// The range label, e.g. "101 - 200".
    pub range: String,
    /// The number of transactions priced within the range.
    pub count: u32,
}

/// Count the transactions of `month` in each price range.
///
/// Always returns one row per range, in ascending order, including empty ones.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_bar_chart_data(
    month: Option<u8>,
    connection: &Connection,
) -> Result<Vec<BarChartRow>, Error> {
    let mut statement = connection.prepare_cached(&format!(
        "SELECT COUNT(row_id) FROM \"transaction\"
         WHERE {MONTH_CONDITION}
         AND price >= :min
         AND (:max IS NULL OR price <= :max)"
    ))?;

    PRICE_RANGES
        .iter()
        .map(|range| -> Result<BarChartRow, Error> {
            let count = statement.query_row(
                rusqlite::named_params! {
                    ":month": month,
                    ":min": range.min,
                    ":max": range.max,
                },
                |row| row.get(0),
            )?;

            Ok(BarChartRow {
                range: range.label.to_owned(),
                count,
            })
        })
        .collect()
}

/// Route handler for a month's price histogram.
pub async fn get_bar_chart_endpoint(
    State(state): State<AnalyticsState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<BarChartRow>>, RouteError> {
    let connection = lock_connection(&state.db_connection)
        .map_err(|error| error.into_route_error(BAR_CHART_ERROR))?;

    get_bar_chart_data(query.month, &connection)
        .map(Json)
        .map_err(|error| error.into_route_error(BAR_CHART_ERROR))
}
