//! Sales totals for a month.

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

const STATISTICS_ERROR: &str = "Error fetching statistics";

/// The sales totals for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the price of every transaction in the month, sold or not.
    pub total_sale_amount: f64,
    /// The number of transactions in the month that were sold.
    pub total_sold_items: u32,
    /// The number of transactions in the month that were not sold.
    pub total_not_sold_items: u32,
}

/// Calculate the sales totals for `month`.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_statistics(month: Option<u8>, connection: &Connection) -> Result<Statistics, Error> {
    connection
        .prepare_cached(&format!(
            "SELECT COALESCE(SUM(price), 0.0),
                    COALESCE(SUM(sold = 1), 0),
                    COALESCE(SUM(sold = 0), 0)
             FROM \"transaction\"
             WHERE {MONTH_CONDITION}"
        ))?
        .query_row(&[(":month", &month)], |row| {
            Ok(Statistics {
                total_sale_amount: row.get(0)?,
                total_sold_items: row.get(1)?,
                total_not_sold_items: row.get(2)?,
            })
        })
        .map_err(|error| error.into())
}

/// Route handler for a month's sales totals.
pub async fn get_statistics_endpoint(
    State(state): State<AnalyticsState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Statistics>, RouteError> {
    let connection = lock_connection(&state.db_connection)
        .map_err(|error| error.into_route_error(STATISTICS_ERROR))?;

    get_statistics(query.month, &connection)
        .map(Json)
        .map_err(|error| error.into_route_error(STATISTICS_ERROR))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use time::macros::datetime;

    use crate::{
        analytics::test_server,
        api_error::ErrorBody,
        endpoints,
        test_utils::{get_test_connection, sample_transaction, seed},
        transaction::Transaction,
    };

    use super::{Statistics, get_statistics};

    fn march_and_april() -> Vec<Transaction> {
        vec![
            sample_transaction(1, 150.0, datetime!(2022-03-05 10:00 UTC)),
            Transaction {
                sold: false,
                ..sample_transaction(2, 49.5, datetime!(2021-03-20 10:00 UTC))
            },
            sample_transaction(3, 0.5, datetime!(2022-03-31 23:59 UTC)),
            sample_transaction(4, 1000.0, datetime!(2022-04-01 00:00 UTC)),
        ]
    }

    #[test]
    fn sums_every_transaction_in_month() {
        let conn = get_test_connection();
        seed(&march_and_april(), &conn);

        let got = get_statistics(Some(3), &conn).unwrap();

        assert_eq!(
            got,
            Statistics {
                total_sale_amount: 200.0,
                total_sold_items: 2,
                total_not_sold_items: 1,
            }
        );
    }

    #[test]
    fn sold_and_not_sold_add_up_to_month_total() {
        let conn = get_test_connection();
        seed(&march_and_april(), &conn);

        for month in 1..=12 {
            let statistics = get_statistics(Some(month), &conn).unwrap();
            let want = march_and_april()
                .iter()
                .filter(|transaction| u8::from(transaction.date_of_sale.month()) == month)
                .count() as u32;

            assert_eq!(
                statistics.total_sold_items + statistics.total_not_sold_items,
                want,
                "month {month}"
            );
        }
    }

    #[test]
    fn empty_month_is_zero() {
        let conn = get_test_connection();
        seed(&march_and_april(), &conn);

        let got = get_statistics(Some(7), &conn).unwrap();

        assert_eq!(
            got,
            Statistics {
                total_sale_amount: 0.0,
                total_sold_items: 0,
                total_not_sold_items: 0,
            }
        );
    }

    #[test]
    fn missing_month_is_zero() {
        let conn = get_test_connection();
        seed(&march_and_april(), &conn);

        let got = get_statistics(None, &conn).unwrap();

        assert_eq!(got.total_sold_items + got.total_not_sold_items, 0);
    }

    #[tokio::test]
    async fn responds_with_camel_case_keys() {
        let server = test_server::with_transactions(&march_and_april());

        let response = server
            .get(endpoints::STATISTICS_API)
            .add_query_param("month", 4)
            .await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!({
            "totalSaleAmount": 1000.0,
            "totalSoldItems": 1,
            "totalNotSoldItems": 0,
        }));
    }

    #[tokio::test]
    async fn fails_with_static_message() {
        let server = test_server::broken();

        let response = server
            .get(endpoints::STATISTICS_API)
            .add_query_param("month", 3)
            .expect_failure()
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<ErrorBody>().error, "Error fetching statistics");
    }
}
