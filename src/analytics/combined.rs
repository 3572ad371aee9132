//! Every monthly view of the transactions in a single response.

use axum::{
    Json,
    extract::{Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    analytics::{
        AnalyticsState, BarChartRow, CategoryCount, Statistics, get_bar_chart_data,
        get_pie_chart_data, get_statistics,
    },
    api_error::RouteError,
    db::lock_connection,
    pagination::PaginationConfig,
    transaction::{ListQuery, TransactionPage, list_transactions},
};

const COMBINED_ERROR: &str = "Error fetching combined data";

/// A page of transactions together with the aggregates for the same month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    /// The page of transactions selected by the month, search and page.
    pub transactions: TransactionPage,
    /// The month's sales totals.
    pub statistics: Statistics,
    /// The month's price histogram.
    pub bar_chart_data: Vec<BarChartRow>,
    /// The month's category breakdown.
    pub pie_chart_data: Vec<CategoryCount>,
}

/// Gather the listing, statistics and both charts for `query`.
///
/// The search and paging in `query` only narrow the listing. The aggregates
/// always cover the whole month.
///
/// # Errors
/// Returns [Error::SqlError] if any of the queries fail.
pub fn get_combined_data(
    query: &ListQuery,
    pagination_config: &PaginationConfig,
    connection: &Connection,
) -> Result<CombinedData, Error> {
    Ok(CombinedData {
        transactions: list_transactions(
            query.filter(),
            query.paging(pagination_config),
            connection,
        )?,
        statistics: get_statistics(query.month, connection)?,
        bar_chart_data: get_bar_chart_data(query.month, connection)?,
        pie_chart_data: get_pie_chart_data(query.month, connection)?,
    })
}

/// Route handler for the listing and aggregates of a month.
pub async fn get_combined_data_endpoint(
    State(state): State<AnalyticsState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CombinedData>, RouteError> {
    let connection = lock_connection(&state.db_connection)
        .map_err(|error| error.into_route_error(COMBINED_ERROR))?;

    get_combined_data(&query, &state.pagination_config, &connection)
        .map(Json)
        .map_err(|error| error.into_route_error(COMBINED_ERROR))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use time::macros::datetime;

    use crate::{
        analytics::{CategoryCount, Statistics, test_server},
        api_error::ErrorBody,
        endpoints,
        pagination::PaginationConfig,
        test_utils::{get_test_connection, sample_transaction, seed},
        transaction::{ListQuery, Transaction},
    };

    use super::{CombinedData, get_combined_data};

    fn electronics_sale() -> Transaction {
        Transaction {
            category: "Electronics".to_owned(),
            sold: true,
            ..sample_transaction(1, 150.0, datetime!(2022-03-15 09:30 UTC))
        }
    }

    #[test]
    fn single_sale_appears_in_every_view() {
        let conn = get_test_connection();
        seed(&[electronics_sale()], &conn);
        let query = ListQuery {
            month: Some(3),
            ..Default::default()
        };

        let got = get_combined_data(&query, &PaginationConfig::default(), &conn).unwrap();

        assert_eq!(got.transactions.transactions, vec![electronics_sale()]);
        assert_eq!(got.transactions.total, 1);
        assert_eq!(
            got.statistics,
            Statistics {
                total_sale_amount: 150.0,
                total_sold_items: 1,
                total_not_sold_items: 0,
            }
        );
        let bar_counts: Vec<_> = got.bar_chart_data.iter().map(|row| row.count).collect();
        assert_eq!(bar_counts, [0, 1, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(got.bar_chart_data[1].range, "101 - 200");
        assert_eq!(
            got.pie_chart_data,
            vec![CategoryCount {
                category: "Electronics".to_owned(),
                count: 1
            }]
        );
    }

    #[test]
    fn search_narrows_only_the_listing() {
        let conn = get_test_connection();
        seed(
            &[
                electronics_sale(),
                sample_transaction(2, 20.0, datetime!(2022-03-16 09:30 UTC)),
            ],
            &conn,
        );
        let query = ListQuery {
            month: Some(3),
            search: Some("no such product".to_owned()),
            page: None,
            per_page: None,
        };

        let got = get_combined_data(&query, &PaginationConfig::default(), &conn).unwrap();

        assert_eq!(got.transactions.total, 0);
        assert_eq!(got.statistics.total_sold_items, 2);
        assert_eq!(got.pie_chart_data.iter().map(|row| row.count).sum::<u32>(), 2);
    }

    #[tokio::test]
    async fn responds_with_all_four_keys() {
        let server = test_server::with_transactions(&[electronics_sale()]);

        let response = server
            .get(endpoints::COMBINED_DATA_API)
            .add_query_param("month", 3)
            .add_query_param("perPage", 5)
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["transactions"]["perPage"], 5);
        assert_eq!(body["statistics"]["totalSaleAmount"], 150.0);
        assert_eq!(body["barChartData"][1]["count"], 1);
        assert_eq!(body["pieChartData"][0]["category"], "Electronics");

        let parsed: CombinedData = response.json();
        assert_eq!(parsed.transactions.transactions.len(), 1);
    }

    #[tokio::test]
    async fn fails_with_static_message() {
        let server = test_server::broken();

        let response = server
            .get(endpoints::COMBINED_DATA_API)
            .add_query_param("month", 3)
            .expect_failure()
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<ErrorBody>().error,
            "Error fetching combined data"
        );
    }
}
