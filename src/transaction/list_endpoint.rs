//! Defines the route handler for listing a month of transactions as JSON.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState,
    api_error::RouteError,
    db::lock_connection,
    pagination::{PaginationConfig, Paging},
    transaction::query::{TransactionFilter, TransactionPage, list_transactions},
};

const LIST_ERROR: &str = "Error fetching transactions";

/// The query parameters for listing transactions, e.g.
/// `?month=3&search=jacket&page=2&perPage=10`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// The month of the year, 1 for January.
    pub month: Option<u8>,
    /// Optional search term.
    pub search: Option<String>,
    /// The page to fetch, starting at 1.
    pub page: Option<u32>,
    /// The number of transactions per page.
    pub per_page: Option<u32>,
}

impl ListQuery {
    /// The filter selected by these parameters.
    pub fn filter(&self) -> TransactionFilter<'_> {
        TransactionFilter {
            month: self.month,
            search: self.search.as_deref(),
        }
    }

    /// The page selected by these parameters, with defaults from `config`.
    pub fn paging(&self, config: &PaginationConfig) -> Paging {
        Paging::new(self.page, self.per_page, config)
    }
}

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct TransactionListState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The default page and page size.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Route handler for one page of a month's transactions.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionListState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TransactionPage>, RouteError> {
    let connection =
        lock_connection(&state.db_connection).map_err(|error| error.into_route_error(LIST_ERROR))?;

    list_transactions(
        query.filter(),
        query.paging(&state.pagination_config),
        &connection,
    )
    .map(Json)
    .map_err(|error| error.into_route_error(LIST_ERROR))
}
