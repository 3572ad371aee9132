//! Defines the route handler that seeds the database from the transaction feed.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    api_error::RouteError,
    db::lock_connection,
    import::{feed::fetch_feed, replace::replace_transactions},
};

const INITIALIZE_ERROR: &str = "Error initializing database";

/// The state needed for seeding the database.
#[derive(Debug, Clone)]
pub struct ImportState {
    /// The database connection for replacing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The client used to download the feed.
    pub http_client: reqwest::Client,
    /// Where to download the feed from.
    pub feed_url: String,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            http_client: state.http_client.clone(),
            feed_url: state.feed_url.clone(),
        }
    }
}

/// The body of a successful seed, `{"message": "Database initialized successfully"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializeResponse {
    /// A human readable confirmation.
    pub message: String,
}

/// Route handler that replaces every stored transaction with the records
/// currently published by the feed.
///
/// The feed is downloaded before the database is touched, so a failed
/// download leaves the stored transactions as they were.
pub async fn initialize_db_endpoint(
    State(state): State<ImportState>,
) -> Result<Json<InitializeResponse>, RouteError> {
    let transactions = fetch_feed(&state.http_client, &state.feed_url)
        .await
        .map_err(|error| error.into_route_error(INITIALIZE_ERROR))?;

    let connection = lock_connection(&state.db_connection)
        .map_err(|error| error.into_route_error(INITIALIZE_ERROR))?;

    replace_transactions(&transactions, &connection)
        .map_err(|error| error.into_route_error(INITIALIZE_ERROR))?;

    Ok(Json(InitializeResponse {
        message: "Database initialized successfully".to_owned(),
    }))
}
