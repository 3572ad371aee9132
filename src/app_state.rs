//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The HTTP client used to download the transaction feed.
    pub http_client: reqwest::Client,

    /// The URL of the JSON transaction feed that seeds the database.
    pub feed_url: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the HTTP
    /// client cannot be built.
    pub fn new(
        db_connection: Connection,
        feed_url: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let http_client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|error| Error::FeedRequest(error.to_string()))?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            http_client,
            feed_url: feed_url.to_owned(),
            pagination_config,
        })
    }
}
