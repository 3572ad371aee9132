//! Read the transaction feed, either over HTTP or from a local file.

use std::{fs::File, io::BufReader, path::Path};

use crate::{Error, transaction::Transaction};

/// Download the transaction feed at `url` and decode it as a JSON list.
///
/// # Errors
/// Returns [Error::FeedRequest] if the feed cannot be reached or responds with
/// a non-success status, or [Error::FeedDecode] if the body is not a JSON
/// list of transactions.
pub async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<Vec<Transaction>, Error> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|error| Error::FeedRequest(error.to_string()))?;

    let transactions = response
        .json::<Vec<Transaction>>()
        .await
        .map_err(|error| Error::FeedDecode(error.to_string()))?;

    tracing::debug!("Fetched {} transactions from {url}", transactions.len());

    Ok(transactions)
}

/// Read a copy of the transaction feed saved to `path`.
///
/// # Errors
/// Returns [Error::FeedFile] if the file cannot be opened, or
/// [Error::FeedDecode] if it is not a JSON list of transactions.
pub fn read_feed_file(path: &Path) -> Result<Vec<Transaction>, Error> {
    let file = File::open(path).map_err(|error| Error::FeedFile(error.to_string()))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|error| Error::FeedDecode(error.to_string()))
}
