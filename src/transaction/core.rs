//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// A product listed for sale, as published by the transaction feed.
///
/// The field names follow the feed's camelCase JSON keys, so a feed record
/// deserializes into this struct and serializes back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The identifier assigned by the feed.
    ///
    /// The feed does not promise uniqueness, so this is not the primary key.
    pub id: i64,
    /// The product name.
    pub title: String,
    /// A free text description of the product.
    pub description: String,
    /// The listed price.
    pub price: f64,
    /// A free-form label such as "electronics" or "men's clothing".
    pub category: String,
    /// The URL of a product photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether the product has been sold.
    pub sold: bool,
    /// When the product was sold, or listed if it has not been sold.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns of a transaction in the order [map_transaction_row] reads them.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, image, sold, date_of_sale";

/// Create the transaction table in the database.
///
/// Rows keep the order they were inserted in through `row_id`, which is
/// separate from the feed's own `id`.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                row_id INTEGER PRIMARY KEY AUTOINCREMENT,
                id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                category TEXT NOT NULL,
                image TEXT,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Insert `transaction` after the existing rows.
///
/// The date of sale is stored in UTC so that SQLite's date functions see the
/// same month as the feed's UTC timestamp.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn insert_transaction(transaction: &Transaction, connection: &Connection) -> Result<(), Error> {
    connection
        .prepare_cached(
            "INSERT INTO \"transaction\"
                (id, title, description, price, category, image, sold, date_of_sale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?
        .execute((
            transaction.id,
            &transaction.title,
            &transaction.description,
            transaction.price,
            &transaction.category,
            &transaction.image,
            transaction.sold,
            transaction.date_of_sale.to_offset(UtcOffset::UTC),
        ))?;

    Ok(())
}

/// Delete every stored transaction.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn delete_all_transactions(connection: &Connection) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM \"transaction\"", ())
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(row_id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let description = row.get(2)?;
    let price = row.get(3)?;
    let category = row.get(4)?;
    let image = row.get(5)?;
    let sold = row.get(6)?;
    let date_of_sale = row.get(7)?;

    Ok(Transaction {
        id,
        title,
        description,
        price,
        category,
        image,
        sold,
        date_of_sale,
    })
}

// ============================================================================
// TESTS
// ============================================================================
