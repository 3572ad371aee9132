//! Replace the stored transactions with a fresh copy of the feed.

use rusqlite::Connection;

use crate::{
    Error,
    transaction::{Transaction, delete_all_transactions, insert_transaction},
};

/// Delete every stored transaction and insert `transactions` in their place,
/// keeping the order they are given in.
///
/// The delete and inserts run in a single database transaction, so on error
/// the previously stored transactions are left untouched.
///
/// Returns the number of transactions inserted.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn replace_transactions(
    transactions: &[Transaction],
    connection: &Connection,
) -> Result<usize, Error> {
    let start_time = std::time::Instant::now();
    let tx = connection.unchecked_transaction()?;

    let deleted = delete_all_transactions(&tx)?;

    for transaction in transactions {
        insert_transaction(transaction, &tx)?;
    }

    tx.commit()?;

    tracing::info!(
        "Replaced {deleted} transactions with {} from the feed in {:.1}ms",
        transactions.len(),
        start_time.elapsed().as_secs_f64() * 1000.0
    );

    Ok(transactions.len())
}
