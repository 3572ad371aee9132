//! Transaction storage and listing.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model shared by the feed, the database and the API
//! - Database functions for storing and filtering transactions
//! - The route handler for listing a month of transactions

mod core;
mod list_endpoint;
mod query;

pub use core::{
    Transaction, create_transaction_table, delete_all_transactions, insert_transaction,
};
pub use list_endpoint::{ListQuery, get_transactions_endpoint};
pub use query::{TransactionFilter, TransactionPage, list_transactions};

#[cfg(test)]
pub use core::count_transactions;
