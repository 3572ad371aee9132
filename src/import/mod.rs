//! Seeding the database from the remote transaction feed.

mod endpoint;
mod feed;
mod replace;

pub use endpoint::initialize_db_endpoint;
pub use feed::{fetch_feed, read_feed_file};
pub use replace::replace_transactions;
