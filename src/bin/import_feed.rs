use std::error::Error;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use transaction_analytics::{fetch_feed, initialize_db, read_feed_file, replace_transactions};

/// A utility for seeding the transaction analytics database without running
/// the server.
///
/// Replaces every stored transaction with the records from the feed.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "DATABASE_PATH")]
    db_path: String,

    /// URL of the JSON transaction feed.
    #[arg(long, env = "FEED_URL")]
    feed_url: Option<String>,

    /// A saved copy of the feed. Takes precedence over `--feed-url`.
    #[arg(long, short)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let transactions = match (&args.file, &args.feed_url) {
        (Some(path), _) => {
            println!("Reading transactions from {path:#?}");
            read_feed_file(path)?
        }
        (None, Some(url)) => {
            println!("Downloading transactions from {url}");
            fetch_feed(&reqwest::Client::new(), url).await?
        }
        (None, None) => {
            eprintln!("Either --feed-url or --file must be given.");
            exit(1);
        }
    };

    println!("Opening database at {:#?}", args.db_path);
    let conn = Connection::open(&args.db_path)?;
    initialize_db(&conn)?;

    let count = replace_transactions(&transactions, &conn)?;

    println!("Imported {count} transactions. Success!");

    Ok(())
}
