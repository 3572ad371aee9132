#![allow(missing_docs)]

use axum::{body::Body, http::Response};
use rusqlite::Connection;
use scraper::Html;
use time::OffsetDateTime;

use crate::{
    db::initialize,
    transaction::{Transaction, insert_transaction},
};

pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

/// A sold "electronics" transaction with placeholder text.
pub(crate) fn sample_transaction(id: i64, price: f64, date_of_sale: OffsetDateTime) -> Transaction {
    Transaction {
        id,
        title: format!("Product {id}"),
        description: format!("Description of product {id}"),
        price,
        category: "electronics".to_owned(),
        image: None,
        sold: true,
        date_of_sale,
    }
}

#[track_caller]
pub(crate) fn seed(transactions: &[Transaction], conn: &Connection) {
    for transaction in transactions {
        insert_transaction(transaction, conn).expect("Could not insert transaction");
    }
}

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not get response body");
    let text = String::from_utf8_lossy(&body).to_string();

    Html::parse_document(&text)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}
