//! Month and search filtered listing of transactions.

use rusqlite::{Connection, ToSql};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    month::MONTH_CONDITION,
    pagination::{Paging, page_count},
    transaction::core::{TRANSACTION_COLUMNS, Transaction, map_transaction_row},
};

/// Selects the transactions of one month, optionally narrowed by a search term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionFilter<'a> {
    /// The month of the year, 1 for January. `None` matches nothing.
    pub month: Option<u8>,
    /// Text to look for in the title or description, or a price to match
    /// exactly. An empty term disables the search.
    pub search: Option<&'a str>,
}

/// One page of filtered transactions with the information needed to page
/// through the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The transactions on the requested page, in feed order.
    pub transactions: Vec<Transaction>,
    /// The number of transactions matching the filter across all pages.
    pub total: u32,
    /// The requested page, starting at 1.
    pub page: u32,
    /// The maximum number of transactions on a page.
    pub per_page: u32,
    /// `total` divided by `per_page`, rounded up.
    pub total_pages: u32,
}

/// Get one page of the transactions matching `filter`.
///
/// A search term matches a transaction if the title or description contains
/// the term, ignoring ASCII case, or if the price equals the number the term
/// starts with (zero when the term does not start with a number).
///
/// Requesting a page past the last one gives an empty list with the correct
/// total.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn list_transactions(
    filter: TransactionFilter,
    paging: Paging,
    connection: &Connection,
) -> Result<TransactionPage, Error> {
    let search = filter.search.filter(|term| !term.is_empty());
    let pattern = search.map(like_pattern);
    let price = search.map(leading_number).unwrap_or_default();
    let limit = paging.limit();
    let offset = paging.offset();

    let mut where_clause = format!("WHERE {MONTH_CONDITION}");
    let mut params: Vec<(&str, &dyn ToSql)> = vec![(":month", &filter.month)];

    if let Some(pattern) = &pattern {
        where_clause.push_str(
            " AND (title LIKE :pattern ESCAPE '\\'
                OR description LIKE :pattern ESCAPE '\\'
                OR price = :price)",
        );
        params.push((":pattern", pattern));
        params.push((":price", &price));
    }

    let total: u32 = connection
        .prepare(&format!(
            "SELECT COUNT(row_id) FROM \"transaction\" {where_clause}"
        ))?
        .query_row(params.as_slice(), |row| row.get(0))?;

    params.push((":limit", &limit));
    params.push((":offset", &offset));

    let transactions = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" {where_clause}
             ORDER BY row_id
             LIMIT :limit OFFSET :offset"
        ))?
        .query_map(params.as_slice(), map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransactionPage {
        transactions,
        total,
        page: paging.page,
        per_page: paging.per_page,
        total_pages: page_count(total, paging.per_page),
    })
}

/// Wrap `term` in wildcards for a substring `LIKE` match, escaping the
/// wildcard characters it contains.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');

    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }

    pattern.push('%');
    pattern
}

/// Parse the decimal number at the start of `term`, ignoring leading
/// whitespace and anything after the number.
///
/// Returns zero if `term` does not start with a number, so "12.5kg" gives
/// 12.5 and "shirt" gives 0.
fn leading_number(term: &str) -> f64 {
    let term = term.trim_start();
    let bytes = term.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digit_count = end - integer_start;

    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }

        if digit_count > 0 || fraction_end > fraction_start {
            digit_count += fraction_end - fraction_start;
            end = fraction_end;
        }
    }

    if digit_count == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }

        let exponent_digits_start = exponent_end;
        while bytes.get(exponent_end).is_some_and(u8::is_ascii_digit) {
            exponent_end += 1;
        }

        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    term[..end]
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use time::{OffsetDateTime, macros::datetime};

    use crate::{
        pagination::Paging,
        test_utils::{get_test_connection, sample_transaction, seed},
        transaction::Transaction,
    };

    use super::{TransactionFilter, leading_number, like_pattern, list_transactions};

    fn first_page(per_page: u32) -> Paging {
        Paging { page: 1, per_page }
    }

    fn in_month(month: u8) -> OffsetDateTime {
        datetime!(2022-01-15 12:00 UTC)
            .replace_month(time::Month::try_from(month).unwrap())
            .unwrap()
    }

    #[test]
    fn returns_only_the_requested_month() {
        let conn = get_test_connection();
        let transactions: Vec<Transaction> = (1..=12)
            .flat_map(|month| {
                (0..month).map(move |i| {
                    let id = i64::from(month) * 100 + i64::from(i);
                    sample_transaction(id, 1.0, in_month(month))
                })
            })
            .collect();
        seed(&transactions, &conn);

        for month in 1..=12u8 {
            let page = list_transactions(
                TransactionFilter {
                    month: Some(month),
                    search: None,
                },
                first_page(100),
                &conn,
            )
            .unwrap();

            assert_eq!(page.total, u32::from(month), "wrong total for month {month}");
            assert_eq!(page.transactions.len(), usize::from(month));
            for transaction in &page.transactions {
                assert_eq!(u8::from(transaction.date_of_sale.month()), month);
            }
        }
    }

    #[test]
    fn missing_month_matches_nothing() {
        let conn = get_test_connection();
        seed(&[sample_transaction(1, 1.0, in_month(3))], &conn);

        let page = list_transactions(
            TransactionFilter {
                month: None,
                search: None,
            },
            first_page(10),
            &conn,
        )
        .unwrap();

        assert_eq!(page.total, 0);
        assert!(page.transactions.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn pages_in_feed_order() {
        let conn = get_test_connection();
        let transactions: Vec<_> = (1..=25)
            .map(|id| sample_transaction(id, 1.0, in_month(3)))
            .collect();
        seed(&transactions, &conn);
        let filter = TransactionFilter {
            month: Some(3),
            search: None,
        };

        let page = list_transactions(
            filter,
            Paging {
                page: 3,
                per_page: 10,
            },
            &conn,
        )
        .unwrap();

        let ids: Vec<_> = page.transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total, 25);
        assert_eq!(page.page, 3);
        assert_eq!(page.per_page, 10);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_past_the_end_is_empty_with_total() {
        let conn = get_test_connection();
        let transactions: Vec<_> = (1..=5)
            .map(|id| sample_transaction(id, 1.0, in_month(3)))
            .collect();
        seed(&transactions, &conn);

        let page = list_transactions(
            TransactionFilter {
                month: Some(3),
                search: None,
            },
            Paging {
                page: 4,
                per_page: 2,
            },
            &conn,
        )
        .unwrap();

        assert!(page.transactions.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn search_matches_title_and_description_ignoring_case() {
        let conn = get_test_connection();
        seed(
            &[
                Transaction {
                    title: "Mens Cotton Jacket".to_owned(),
                    ..sample_transaction(1, 55.99, in_month(3))
                },
                Transaction {
                    description: "A warm JACKET for winter".to_owned(),
                    ..sample_transaction(2, 20.0, in_month(3))
                },
                sample_transaction(3, 30.0, in_month(3)),
                Transaction {
                    title: "Jacket from another month".to_owned(),
                    ..sample_transaction(4, 40.0, in_month(4))
                },
            ],
            &conn,
        );

        let page = list_transactions(
            TransactionFilter {
                month: Some(3),
                search: Some("jacket"),
            },
            first_page(10),
            &conn,
        )
        .unwrap();

        let ids: Vec<_> = page.transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn search_matches_exact_price() {
        let conn = get_test_connection();
        seed(
            &[
                sample_transaction(1, 150.0, in_month(3)),
                sample_transaction(2, 150.5, in_month(3)),
                sample_transaction(3, 15.0, in_month(3)),
            ],
            &conn,
        );

        let page = list_transactions(
            TransactionFilter {
                month: Some(3),
                search: Some("150"),
            },
            first_page(10),
            &conn,
        )
        .unwrap();

        let ids: Vec<_> = page.transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn non_numeric_search_also_matches_zero_price() {
        let conn = get_test_connection();
        seed(
            &[
                sample_transaction(1, 0.0, in_month(3)),
                sample_transaction(2, 10.0, in_month(3)),
            ],
            &conn,
        );

        let page = list_transactions(
            TransactionFilter {
                month: Some(3),
                search: Some("no such product"),
            },
            first_page(10),
            &conn,
        )
        .unwrap();

        let ids: Vec<_> = page.transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn empty_search_is_ignored() {
        let conn = get_test_connection();
        seed(
            &[
                sample_transaction(1, 0.0, in_month(3)),
                sample_transaction(2, 10.0, in_month(3)),
            ],
            &conn,
        );

        let page = list_transactions(
            TransactionFilter {
                month: Some(3),
                search: Some(""),
            },
            first_page(10),
            &conn,
        )
        .unwrap();

        assert_eq!(page.total, 2);
    }

    #[test]
    fn search_wildcards_are_literal() {
        let conn = get_test_connection();
        seed(
            &[
                Transaction {
                    title: "100% cotton".to_owned(),
                    ..sample_transaction(1, 1.0, in_month(3))
                },
                Transaction {
                    title: "1000 cotton buds".to_owned(),
                    ..sample_transaction(2, 1.0, in_month(3))
                },
            ],
            &conn,
        );

        let page = list_transactions(
            TransactionFilter {
                month: Some(3),
                search: Some("0%"),
            },
            first_page(10),
            &conn,
        )
        .unwrap();

        let ids: Vec<_> = page.transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("shirt"), "%shirt%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn leading_number_parses_prefix() {
        assert_eq!(leading_number("150"), 150.0);
        assert_eq!(leading_number("  329.85"), 329.85);
        assert_eq!(leading_number("12.5kg"), 12.5);
        assert_eq!(leading_number("-3"), -3.0);
        assert_eq!(leading_number(".5"), 0.5);
        assert_eq!(leading_number("5."), 5.0);
        assert_eq!(leading_number("1e3"), 1000.0);
        assert_eq!(leading_number("2e"), 2.0);
    }

    #[test]
    fn leading_number_defaults_to_zero() {
        assert_eq!(leading_number("shirt"), 0.0);
        assert_eq!(leading_number(""), 0.0);
        assert_eq!(leading_number("-"), 0.0);
        assert_eq!(leading_number("."), 0.0);
        assert_eq!(leading_number("$5"), 0.0);
    }
}
