//! The calendar month filter shared by every query.
//!
//! Transactions are selected by the month (1-12) of their date of sale in UTC,
//! regardless of year.

use serde::Deserialize;
use time::Month;

/// SQL condition that keeps the rows sold in the month bound to `:month`.
///
/// Binding `NULL` to `:month` makes the comparison `NULL`, so no row matches.
pub(crate) const MONTH_CONDITION: &str =
    "CAST(strftime('%m', date_of_sale) AS INTEGER) = :month";

/// Query parameters for routes that only filter by month.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct MonthQuery {
    /// The month of the year, 1 for January. A missing month matches nothing.
    pub month: Option<u8>,
}

/// The months of the year in calendar order, paired with their number.
pub(crate) fn all_months() -> impl Iterator<Item = (u8, Month)> {
    (1..=12).filter_map(|number| Month::try_from(number).ok().map(|month| (number, month)))
}
