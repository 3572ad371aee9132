//! Table views for the dashboard.
//!
//! Provides the transaction table, the monthly statistics summary and the
//! controls for paging through the table.

use maud::{Markup, html};
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    analytics::Statistics,
    html::{LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_price},
    pagination::PageNavigation,
    transaction::Transaction,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

const PAGE_BUTTON_STYLE: &str = "inline-flex items-center rounded px-3 py-2 text-sm";
const PAGE_BUTTON_DISABLED_STYLE: &str =
    "inline-flex items-center rounded px-3 py-2 text-sm text-gray-400 dark:text-gray-500";

fn format_date(date: OffsetDateTime) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.date().to_string())
}

pub(super) fn transactions_table(transactions: &[Transaction]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow w-full" {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                thead class=(TABLE_HEADER_STYLE) {
                    tr {
                        th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Sold" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date of Sale" }
                    }
                }

                tbody {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE) {
                            td class=(TABLE_CELL_STYLE) { (transaction.id) }
                            th
                                scope="row"
                                class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
                            {
                                (transaction.title)
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.description) }
                            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} {
                                (format_price(transaction.price))
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.category) }
                            td class=(TABLE_CELL_STYLE) {
                                @if transaction.sold { "Yes" } @else { "No" }
                            }
                            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} {
                                time datetime=(transaction.date_of_sale.date()) {
                                    (format_date(transaction.date_of_sale))
                                }
                            }
                        }
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE) {
                            td colspan="7" class={(TABLE_CELL_STYLE) " text-center"} {
                                "No transactions found."
                            }
                        }
                    }
                }
            }
        }
    }
}

pub(super) fn statistics_view(month_name: &str, statistics: &Statistics) -> Markup {
    html! {
        section id="statistics" class="w-full mb-4" {
            h2 class="text-xl font-semibold mb-4" { "Statistics - " (month_name) }

            dl class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                div class="p-4 rounded-lg shadow bg-white dark:bg-gray-800" {
                    dt class="text-sm text-gray-500 dark:text-gray-400" { "Total sale" }
                    dd class="text-2xl font-bold" { (format_price(statistics.total_sale_amount)) }
                }
                div class="p-4 rounded-lg shadow bg-white dark:bg-gray-800" {
                    dt class="text-sm text-gray-500 dark:text-gray-400" { "Total sold items" }
                    dd class="text-2xl font-bold" { (statistics.total_sold_items) }
                }
                div class="p-4 rounded-lg shadow bg-white dark:bg-gray-800" {
                    dt class="text-sm text-gray-500 dark:text-gray-400" { "Total not sold items" }
                    dd class="text-2xl font-bold" { (statistics.total_not_sold_items) }
                }
            }
        }
    }
}

/// Renders the previous/next controls under the table.
///
/// `page_url` gives the URL that loads a page of the current selection.
/// A page count of zero is shown as "Page 1 of 1".
pub(super) fn pagination_view(
    navigation: PageNavigation,
    page_url: impl Fn(u32) -> Option<String>,
) -> Markup {
    let previous = navigation.previous().and_then(&page_url);
    let next = navigation.next().and_then(&page_url);

    html! {
        nav class="pagination flex justify-center w-full my-4" {
            ul class="pagination flex items-center justify-between w-full max-w-md px-2 py-2" {
                li {
                    @if let Some(href) = previous {
                        a
                            href=(href)
                            hx-get=(href)
                            hx-target="#dashboard-content"
                            hx-push-url="true"
                            role="button"
                            class={(PAGE_BUTTON_STYLE) " " (LINK_STYLE)}
                        { "Previous" }
                    } @else {
                        button type="button" disabled class=(PAGE_BUTTON_DISABLED_STYLE) { "Previous" }
                    }
                }

                li class="font-semibold text-gray-900 dark:text-white" {
                    span aria-current="page" {
                        "Page " (navigation.page) " of " (navigation.page_count.max(1))
                    }
                }

                li {
                    @if let Some(href) = next {
                        a
                            href=(href)
                            hx-get=(href)
                            hx-target="#dashboard-content"
                            hx-push-url="true"
                            role="button"
                            class={(PAGE_BUTTON_STYLE) " " (LINK_STYLE)}
                        { "Next" }
                    } @else {
                        button type="button" disabled class=(PAGE_BUTTON_DISABLED_STYLE) { "Next" }
                    }
                }
            }
        }
    }
}
