//! Dashboard HTTP handler and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for the full page and the htmx content fragment
//! - The state and query types used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    AppState, Error,
    analytics::{CombinedData, get_combined_data},
    dashboard::{
        charts::{DashboardChart, category_chart, charts_view, price_range_chart},
        tables::{pagination_view, statistics_view, transactions_table},
    },
    db::lock_connection,
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base,
    },
    month::all_months,
    pagination::{PageNavigation, PaginationConfig},
    transaction::ListQuery,
};

/// The month shown when the request does not pick one.
const DEFAULT_MONTH: u8 = 3;

const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The default page and page size of the transaction table.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The dashboard's query parameters, e.g. `?month=3&search=shirt&page=2`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// The month of the year, 1 for January.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    /// Optional search term for the transaction table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// The page of the transaction table, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// The selection the dashboard is rendered for.
struct Selection<'a> {
    month: u8,
    search: &'a str,
}

impl Selection<'_> {
    fn month_name(&self) -> String {
        Month::try_from(self.month)
            .map(|month| month.to_string())
            .unwrap_or_else(|_| format!("Month {}", self.month))
    }

    /// The dashboard URL for `page` of this selection.
    fn page_url(&self, page: u32) -> Option<String> {
        let query = DashboardQuery {
            month: Some(self.month),
            search: (!self.search.is_empty()).then(|| self.search.to_owned()),
            page: Some(page),
        };

        match serde_urlencoded::to_string(&query) {
            Ok(query) => Some(format!("{}?{query}", endpoints::DASHBOARD_VIEW)),
            Err(error) => {
                tracing::error!("Could not encode dashboard query {query:?}: {error}");
                None
            }
        }
    }
}

/// Display the transactions, statistics and charts for a month.
///
/// Requests made by htmx only get the content below the filter controls, so
/// the controls keep their state while the content is swapped.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let selection = Selection {
        month: query.month.unwrap_or(DEFAULT_MONTH),
        search: query.search.as_deref().unwrap_or_default(),
    };
    let list_query = ListQuery {
        month: Some(selection.month),
        search: query.search.clone(),
        page: query.page,
        per_page: None,
    };

    let data = {
        let connection = lock_connection(&state.db_connection)?;
        get_combined_data(&list_query, &state.pagination_config, &connection)
            .inspect_err(|error| tracing::error!("Could not get dashboard data: {error}"))?
    };

    let content = dashboard_content(&selection, &data);

    if is_htmx_request {
        return Ok(content.into_response());
    }

    Ok(dashboard_view(&selection, &content).into_response())
}

/// Renders the full dashboard page with the filter controls.
fn dashboard_view(selection: &Selection, content: &Markup) -> Markup {
    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-6" { "Transaction Dashboard" }

            (filter_form(selection))

            div
                id="dashboard-content"
                class="flex flex-col items-center w-full max-w-screen-xl mx-auto"
            {
                (content)
            }
        }
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned())];

    base("Dashboard", &scripts, &content)
}

/// Renders the month and search controls.
///
/// The form has no page field, so any change starts again from page 1.
fn filter_form(selection: &Selection) -> Markup {
    html!(
        form
            action=(endpoints::DASHBOARD_VIEW)
            method="get"
            hx-get=(endpoints::DASHBOARD_VIEW)
            hx-target="#dashboard-content"
            hx-trigger="submit, change, keyup changed delay:300ms from:#search"
            hx-push-url="true"
            class="grid grid-cols-1 sm:grid-cols-2 gap-4 w-full max-w-screen-xl mb-6"
        {
            div
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search transactions" }

                input
                    type="search"
                    name="search"
                    id="search"
                    placeholder="Title, description or price"
                    value=(selection.search)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                select name="month" id="month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (number, month) in all_months() {
                        option value=(number) selected[number == selection.month] { (month) }
                    }
                }
            }
        }
    )
}

/// Renders the statistics, table, pagination and charts for htmx swaps.
fn dashboard_content(selection: &Selection, data: &CombinedData) -> Markup {
    let page = &data.transactions;
    let navigation = PageNavigation {
        page: page.page,
        page_count: page.total_pages,
    };
    let charts = [
        DashboardChart {
            id: "price-range-chart",
            options: price_range_chart(&data.bar_chart_data).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(&data.pie_chart_data).to_string(),
        },
    ];

    html!(
        (statistics_view(&selection.month_name(), &data.statistics))

        section id="transactions" class="w-full mb-4"
        {
            (transactions_table(&page.transactions))
            (pagination_view(navigation, |page| selection.page_url(page)))
        }

        (charts_view(&charts))
    )
}
