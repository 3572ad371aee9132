//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the transactions table and charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route that replaces the stored transactions with the feed contents.
pub const INITIALIZE_DB: &str = "/api/initialize-db";
/// The route to list a month of transactions, one page at a time.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for the sales totals of a month.
pub const STATISTICS_API: &str = "/api/statistics";
/// The route for the price-range histogram of a month.
pub const BAR_CHART_API: &str = "/api/bar-chart";
/// The route for the category breakdown of a month.
pub const PIE_CHART_API: &str = "/api/pie-chart";
/// The route that bundles the four read routes above into one response.
pub const COMBINED_DATA_API: &str = "/api/combined-data";
