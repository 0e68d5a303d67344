//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page showing the transactions, statistics and price ranges for a month.
pub const DASHBOARD_VIEW: &str = "/dashboard";

/// The route that seeds the database from the configured seed URL.
pub const INIT_DB: &str = "/init-db";
/// The route to list transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for the sale totals.
pub const STATISTICS: &str = "/statistics";
/// The route for the price-range histogram.
pub const PRICE_RANGE: &str = "/price-range";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INIT_DB);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS);
        assert_endpoint_is_valid_uri(endpoints::PRICE_RANGE);
    }
}
