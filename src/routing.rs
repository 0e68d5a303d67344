//! Application router configuration.

use axum::{Router, response::Redirect, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    not_found::get_404_not_found,
    price_range::get_price_range_endpoint,
    seed::init_db_endpoint,
    statistics::get_statistics_endpoint,
    transaction::get_transactions_endpoint,
};

/// Return a router with all the app's routes.
///
/// Any origin may call the API.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::INIT_DB, get(init_db_endpoint))
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::PRICE_RANGE, get(get_price_range_endpoint))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        AppState, DEFAULT_SEED_URL, endpoints,
        transaction::{insert_transactions, test_utils::record},
    };

    use super::build_router;

    fn get_test_state() -> AppState {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            DEFAULT_SEED_URL,
            "Etc/UTC",
            Duration::from_secs(1),
        )
        .unwrap();

        insert_transactions(
            &[
                record(1, "2022-03", 50.0, true),
                record(2, "2022-03", 150.0, false),
                record(3, "2022-07", 999.0, true),
            ],
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        state
    }

    fn get_test_server() -> TestServer {
        TestServer::new(build_router(get_test_state())).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let server = get_test_server();

        let response = server.get("/does-not-exist").await;

        response.assert_status_not_found();
        response.assert_json(&serde_json::json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn march_scenario() {
        let server = get_test_server();

        let transactions: Vec<serde_json::Value> = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "03")
            .await
            .json();
        assert_eq!(transactions.len(), 2);

        server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "03")
            .await
            .assert_json(&serde_json::json!({
                "totalSaleAmount": 200.0,
                "totalSoldItems": 1,
                "totalNotSoldItems": 1,
            }));

        let price_ranges: Vec<serde_json::Value> = server
            .get(endpoints::PRICE_RANGE)
            .add_query_param("month", "03")
            .await
            .json();
        let counts: Vec<u64> = price_ranges
            .iter()
            .map(|range| range["count"].as_u64().unwrap())
            .collect();
        assert_eq!(counts, [1, 1, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(price_ranges[0]["range"], "0 - 100");
        assert_eq!(price_ranges[1]["range"], "101 - 200");
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("http://localhost:3000"),
            )
            .await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.header("access-control-allow-origin"), "*");
    }

    #[tokio::test]
    async fn store_failure_is_json_500() {
        let state = get_test_state();
        state
            .db_connection
            .lock()
            .unwrap()
            .execute("DROP TABLE sale_transaction", ())
            .unwrap();
        let server = TestServer::new(build_router(state)).expect("Could not create test server.");

        for endpoint in [
            endpoints::TRANSACTIONS,
            endpoints::STATISTICS,
            endpoints::PRICE_RANGE,
        ] {
            let response = server.get(endpoint).add_query_param("month", "03").await;

            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            response.assert_json(&serde_json::json!({ "error": "Internal server error" }));
        }
    }
}
