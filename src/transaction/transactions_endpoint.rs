use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{
    Error,
    app_state::DatabaseState,
    month::{MonthQuery, month_filter},
};

use super::{TransactionRecord, get_transactions};

/// List every transaction sold in the requested month, oldest first.
///
/// Without a (valid) `month` parameter, every transaction is returned.
pub async fn get_transactions_endpoint(
    State(state): State<DatabaseState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<TransactionRecord>>, Error> {
    let month = month_filter(query);
    let connection = state.connection()?;

    let transactions = get_transactions(month, &connection)
        .inspect_err(|error| tracing::error!("could not fetch transactions: {error}"))?;

    Ok(Json(transactions))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        app_state::DatabaseState,
        db::initialize,
        endpoints,
        transaction::{TransactionRecord, insert_transactions, test_utils::record},
    };

    use super::get_transactions_endpoint;

    fn get_test_server(records: &[TransactionRecord]) -> TestServer {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        insert_transactions(records, &connection).unwrap();

        let state = DatabaseState {
            db_connection: Arc::new(Mutex::new(connection)),
        };
        let app = Router::new()
            .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
            .with_state(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    fn scenario_records() -> Vec<TransactionRecord> {
        vec![
            record(1, "2022-03", 50.0, true),
            record(2, "2022-03", 150.0, false),
            record(3, "2022-07", 999.0, true),
        ]
    }

    #[tokio::test]
    async fn lists_only_the_requested_month() {
        let server = get_test_server(&scenario_records());

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "03")
            .await;

        response.assert_status_ok();
        let got: Vec<TransactionRecord> = response.json();
        assert_eq!(got, scenario_records()[..2]);
    }

    #[tokio::test]
    async fn lists_everything_without_month() {
        let server = get_test_server(&scenario_records());

        let got: Vec<TransactionRecord> = server.get(endpoints::TRANSACTIONS).await.json();

        assert_eq!(got, scenario_records());
    }

    #[tokio::test]
    async fn malformed_month_is_ignored() {
        let server = get_test_server(&scenario_records());

        for month in ["3", "13", "March", ""] {
            let response = server
                .get(endpoints::TRANSACTIONS)
                .add_query_param("month", month)
                .await;

            response.assert_status_ok();
            let got: Vec<TransactionRecord> = response.json();
            assert_eq!(got.len(), 3, "month {month:?}");
        }
    }

    #[tokio::test]
    async fn uses_camel_case_field_names() {
        let server = get_test_server(&scenario_records()[..1]);

        let got: serde_json::Value = server.get(endpoints::TRANSACTIONS).await.json();

        assert_eq!(got[0]["dateOfSale"], "2022-03");
        assert_eq!(got[0]["id"], 1);
        assert_eq!(got[0]["sold"], true);
        assert_eq!(got[0]["price"], 50.0);
    }
}
