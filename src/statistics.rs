//! Sale totals for a month.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    Error,
    app_state::DatabaseState,
    month::{MonthQuery, SaleMonth, month_filter},
    transaction::{MONTH_CONDITION, month_parameter},
};

/// Totals over the transactions in a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the prices of every transaction, whether it sold or not.
    pub total_sale_amount: f64,
    /// The number of transactions that sold.
    pub total_sold_items: u32,
    /// The number of transactions that did not sell.
    pub total_not_sold_items: u32,
}

/// Calculate the [Statistics] for `month`, or for every transaction if `month` is `None`.
///
/// The total sale amount is zero when no transactions match.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_statistics(
    month: Option<SaleMonth>,
    connection: &Connection,
) -> Result<Statistics, Error> {
    let query = format!(
        "SELECT
            COALESCE(SUM(price), 0.0),
            COALESCE(SUM(CASE WHEN sold THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN sold THEN 0 ELSE 1 END), 0)
        FROM sale_transaction
        WHERE {MONTH_CONDITION}"
    );

    let statistics = connection.query_row(&query, [month_parameter(month)], |row| {
        Ok(Statistics {
            total_sale_amount: row.get(0)?,
            total_sold_items: row.get(1)?,
            total_not_sold_items: row.get(2)?,
        })
    })?;

    Ok(statistics)
}

/// Get the sale totals for the requested month.
pub async fn get_statistics_endpoint(
    State(state): State<DatabaseState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Statistics>, Error> {
    let month = month_filter(query);
    let connection = state.connection()?;

    let statistics = get_statistics(month, &connection)
        .inspect_err(|error| tracing::error!("could not calculate statistics: {error}"))?;

    Ok(Json(statistics))
}
