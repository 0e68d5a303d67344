//! Database queries for listing transactions by month.

use rusqlite::Connection;

use crate::{Error, month::SaleMonth};

use super::core::{TRANSACTION_COLUMNS, TransactionRecord, map_transaction_row};

/// A `WHERE` condition that keeps rows whose date of sale falls in the month
/// bound to `?1`, or every row when `?1` is NULL.
///
/// SQLite's `substr` is 1-based, so characters 6 and 7 of `YYYY-MM` are the month.
pub(crate) const MONTH_CONDITION: &str = "(?1 IS NULL OR substr(date_of_sale, 6, 2) = ?1)";

/// The SQL parameter to bind to `?1` in [MONTH_CONDITION].
pub(crate) fn month_parameter(month: Option<SaleMonth>) -> Option<String> {
    month.map(SaleMonth::as_two_digits)
}

/// Get the transactions sold in `month`, or all transactions if `month` is `None`.
///
/// Transactions are sorted by date of sale in ascending order, with
/// transactions from the same month kept in the order they were inserted.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn get_transactions(
    month: Option<SaleMonth>,
    connection: &Connection,
) -> Result<Vec<TransactionRecord>, Error> {
    let query = format!(
        "SELECT {TRANSACTION_COLUMNS} FROM sale_transaction \
        WHERE {MONTH_CONDITION} \
        ORDER BY date_of_sale ASC, row_id ASC"
    );

    connection
        .prepare(&query)?
        .query_map([month_parameter(month)], map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}
