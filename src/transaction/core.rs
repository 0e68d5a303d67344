//! Defines the transaction record and the store functions for writing and counting records.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, month::is_year_month};

// ============================================================================
// MODELS
// ============================================================================

/// A product listing and whether it sold, as imported from the seed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// The identifier from the seed data.
    ///
    /// This is passed through as-is. It is not guaranteed to be unique and is
    /// never used to look up records.
    pub id: Option<i64>,
    /// The product name.
    pub title: String,
    /// The sale price. Never negative.
    pub price: f64,
    /// A longer text description of the product.
    pub description: String,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// A URL to an image of the product.
    pub image: String,
    /// Whether the product sold.
    pub sold: bool,
    /// The year and month of the sale in `YYYY-MM` form, e.g. "2022-03".
    pub date_of_sale: String,
}

impl TransactionRecord {
    /// Check the invariants the store relies on.
    ///
    /// # Errors
    /// Returns [Error::InvalidRecord] if the price is negative or not a
    /// finite number, or if the date of sale is not in `YYYY-MM` form.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::InvalidRecord(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }

        if !is_year_month(&self.date_of_sale) {
            return Err(Error::InvalidRecord(format!(
                "date of sale must have the form YYYY-MM, got {:?}",
                self.date_of_sale
            )));
        }

        Ok(())
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns of a [TransactionRecord], in the order [map_transaction_row] reads them.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "source_id, title, price, description, category, image, sold, date_of_sale";

/// Create the transaction table in the database.
///
/// The table has its own row ID so that the order records were inserted in
/// can be recovered. The source ID is stored in a separate, non-unique column.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sale_transaction (
                row_id INTEGER PRIMARY KEY AUTOINCREMENT,
                source_id INTEGER,
                title TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                image TEXT NOT NULL,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL
                    CHECK (date_of_sale GLOB '[0-9][0-9][0-9][0-9]-[0-1][0-9]')
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_sale_transaction_date_of_sale
            ON sale_transaction(date_of_sale)",
        (),
    )?;

    Ok(())
}

/// Insert `records` into the database one at a time.
///
/// There is no enclosing SQL transaction: if a record fails validation or the
/// insert fails, the error is returned and the records inserted before it
/// remain in the database.
///
/// Returns the number of records inserted.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidRecord] if a record does not pass [TransactionRecord::validate],
/// - or [Error::SqlError] if there is some SQL error.
pub fn insert_transactions(
    records: &[TransactionRecord],
    connection: &Connection,
) -> Result<usize, Error> {
    let mut statement = connection.prepare(&format!(
        "INSERT INTO sale_transaction ({TRANSACTION_COLUMNS})
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
    ))?;

    let mut inserted = 0;

    for record in records {
        record.validate()?;

        statement.execute((
            record.id,
            &record.title,
            record.price,
            &record.description,
            &record.category,
            &record.image,
            record.sold,
            &record.date_of_sale,
        ))?;

        inserted += 1;
    }

    Ok(inserted)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(row_id) FROM sale_transaction;", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Map a database row to a [TransactionRecord].
///
/// The row must contain the columns in [TRANSACTION_COLUMNS], in that order.
pub fn map_transaction_row(row: &Row) -> Result<TransactionRecord, rusqlite::Error> {
    Ok(TransactionRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        sold: row.get(6)?,
        date_of_sale: row.get(7)?,
    })
}
