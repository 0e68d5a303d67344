//! Transaction records and the endpoint for listing them.
//!
//! This module contains everything related to transactions:
//! - The `TransactionRecord` model and its validation
//! - Database functions for storing, counting and querying transactions
//! - The handler for the transaction list endpoint

mod core;
mod query;
mod transactions_endpoint;

#[cfg(test)]
pub mod test_utils;

pub use core::{
    TransactionRecord, count_transactions, create_transaction_table, insert_transactions,
};
pub(crate) use query::{MONTH_CONDITION, get_transactions, month_parameter};
pub use transactions_endpoint::get_transactions_endpoint;
