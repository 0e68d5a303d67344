//! Helpers for building transaction records in tests.

use super::TransactionRecord;

/// Create a record with the fields that matter for queries and placeholder text for the rest.
pub fn record(id: i64, date_of_sale: &str, price: f64, sold: bool) -> TransactionRecord {
    TransactionRecord {
        id: Some(id),
        title: format!("Product #{id}"),
        price,
        description: format!("Description of product #{id}"),
        category: "electronics".to_owned(),
        image: format!("https://example.com/images/{id}.jpg"),
        sold,
        date_of_sale: date_of_sale.to_owned(),
    }
}
