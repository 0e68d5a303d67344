//! A histogram of transaction prices over fixed price ranges.
//!
//! There are ten buckets. The first covers prices from 0 to 100, the next
//! eight each cover the following hundred, and the last covers everything
//! above 900. Each bucket starts just above the previous bucket's upper bound,
//! so a price such as 100.5 lands in "101 - 200" rather than in no bucket.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    app_state::DatabaseState,
    month::{MonthQuery, SaleMonth, month_filter},
    transaction::{MONTH_CONDITION, month_parameter},
};

/// A price interval used for counting transactions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    /// The lower bound shown in the bucket's label.
    pub min: u32,
    /// The inclusive upper bound, or `None` if the bucket has no upper bound.
    pub max: Option<u32>,
}

impl PriceBucket {
    const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// The label for the bucket, e.g. "101 - 200" or "901 - Infinity".
    pub fn label(&self) -> String {
        match self.max {
            Some(max) => format!("{} - {}", self.min, max),
            None => format!("{} - Infinity", self.min),
        }
    }
}

/// The histogram buckets in ascending order.
pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket::new(0, Some(100)),
    PriceBucket::new(101, Some(200)),
    PriceBucket::new(201, Some(300)),
    PriceBucket::new(301, Some(400)),
    PriceBucket::new(401, Some(500)),
    PriceBucket::new(501, Some(600)),
    PriceBucket::new(601, Some(700)),
    PriceBucket::new(701, Some(800)),
    PriceBucket::new(801, Some(900)),
    PriceBucket::new(901, None),
];

/// The number of transactions whose price falls within a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    /// The bucket label, e.g. "0 - 100".
    pub range: String,
    /// How many transactions fall in the bucket.
    pub count: u32,
}

/// Count the transactions in each of the [PRICE_BUCKETS] for `month`, or for
/// every transaction if `month` is `None`.
///
/// Always returns one entry per bucket, in bucket order.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_price_range_counts(
    month: Option<SaleMonth>,
    connection: &Connection,
) -> Result<Vec<PriceRangeCount>, Error> {
    // Bucket index is the number of upper bounds strictly below the price.
    let bucket_index = PRICE_BUCKETS
        .iter()
        .filter_map(|bucket| bucket.max)
        .map(|max| format!("(price > {max})"))
        .collect::<Vec<_>>()
        .join(" + ");

    let query = format!(
        "SELECT {bucket_index} AS bucket, COUNT(*)
        FROM sale_transaction
        WHERE {MONTH_CONDITION}
        GROUP BY bucket"
    );

    let mut counts = [0u32; PRICE_BUCKETS.len()];

    let mut statement = connection.prepare(&query)?;
    let rows = statement.query_map([month_parameter(month)], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, u32>(1)?))
    })?;

    for row in rows {
        let (bucket, count) = row?;
        counts[bucket as usize] = count;
    }

    Ok(PRICE_BUCKETS
        .iter()
        .zip(counts)
        .map(|(bucket, count)| PriceRangeCount {
            range: bucket.label(),
            count,
        })
        .collect())
}

/// Get the price-range histogram for the requested month.
pub async fn get_price_range_endpoint(
    State(state): State<DatabaseState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<PriceRangeCount>>, Error> {
    let month = month_filter(query);
    let connection = state.connection()?;

    let counts = get_price_range_counts(month, &connection)
        .inspect_err(|error| tracing::error!("could not count price ranges: {error}"))?;

    Ok(Json(counts))
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
        month::SaleMonth,
        transaction::{TransactionRecord, get_transactions, insert_transactions, test_utils::record},
    };

    use super::{PRICE_BUCKETS, PriceRangeCount, get_price_range_counts, get_price_range_endpoint};

    fn get_test_connection(records: &[TransactionRecord]) -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        insert_transactions(records, &connection).unwrap();
        connection
    }

    fn count_for(counts: &[PriceRangeCount], range: &str) -> u32 {
        counts
            .iter()
            .find(|count| count.range == range)
            .unwrap_or_else(|| panic!("no bucket labelled {range}"))
            .count
    }

    #[test]
    fn labels_are_in_bucket_order() {
        let labels: Vec<String> = PRICE_BUCKETS.iter().map(|bucket| bucket.label()).collect();

        assert_eq!(
            labels,
            [
                "0 - 100",
                "101 - 200",
                "201 - 300",
                "301 - 400",
                "401 - 500",
                "501 - 600",
                "601 - 700",
                "701 - 800",
                "801 - 900",
                "901 - Infinity",
            ]
        );
    }

    #[test]
    fn empty_store_has_ten_zero_buckets() {
        let connection = get_test_connection(&[]);

        let got = get_price_range_counts(None, &connection).unwrap();

        assert_eq!(got.len(), 10);
        assert!(got.iter().all(|count| count.count == 0));
    }

    #[test]
    fn counts_for_month() {
        let connection = get_test_connection(&[
            record(1, "2022-03", 50.0, true),
            record(2, "2022-03", 150.0, false),
            record(3, "2022-07", 999.0, true),
        ]);

        let got = get_price_range_counts(Some(SaleMonth::MARCH), &connection).unwrap();

        assert_eq!(count_for(&got, "0 - 100"), 1);
        assert_eq!(count_for(&got, "101 - 200"), 1);
        assert_eq!(got.iter().map(|count| count.count).sum::<u32>(), 2);
    }

    #[test]
    fn boundaries_fall_in_exactly_one_bucket() {
        let connection = get_test_connection(&[
            record(1, "2022-03", 0.0, true),
            record(2, "2022-03", 100.0, true),
            record(3, "2022-03", 100.5, true),
            record(4, "2022-03", 101.0, true),
            record(5, "2022-03", 900.0, true),
            record(6, "2022-03", 900.01, true),
            record(7, "2022-03", 901.0, true),
            record(8, "2022-03", 25_000.0, true),
        ]);

        let got = get_price_range_counts(None, &connection).unwrap();

        assert_eq!(count_for(&got, "0 - 100"), 2);
        assert_eq!(count_for(&got, "101 - 200"), 2);
        assert_eq!(count_for(&got, "801 - 900"), 1);
        assert_eq!(count_for(&got, "901 - Infinity"), 3);
        assert_eq!(got.iter().map(|count| count.count).sum::<u32>(), 8);
    }

    #[test]
    fn counts_sum_to_transaction_count_for_every_month() {
        let connection = get_test_connection(&[
            record(1, "2022-01", 10.0, true),
            record(2, "2022-01", 310.0, false),
            record(3, "2021-06", 450.0, true),
            record(4, "2022-06", 1450.0, false),
            record(5, "2022-12", 0.99, true),
        ]);

        for month in SaleMonth::all().map(Some).chain([None]) {
            let counts = get_price_range_counts(month, &connection).unwrap();
            let transactions = get_transactions(month, &connection).unwrap();

            assert_eq!(
                counts.iter().map(|count| count.count as usize).sum::<usize>(),
                transactions.len(),
                "month {month:?}"
            );
        }
    }

    #[tokio::test]
    async fn endpoint_returns_all_buckets() {
        let connection = get_test_connection(&[record(1, "2022-07", 999.0, true)]);
        let state = DatabaseState {
            db_connection: Arc::new(Mutex::new(connection)),
        };
        let app = Router::new()
            .route(endpoints::PRICE_RANGE, get(get_price_range_endpoint))
            .with_state(state);
        let server = TestServer::new(app).expect("Could not create test server.");

        let response = server
            .get(endpoints::PRICE_RANGE)
            .add_query_param("month", "07")
            .await;

        response.assert_status_ok();
        let got: Vec<PriceRangeCount> = response.json();
        assert_eq!(got.len(), 10);
        assert_eq!(got[0].range, "0 - 100");
        assert_eq!(
            got[9],
            PriceRangeCount {
                range: "901 - Infinity".to_owned(),
                count: 1,
            }
        );
    }
}
