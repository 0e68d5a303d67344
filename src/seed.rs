//! Seeding the database with transactions fetched from a third-party JSON file.
//!
//! Seeding is not idempotent. Every call appends the fetched transactions, so
//! seeding twice stores every transaction twice.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::{
    AppState, Error,
    app_state::DatabaseState,
    month::is_year_month,
    timezone::get_offset_at,
    transaction::{TransactionRecord, insert_transactions},
};

/// A transaction as it appears in the seed data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedItem {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    title: String,
    price: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    image: String,
    sold: bool,
    date_of_sale: String,
}

impl SeedItem {
    /// Convert the item into a record ready for the store.
    ///
    /// # Errors
    /// Returns an [Error::InvalidDate] if the date of sale cannot be
    /// normalized, or an [Error::InvalidRecord] if the record is invalid.
    fn into_record(self, local_timezone: &str) -> Result<TransactionRecord, Error> {
        let record = TransactionRecord {
            date_of_sale: normalize_date_of_sale(&self.date_of_sale, local_timezone)?,
            id: self.id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
            sold: self.sold,
        };

        record.validate()?;

        Ok(record)
    }
}

/// Reduce a date of sale to its year and month, e.g. "2021-11-27T20:29:54+05:30" to "2021-11".
///
/// Timestamps with a UTC offset are converted to `local_timezone` first, so a
/// sale late on the last day of a month may count towards the next month.
/// Dates and timestamps without an offset keep their own month, and values
/// already in `YYYY-MM` form are returned unchanged.
///
/// # Errors
/// Returns [Error::InvalidDate] if `date_of_sale` is not in one of the
/// supported forms, or [Error::InvalidTimezone] if `local_timezone` is not a
/// canonical timezone name.
pub fn normalize_date_of_sale(date_of_sale: &str, local_timezone: &str) -> Result<String, Error> {
    let date_of_sale = date_of_sale.trim();

    let date = if let Ok(date_time) = OffsetDateTime::parse(date_of_sale, &Rfc3339) {
        let offset = get_offset_at(local_timezone, &date_time)
            .ok_or_else(|| Error::InvalidTimezone(local_timezone.to_owned()))?;
        date_time.to_offset(offset).date()
    } else if let Ok(date_time) = PrimitiveDateTime::parse(
        date_of_sale,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        date_time.date()
    } else if let Ok(date) = Date::parse(date_of_sale, format_description!("[year]-[month]-[day]"))
    {
        date
    } else if is_year_month(date_of_sale) {
        return Ok(date_of_sale.to_owned());
    } else {
        return Err(Error::InvalidDate(date_of_sale.to_owned()));
    };

    date.format(format_description!("[year]-[month]"))
        .map_err(|_| Error::InvalidDate(date_of_sale.to_owned()))
}

/// Fetch the seed data from `url`.
///
/// # Errors
/// Returns [Error::SeedFetch] if the request fails, the server does not
/// respond with a success status, or the body is not a JSON array of seed items.
pub async fn fetch_seed_items(client: &reqwest::Client, url: &str) -> Result<Vec<SeedItem>, Error> {
    tracing::debug!("fetching seed data from {url}");

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(Error::SeedFetch(format!(
            "{url} responded with status {}",
            response.status()
        )));
    }

    let items = response.json::<Vec<SeedItem>>().await?;

    Ok(items)
}

/// Fetch the seed data and append it to the database.
///
/// Every item is normalized before anything is inserted, so a bad date of
/// sale leaves the database untouched. A failure during the insert itself
/// keeps whatever was inserted before it.
///
/// Returns the number of transactions inserted.
///
/// # Errors
/// Returns an error if fetching, normalizing or inserting fails.
pub async fn seed_database(state: &AppState) -> Result<usize, Error> {
    let items = fetch_seed_items(&state.http_client, &state.seed_url).await?;

    let records = items
        .into_iter()
        .map(|item| item.into_record(&state.local_timezone))
        .collect::<Result<Vec<_>, _>>()?;

    let database = DatabaseState::from_ref(state);
    let connection = database.connection()?;

    insert_transactions(&records, &connection)
}

/// Seed the database from the configured seed URL.
///
/// Responds with plain text in both the success and failure case.
pub async fn init_db_endpoint(State(state): State<AppState>) -> Response {
    match seed_database(&state).await {
        Ok(count) => {
            tracing::info!("seeded the database with {count} transactions");
            (StatusCode::OK, "Database initialized with seed data").into_response()
        }
        Err(error) => {
            tracing::error!("Error initializing the database: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error initializing the database",
            )
                .into_response()
        }
    }
}
