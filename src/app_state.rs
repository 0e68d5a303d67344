//! Implements a struct that holds the state of the REST server.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{Error, db::initialize, timezone::validate_timezone};

/// The public JSON file used to seed the database when no other URL is configured.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The client used to fetch the seed data.
    pub http_client: reqwest::Client,

    /// Where the seed data is fetched from.
    pub seed_url: String,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// Seed timestamps are converted to this timezone before their month is taken.
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    /// `fetch_timeout` bounds each request made to `seed_url`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized, the timezone is
    /// invalid, or the HTTP client cannot be built.
    pub fn new(
        db_connection: Connection,
        seed_url: &str,
        local_timezone: &str,
        fetch_timeout: Duration,
    ) -> Result<Self, Error> {
        validate_timezone(local_timezone)?;
        initialize(&db_connection)?;

        let http_client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            http_client,
            seed_url: seed_url.to_owned(),
            local_timezone: local_timezone.to_owned(),
        })
    }
}

/// The state needed by handlers that only read from the database.
#[derive(Debug, Clone)]
pub struct DatabaseState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl DatabaseState {
    /// Acquire the database connection for the duration of the returned guard.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the lock has been poisoned.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl FromRef<AppState> for DatabaseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rusqlite::Connection;

    use crate::{DEFAULT_SEED_URL, Error, transaction::count_transactions};

    use super::AppState;

    #[test]
    fn new_initializes_database() {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            DEFAULT_SEED_URL,
            "Etc/UTC",
            Duration::from_secs(1),
        )
        .unwrap();

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection).unwrap(), 0);
    }

    #[test]
    fn new_rejects_invalid_timezone() {
        let result = AppState::new(
            Connection::open_in_memory().unwrap(),
            DEFAULT_SEED_URL,
            "Middle/Earth",
            Duration::from_secs(1),
        );

        assert!(matches!(result, Err(Error::InvalidTimezone(_))));
    }
}
