//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The seed data could not be fetched or decoded.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not fetch seed data: {0}")]
    SeedFetch(String),

    /// A date of sale could not be normalized to year-month form.
    #[error("could not parse \"{0}\" as a date of sale")]
    InvalidDate(String),

    /// A transaction record does not satisfy the store's invariants, e.g. a
    /// negative price.
    #[error("invalid transaction record: {0}")]
    InvalidRecord(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The configured timezone is not a valid, canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::SeedFetch(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // None of these errors are intended to be shown to the client.
        tracing::error!("An unexpected error occurred: {}", self);

        internal_server_error_response()
    }
}

/// The JSON response sent to clients for any store or upstream failure.
pub(crate) fn internal_server_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
