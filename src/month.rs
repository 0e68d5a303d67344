//! The month filter shared by the query endpoints and the dashboard.
//!
//! Transactions store their date of sale as a `YYYY-MM` string and the filter
//! compares only the two month characters, so a filter for March matches
//! March of every year in the store.

use axum::extract::{Query, rejection::QueryRejection};
use serde::Deserialize;

/// The query string accepted by every read endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The month to filter by, e.g. "03" for March.
    pub month: Option<String>,
}

impl MonthQuery {
    /// The month filter to apply, or `None` if no month was given.
    ///
    /// Malformed months are ignored rather than rejected.
    pub fn filter(&self) -> Option<SaleMonth> {
        let raw = self.month.as_deref()?.trim();

        if raw.is_empty() {
            return None;
        }

        let month = SaleMonth::parse(raw);

        if month.is_none() {
            tracing::warn!("ignoring malformed month filter {raw:?}");
        }

        month
    }
}

/// Get the month filter from an extracted query string.
///
/// A query string that cannot be decoded at all, e.g. one that repeats the
/// `month` key, is treated the same as no filter.
pub fn month_filter(query: Result<Query<MonthQuery>, QueryRejection>) -> Option<SaleMonth> {
    match query {
        Ok(Query(query)) => query.filter(),
        Err(rejection) => {
            tracing::warn!("ignoring malformed query string: {rejection}");
            None
        }
    }
}

/// A calendar month, 1 through 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleMonth(u8);

impl SaleMonth {
    /// The month the dashboard shows when none is selected.
    pub const MARCH: SaleMonth = SaleMonth(3);

    /// Create a month from its number, e.g. 3 for March.
    pub fn new(number: u8) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self(number))
    }

    /// Parse a two digit month number, e.g. "03".
    pub fn parse(text: &str) -> Option<Self> {
        if text.len() != 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        text.parse().ok().and_then(Self::new)
    }

    /// All twelve months in calendar order.
    pub fn all() -> impl Iterator<Item = SaleMonth> {
        (1..=12).map(SaleMonth)
    }

    /// The zero-padded form stored in a date of sale, e.g. "03".
    pub fn as_two_digits(self) -> String {
        format!("{:02}", self.0)
    }

    /// The full English name of the month.
    pub fn name(self) -> &'static str {
        match self.0 {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            _ => "December",
        }
    }
}

/// Check that `date_of_sale` has the stored `YYYY-MM` form.
pub fn is_year_month(date_of_sale: &str) -> bool {
    let bytes = date_of_sale.as_bytes();

    bytes.len() == 7
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..].iter().all(u8::is_ascii_digit)
        && SaleMonth::parse(&date_of_sale[5..]).is_some()
}
