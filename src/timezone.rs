use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get the UTC offset of `canonical_timezone` at the instant `date_time`.
///
/// Returns `None` if `canonical_timezone` is not a known timezone name.
pub fn get_offset_at(canonical_timezone: &str, date_time: &OffsetDateTime) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(date_time).to_utc())
}

/// Check that `canonical_timezone` names a real timezone, e.g. "Pacific/Auckland".
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the name is not recognised.
pub fn validate_timezone(canonical_timezone: &str) -> Result<(), Error> {
    match time_tz::timezones::get_by_name(canonical_timezone) {
        Some(_) => Ok(()),
        None => Err(Error::InvalidTimezone(canonical_timezone.to_owned())),
    }
}
