//! Conversions between domain values and their `TEXT` column form.

use std::str::FromStr;

use chrono::SecondsFormat;

use postboard_domain::time::{Timestamp, parse_rfc3339};

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
pub(crate) fn timestamp(value: Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    parse_rfc3339(value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

pub(crate) fn parse_id<T>(value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Clamp a page bound into the signed range `SQLite` binds.
pub(crate) fn bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub(crate) fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}
