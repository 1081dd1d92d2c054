//! Lenient deserialisers for fields whose wire shape varies between API
//! deployments.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Canonical calendar-date format used on the wire.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a due date from its wire representation.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (the calendar date is taken
/// in UTC). Blank or unparseable input yields `None`; a missing date is never
/// mapped to an epoch value.
#[must_use]
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.naive_utc().date());
    }
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, DUE_DATE_FORMAT).ok())
}

/// Deserialises an optional due date, tolerating `null`, empty strings and
/// full timestamps.
pub(crate) fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_due_date))
}

/// Deserialises a string that the server may send as `null`.
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialises an optional string, folding blank values into `None`.
pub(crate) fn deserialize_non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}
