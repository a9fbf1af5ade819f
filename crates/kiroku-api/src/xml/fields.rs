//! Field parsers and formatters for the service's value conventions.
//!
//! Wire structs keep every value as raw text; these functions turn that
//! text into typed values while building the domain records.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::MalError;

const WIRE_DATE: &str = "%Y-%m-%d";
const PAYLOAD_DATE: &str = "%m%d%Y";
const UNSET_PAYLOAD_DATE: &str = "00000000";

/// Parse a `YYYY-MM-DD` date.
///
/// The service emits `0000-00-00`, partial dates and empty strings for
/// series with unknown airing dates, so anything unparsable is unset.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), WIRE_DATE).ok()
}

/// Parse a Unix epoch-seconds timestamp.
pub fn parse_timestamp(raw: &str, field: &str) -> Result<DateTime<Utc>, MalError> {
    let secs: i64 = raw
        .trim()
        .parse()
        .map_err(|_| MalError::malformed(format!("{field}: invalid timestamp {raw:?}")))?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| MalError::malformed(format!("{field}: timestamp out of range {raw:?}")))
}

/// Parse a decimal number, treating an empty element as zero.
pub fn parse_number<T>(raw: &str, field: &str) -> Result<T, MalError>
where
    T: FromStr + Default,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse()
        .map_err(|_| MalError::malformed(format!("{field}: invalid number {raw:?}")))
}

/// Parse an enumeration code. Unlike plain numbers an empty value is an
/// error; any integer is accepted.
pub fn parse_code(raw: &str, field: &str) -> Result<i32, MalError> {
    raw.trim()
        .parse()
        .map_err(|_| MalError::malformed(format!("{field}: invalid code {raw:?}")))
}

/// Format a payload date as `MMDDYYYY`; unset dates become `00000000`.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format(PAYLOAD_DATE).to_string(),
        None => UNSET_PAYLOAD_DATE.to_string(),
    }
}

pub fn format_flag(flag: bool) -> String {
    let bit = if flag { "1" } else { "0" };
    bit.to_string()
}

/// Join tags into the single comma-separated element the service expects.
///
/// Commas inside a tag are not escaped.
pub fn format_tags(tags: &[String]) -> String {
    tags.join(",")
}
