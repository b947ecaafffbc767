//! Date inputs accepted from clients.
//!
//! Requests may send a date either as epoch milliseconds or as text
//! (RFC 3339, or a bare `YYYY-MM-DD` taken as UTC midnight). Responses always
//! use epoch milliseconds.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// A client-supplied date value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Millis(i64),
    Text(String),
}

impl DateInput {
    /// `true` for `0` and `""`, which count as "not supplied".
    pub fn is_blank(&self) -> bool {
        match self {
            DateInput::Millis(ms) => *ms == 0,
            DateInput::Text(s) => s.trim().is_empty(),
        }
    }

    /// Parse into a UTC timestamp.
    pub fn to_timestamp(&self, field: &str) -> Result<Timestamp, CoreError> {
        let invalid = || CoreError::Validation(format!("Invalid date for '{field}'"));
        match self {
            DateInput::Millis(ms) => Utc.timestamp_millis_opt(*ms).single().ok_or_else(invalid),
            DateInput::Text(s) => {
                let s = s.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    return Ok(dt.with_timezone(&Utc));
                }
                let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
                let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
                Ok(Utc.from_utc_datetime(&midnight))
            }
        }
    }
}

/// Parse an optional update field, treating blank values as absent.
pub fn optional(input: Option<&DateInput>, field: &str) -> Result<Option<Timestamp>, CoreError> {
    match input {
        Some(value) if !value.is_blank() => value.to_timestamp(field).map(Some),
        _ => Ok(None),
    }
}

/// Parse a field that must be present on create.
pub fn required(input: Option<&DateInput>, field: &str) -> Result<Timestamp, CoreError> {
    optional(input, field)?
        .ok_or_else(|| CoreError::Validation(format!("'{field}' is required")))
}
