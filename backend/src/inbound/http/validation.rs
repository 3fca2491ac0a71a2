//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Parse a path segment as a UUID.
///
/// # Errors
/// Returns an `invalid_request` error with the message `invalid UUID` when
/// the segment does not parse.
pub(crate) fn parse_uuid(field: &'static str, value: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        Error::invalid_request("invalid UUID").with_details(json!({
            "field": field,
            "value": value,
            "code": "invalid_uuid",
        }))
    })
}

/// Parse a path segment as a numeric record identifier.
///
/// # Errors
/// Returns an `invalid_request` error with the message `invalid id` when
/// the segment is not a non-negative integer.
pub(crate) fn parse_numeric_id(field: &'static str, value: &str) -> Result<i64, Error> {
    value
        .parse::<i64>()
        .ok()
        .filter(|id| *id >= 0)
        .ok_or_else(|| {
            Error::invalid_request("invalid id").with_details(json!({
                "field": field,
                "value": value,
                "code": "invalid_id",
            }))
        })
}
