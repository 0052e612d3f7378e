//! Shared validation helpers for inbound HTTP adapters.

use uuid::Uuid;

use crate::domain::{Error, Timestamp};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    Error::invalid_request(format!("{} is required", field.as_str()))
}

pub(crate) fn invalid_timestamp_error(field: FieldName) -> Error {
    Error::invalid_request(format!("{} must be an ISO-8601 timestamp", field.as_str()))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value)
        .map_err(|_| Error::invalid_request(format!("{} must be a valid UUID", field.as_str())))
}

/// Parse an optional ISO-8601 query parameter; absent stays absent, a
/// supplied value that fails to parse is an invalid request.
pub(crate) fn parse_optional_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<Timestamp>, Error> {
    value
        .map(|raw| Timestamp::parse_flexible(raw).ok_or_else(|| invalid_timestamp_error(field)))
        .transpose()
}

/// Parse a required epoch-millisecond parameter carried as a query string
/// value. Accepts integer and whole-float forms.
pub(crate) fn required_millis(value: Option<&str>, field: FieldName) -> Result<Timestamp, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    if let Ok(millis) = raw.parse::<i64>() {
        return Ok(Timestamp::from_millis(millis));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .map(|parsed| Timestamp::from_millis(parsed.trunc() as i64))
        .ok_or_else(|| {
            Error::invalid_request(format!("{} must be epoch milliseconds", field.as_str()))
        })
}
