//! History record data model.
//!
//! A history record is the sole persisted business object besides the
//! allow-list: a user-owned, timestamped free-text entry addressed by the
//! composite key (`id`, `createdAt`).

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::EmailAddress;

/// Width of the default listing window.
pub const DEFAULT_WINDOW_DAYS: i64 = 14;

/// Point in time expressed as integer milliseconds since the Unix epoch.
///
/// The integer representation is the wire format: every timestamp the API
/// emits is a whole JSON number. Inputs additionally accept float forms,
/// truncating values with no meaningful fractional millisecond.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "TimestampRepr", into = "i64")]
pub struct Timestamp(i64);

/// Accepted wire representations for a timestamp value.
#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Int(i64),
    Float(f64),
}

impl Timestamp {
    /// Unix epoch, the open lower bound used by search.
    pub const EPOCH: Self = Self(0);

    /// Construct from integer epoch milliseconds.
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Underlying epoch-millisecond value.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Parse a caller-supplied timestamp string.
    ///
    /// Accepts RFC 3339, naive date-times with or without a trailing literal
    /// `Z` marker, and bare dates (interpreted as UTC midnight). Returns
    /// `None` when no form matches; callers decide whether that is an error
    /// or a fallback to "now".
    pub fn parse_flexible(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(parsed.with_timezone(&Utc).into());
        }
        let value = value.strip_suffix('Z').unwrap_or(value);
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
                return Some(Utc.from_utc_datetime(&naive).into());
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&midnight).into());
        }
        None
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis())
    }
}

impl From<Timestamp> for i64 {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

/// Error raised when a numeric timestamp representation is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTimestampError;

impl std::fmt::Display for InvalidTimestampError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timestamp must be a finite number of epoch milliseconds")
    }
}

impl std::error::Error for InvalidTimestampError {}

impl TryFrom<TimestampRepr> for Timestamp {
    type Error = InvalidTimestampError;

    fn try_from(value: TimestampRepr) -> Result<Self, Self::Error> {
        match value {
            TimestampRepr::Int(millis) => Ok(Self(millis)),
            TimestampRepr::Float(raw) if raw.is_finite() => Ok(Self(raw.trunc() as i64)),
            TimestampRepr::Float(_) => Err(InvalidTimestampError),
        }
    }
}

/// Caller-supplied creation date on record submission.
///
/// Resolution order when creating a record: a textual value that parses as
/// an ISO timestamp wins; an already-numeric value is used directly; any
/// other input falls back to the current server time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    /// ISO-8601 style text, e.g. `2024-01-10T00:00:00Z`.
    Text(String),
    /// Epoch milliseconds as an integer.
    Millis(i64),
    /// Epoch milliseconds as a float; whole part is used.
    Float(f64),
}

/// Inclusive `[start, end]` window over record creation times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Timestamp,
    end: Timestamp,
}

impl DateRange {
    /// Construct a window from its inclusive bounds.
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Default listing window: `now` minus [`DEFAULT_WINDOW_DAYS`] through `now`.
    pub fn default_window(now: DateTime<Utc>) -> Self {
        let start = now - chrono::Duration::days(DEFAULT_WINDOW_DAYS);
        Self::new(start.into(), now.into())
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Inclusive upper bound.
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Whether `at` falls within the window, bounds included.
    pub fn contains(&self, at: Timestamp) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Composite primary key addressing one history record.
///
/// `created_at` is part of the key and therefore immutable: update and
/// delete require it to locate the record, never to change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordKey {
    /// Server-generated unique identifier.
    pub id: Uuid,
    /// Creation time in epoch milliseconds.
    pub created_at: Timestamp,
}

/// A user-owned, timestamped free-text entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Server-generated unique identifier.
    pub id: Uuid,
    /// Creation time in epoch milliseconds; immutable, part of the key.
    #[schema(value_type = i64, example = 1_704_844_800_000_i64)]
    pub created_at: Timestamp,
    /// Free-text label.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Free-text body.
    pub text: String,
    /// Owning identity's email; set at creation and never mutated.
    #[schema(value_type = String, example = "ada@example.com")]
    pub user_id: EmailAddress,
}

impl HistoryRecord {
    /// Composite key addressing this record.
    pub fn key(&self) -> RecordKey {
        RecordKey {
            id: self.id,
            created_at: self.created_at,
        }
    }
}
