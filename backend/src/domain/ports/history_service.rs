//! Driving port for history record use-cases, with its request payloads.

use async_trait::async_trait;

use crate::domain::search::MatchMode;
use crate::domain::{DateInput, DateRange, EmailAddress, Error, HistoryRecord, RecordKey, Timestamp};

/// Caller-supplied fields for a new history record.
///
/// Absent free-text fields default to empty strings; an absent or
/// unparseable `date` falls back to the current server time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryDraft {
    /// Free-text label.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Free-text body.
    pub text: String,
    /// Optional caller-supplied creation time.
    pub date: Option<DateInput>,
}

/// Caller-supplied search parameters before range resolution.
///
/// Open date bounds are resolved by the service: a missing start becomes
/// the epoch and a missing end becomes "now". When neither bound is
/// supplied no date predicate is applied at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    /// Optional inclusive lower bound on creation time.
    pub start: Option<Timestamp>,
    /// Optional inclusive upper bound on creation time.
    pub end: Option<Timestamp>,
    /// Substring matched against record names.
    pub name: Option<String>,
    /// Substring matched against the concatenated free-text fields.
    pub text: Option<String>,
    /// AND/OR combination of the supplied predicates.
    pub match_mode: MatchMode,
    /// Case sensitivity of the substring predicates.
    pub case_sensitive: bool,
}

/// Domain use-case port for history records.
#[async_trait]
pub trait HistoryService: Send + Sync {
    /// Records owned by `owner` within `range`, newest first. A `None`
    /// range means the default window (now minus fourteen days through
    /// now).
    async fn list(
        &self,
        owner: &EmailAddress,
        range: Option<DateRange>,
    ) -> Result<Vec<HistoryRecord>, Error>;

    /// Create a record owned by `owner` and return it as stored.
    async fn create(
        &self,
        owner: &EmailAddress,
        draft: HistoryDraft,
    ) -> Result<HistoryRecord, Error>;

    /// Overwrite `name` and `description` of the record addressed by
    /// `key`; the creation time is part of the key and cannot change.
    async fn update(
        &self,
        owner: &EmailAddress,
        key: RecordKey,
        name: String,
        description: String,
    ) -> Result<HistoryRecord, Error>;

    /// Remove the record addressed by `key`; idempotent.
    async fn delete(&self, owner: &EmailAddress, key: RecordKey) -> Result<(), Error>;

    /// Filter the owner's records by `request`, newest first.
    async fn search(
        &self,
        owner: &EmailAddress,
        request: SearchRequest,
    ) -> Result<Vec<HistoryRecord>, Error>;
}
