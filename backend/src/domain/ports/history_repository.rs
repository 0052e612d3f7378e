//! Port abstraction for history record persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{DateRange, EmailAddress, HistoryRecord, RecordKey};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by history repository adapters.
    ///
    /// `NotFound` is a distinct kind so callers can surface a 404 instead
    /// of collapsing a missing key into a generic failure.
    pub enum HistoryPersistenceError {
        /// No record exists under the addressed composite key.
        NotFound => "history record not found",
        /// Repository connection could not be established.
        Connection { message: String } => "history store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "history store query failed: {message}",
    }
}

/// Store operations over the history collection.
///
/// Every operation is scoped to an owner: the composite key alone never
/// reaches across accounts.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Persist a freshly created record.
    async fn insert(&self, record: &HistoryRecord) -> Result<(), HistoryPersistenceError>;

    /// Overwrite `name` and `description` of the record addressed by
    /// `key`, returning the post-update record. Fails with
    /// [`HistoryPersistenceError::NotFound`] when the owner has no record
    /// under that key.
    async fn update_fields(
        &self,
        owner: &EmailAddress,
        key: &RecordKey,
        name: &str,
        description: &str,
    ) -> Result<HistoryRecord, HistoryPersistenceError>;

    /// Remove the record addressed by `key`; removing an absent record
    /// succeeds silently.
    async fn delete(&self, owner: &EmailAddress, key: &RecordKey)
    -> Result<(), HistoryPersistenceError>;

    /// Records owned by `owner` whose creation time falls within `range`
    /// (bounds inclusive), sorted descending by creation time.
    async fn list_in_range(
        &self,
        owner: &EmailAddress,
        range: &DateRange,
    ) -> Result<Vec<HistoryRecord>, HistoryPersistenceError>;

    /// Every record owned by `owner`, no ordering contract.
    async fn scan_owner(
        &self,
        owner: &EmailAddress,
    ) -> Result<Vec<HistoryRecord>, HistoryPersistenceError>;
}
