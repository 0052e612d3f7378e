//! History record use-case: CRUD plus in-memory search.
//!
//! All operations are scoped to the owning identity. The injected clock
//! pins "now" for creation-time fallbacks and the default listing window.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    HistoryDraft, HistoryPersistenceError, HistoryRepository, HistoryService, SearchRequest,
};
use crate::domain::search::{SearchCriteria, filter_records};
use crate::domain::{
    DateInput, DateRange, EmailAddress, Error, HistoryRecord, RecordKey, Timestamp,
};

/// `HistoryService` backed by the history store and an injected clock.
pub struct ClockedHistoryService {
    repository: Arc<dyn HistoryRepository>,
    clock: Arc<dyn Clock>,
}

impl ClockedHistoryService {
    /// Create a history service over the given repository and clock.
    pub fn new(repository: Arc<dyn HistoryRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    fn now(&self) -> Timestamp {
        self.clock.utc().into()
    }

    /// Resolve the creation time from a caller-supplied date, in order:
    /// parseable text wins, numeric values are used directly, anything
    /// else falls back to the current server time.
    fn resolve_created_at(&self, date: Option<DateInput>) -> Timestamp {
        match date {
            Some(DateInput::Text(raw)) => {
                Timestamp::parse_flexible(&raw).unwrap_or_else(|| self.now())
            }
            Some(DateInput::Millis(millis)) => Timestamp::from_millis(millis),
            Some(DateInput::Float(raw)) if raw.is_finite() => {
                Timestamp::from_millis(raw.trunc() as i64)
            }
            Some(DateInput::Float(_)) | None => self.now(),
        }
    }
}

fn map_persistence_error(error: HistoryPersistenceError) -> Error {
    match error {
        HistoryPersistenceError::NotFound => Error::not_found("history record not found"),
        HistoryPersistenceError::Connection { message } => Error::service_unavailable(message),
        HistoryPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl HistoryService for ClockedHistoryService {
    async fn list(
        &self,
        owner: &EmailAddress,
        range: Option<DateRange>,
    ) -> Result<Vec<HistoryRecord>, Error> {
        let range = range.unwrap_or_else(|| DateRange::default_window(self.clock.utc()));
        self.repository
            .list_in_range(owner, &range)
            .await
            .map_err(map_persistence_error)
    }

    async fn create(
        &self,
        owner: &EmailAddress,
        draft: HistoryDraft,
    ) -> Result<HistoryRecord, Error> {
        let record = HistoryRecord {
            id: Uuid::new_v4(),
            created_at: self.resolve_created_at(draft.date),
            name: draft.name,
            description: draft.description,
            text: draft.text,
            user_id: owner.clone(),
        };
        self.repository
            .insert(&record)
            .await
            .map_err(map_persistence_error)?;
        Ok(record)
    }

    async fn update(
        &self,
        owner: &EmailAddress,
        key: RecordKey,
        name: String,
        description: String,
    ) -> Result<HistoryRecord, Error> {
        self.repository
            .update_fields(owner, &key, &name, &description)
            .await
            .map_err(map_persistence_error)
    }

    async fn delete(&self, owner: &EmailAddress, key: RecordKey) -> Result<(), Error> {
        self.repository
            .delete(owner, &key)
            .await
            .map_err(map_persistence_error)
    }

    async fn search(
        &self,
        owner: &EmailAddress,
        request: SearchRequest,
    ) -> Result<Vec<HistoryRecord>, Error> {
        let SearchRequest {
            start,
            end,
            name,
            text,
            match_mode,
            case_sensitive,
        } = request;

        // A single open bound still constitutes a date criterion; only the
        // absence of both leaves the range out entirely.
        let range = if start.is_some() || end.is_some() {
            Some(DateRange::new(
                start.unwrap_or(Timestamp::EPOCH),
                end.unwrap_or_else(|| self.now()),
            ))
        } else {
            None
        };

        let criteria = SearchCriteria {
            range,
            name,
            text,
            match_mode,
            case_sensitive,
        };

        let candidates = self
            .repository
            .scan_owner(owner)
            .await
            .map_err(map_persistence_error)?;
        Ok(filter_records(candidates, &criteria))
    }
}
