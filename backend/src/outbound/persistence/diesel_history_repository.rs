//! PostgreSQL-backed `HistoryRepository` implementation using Diesel ORM.
//!
//! Updates rely on a single conditional `UPDATE … RETURNING` so the
//! read-modify-return contract needs no local locking; an empty returning
//! set reports the missing key as an explicit `NotFound`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HistoryPersistenceError, HistoryRepository};
use crate::domain::{DateRange, EmailAddress, HistoryRecord, RecordKey, Timestamp};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{HistoryFieldsUpdate, HistoryRecordRow, NewHistoryRecordRow};
use super::pool::{DbPool, PoolError};
use super::schema::history_records;

/// Diesel-backed implementation of the history repository port.
#[derive(Clone)]
pub struct DieselHistoryRepository {
    pool: DbPool,
}

impl DieselHistoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> HistoryPersistenceError {
    map_pool_error(error, HistoryPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> HistoryPersistenceError {
    map_diesel_error(
        error,
        HistoryPersistenceError::query,
        HistoryPersistenceError::connection,
    )
}

/// Convert a database row into a validated domain record.
fn row_to_record(row: HistoryRecordRow) -> Result<HistoryRecord, HistoryPersistenceError> {
    let HistoryRecordRow {
        id,
        created_at,
        name,
        description,
        text,
        user_email,
    } = row;

    let user_id = EmailAddress::new(&user_email).map_err(|err| {
        HistoryPersistenceError::query(format!("invalid owner email in store: {err}"))
    })?;

    Ok(HistoryRecord {
        id,
        created_at: Timestamp::from_millis(created_at),
        name,
        description,
        text,
        user_id,
    })
}

#[async_trait]
impl HistoryRepository for DieselHistoryRepository {
    async fn insert(&self, record: &HistoryRecord) -> Result<(), HistoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(history_records::table)
            .values(&NewHistoryRecordRow {
                id: record.id,
                created_at: record.created_at.as_millis(),
                name: &record.name,
                description: &record.description,
                text: &record.text,
                user_email: record.user_id.as_ref(),
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn update_fields(
        &self,
        owner: &EmailAddress,
        key: &RecordKey,
        name: &str,
        description: &str,
    ) -> Result<HistoryRecord, HistoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = diesel::update(
            history_records::table
                .find((key.id, key.created_at.as_millis()))
                .filter(history_records::user_email.eq(owner.as_ref())),
        )
        .set(&HistoryFieldsUpdate { name, description })
        .returning(HistoryRecordRow::as_returning())
        .get_result::<HistoryRecordRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel)?;

        match row {
            Some(row) => row_to_record(row),
            None => Err(HistoryPersistenceError::not_found()),
        }
    }

    async fn delete(
        &self,
        owner: &EmailAddress,
        key: &RecordKey,
    ) -> Result<(), HistoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Zero affected rows is a silent success, matching the port's
        // idempotency contract.
        diesel::delete(
            history_records::table
                .find((key.id, key.created_at.as_millis()))
                .filter(history_records::user_email.eq(owner.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel)
    }

    async fn list_in_range(
        &self,
        owner: &EmailAddress,
        range: &DateRange,
    ) -> Result<Vec<HistoryRecord>, HistoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<HistoryRecordRow> = history_records::table
            .filter(history_records::user_email.eq(owner.as_ref()))
            .filter(
                history_records::created_at
                    .between(range.start().as_millis(), range.end().as_millis()),
            )
            .order(history_records::created_at.desc())
            .select(HistoryRecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn scan_owner(
        &self,
        owner: &EmailAddress,
    ) -> Result<Vec<HistoryRecord>, HistoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<HistoryRecordRow> = history_records::table
            .filter(history_records::user_email.eq(owner.as_ref()))
            .select(HistoryRecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.
    use uuid::Uuid;

    use super::*;

    fn valid_row() -> HistoryRecordRow {
        HistoryRecordRow {
            id: Uuid::new_v4(),
            created_at: 1_704_844_800_000,
            name: "Trip".to_owned(),
            description: "Paris".to_owned(),
            text: String::new(),
            user_email: "ada@example.com".to_owned(),
        }
    }

    #[test]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool(PoolError::checkout("connection refused"));
        assert!(matches!(err, HistoryPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn diesel_error_maps_to_query_error() {
        let err = map_diesel(diesel::result::Error::NotFound);
        assert!(matches!(err, HistoryPersistenceError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }

    #[test]
    fn row_conversion_produces_the_domain_record() {
        let row = valid_row();
        let id = row.id;
        let record = row_to_record(row).expect("valid row converts");
        assert_eq!(record.id, id);
        assert_eq!(record.created_at.as_millis(), 1_704_844_800_000);
        assert_eq!(record.user_id.as_ref(), "ada@example.com");
    }

    #[test]
    fn row_conversion_rejects_a_blank_owner() {
        let mut row = valid_row();
        row.user_email = String::new();
        let err = row_to_record(row).expect_err("blank owner is rejected");
        assert!(matches!(err, HistoryPersistenceError::Query { .. }));
    }
}
