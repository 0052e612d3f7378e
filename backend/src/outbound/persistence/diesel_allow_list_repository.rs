//! PostgreSQL-backed `AllowListRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AllowListPersistenceError, AllowListRepository};
use crate::domain::{AllowedUser, EmailAddress};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AllowedUserRow, NewAllowedUserRow};
use super::pool::{DbPool, PoolError};
use super::schema::allowed_users;

/// Diesel-backed implementation of the allow-list repository port.
#[derive(Clone)]
pub struct DieselAllowListRepository {
    pool: DbPool,
}

impl DieselAllowListRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> AllowListPersistenceError {
    map_pool_error(error, AllowListPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> AllowListPersistenceError {
    map_diesel_error(
        error,
        AllowListPersistenceError::query,
        AllowListPersistenceError::connection,
    )
}

fn row_to_allowed_user(row: AllowedUserRow) -> Result<AllowedUser, AllowListPersistenceError> {
    let email = EmailAddress::new(&row.email).map_err(|err| {
        AllowListPersistenceError::query(format!("invalid email in store: {err}"))
    })?;
    Ok(AllowedUser { email })
}

#[async_trait]
impl AllowListRepository for DieselAllowListRepository {
    async fn upsert(&self, email: &EmailAddress) -> Result<(), AllowListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(allowed_users::table)
            .values(&NewAllowedUserRow {
                email: email.as_ref(),
            })
            .on_conflict(allowed_users::email)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn contains(&self, email: &EmailAddress) -> Result<bool, AllowListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = allowed_users::table
            .find(email.as_ref())
            .select(AllowedUserRow::as_select())
            .first::<AllowedUserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        Ok(row.is_some())
    }

    async fn delete(&self, email: &EmailAddress) -> Result<(), AllowListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Deleting an absent entry is a silent success, matching the
        // port's idempotency contract.
        diesel::delete(allowed_users::table.find(email.as_ref()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn list(&self) -> Result<Vec<AllowedUser>, AllowListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<AllowedUserRow> = allowed_users::table
            .select(AllowedUserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_allowed_user).collect()
    }
}
