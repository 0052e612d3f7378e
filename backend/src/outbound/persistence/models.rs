//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and
//! must never be exposed to the domain. They exist solely to satisfy
//! Diesel's type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{allowed_users, history_records};

/// Row struct for reading from the allowed_users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = allowed_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AllowedUserRow {
    pub email: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating allow-list entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = allowed_users)]
pub(crate) struct NewAllowedUserRow<'a> {
    pub email: &'a str,
}

/// Row struct for reading from the history_records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = history_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HistoryRecordRow {
    pub id: Uuid,
    pub created_at: i64,
    pub name: String,
    pub description: String,
    pub text: String,
    pub user_email: String,
}

/// Insertable struct for creating history records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = history_records)]
pub(crate) struct NewHistoryRecordRow<'a> {
    pub id: Uuid,
    pub created_at: i64,
    pub name: &'a str,
    pub description: &'a str,
    pub text: &'a str,
    pub user_email: &'a str,
}

/// Changeset struct overwriting the two mutable record fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = history_records)]
pub(crate) struct HistoryFieldsUpdate<'a> {
    pub name: &'a str,
    pub description: &'a str,
}
