//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository
//! ports backed by PostgreSQL via the Diesel ORM with async support
//! through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: all database errors are mapped to domain
//!   persistence error kinds.

mod diesel_allow_list_repository;
mod diesel_history_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_allow_list_repository::DieselAllowListRepository;
pub use diesel_history_repository::DieselHistoryRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations before the server starts accepting traffic.
///
/// Runs on a dedicated synchronous connection; the async pool never sees a
/// partially migrated schema.
///
/// # Errors
///
/// Returns an error when the connection cannot be established or a
/// migration fails; startup must abort in either case.
pub fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut conn = diesel::pg::PgConnection::establish(database_url)
        .map_err(|err| std::io::Error::other(format!("database connection failed: {err}")))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
    Ok(())
}
