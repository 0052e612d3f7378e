//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Allow-list of permitted user emails, keyed by the email itself.
    allowed_users (email) {
        /// Primary key: the permitted email address.
        email -> Text,
        /// Entry creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// User-owned history records, keyed by (id, created_at).
    history_records (id, created_at) {
        /// Record identifier (UUID v4); unique only together with
        /// `created_at`.
        id -> Uuid,
        /// Creation time in epoch milliseconds; part of the primary key.
        created_at -> Int8,
        /// Free-text label.
        name -> Text,
        /// Free-text description.
        description -> Text,
        /// Free-text body.
        text -> Text,
        /// Owning identity's email.
        user_email -> Text,
    }
}
