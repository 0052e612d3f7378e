//! Port abstraction for allow-list persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{AllowedUser, EmailAddress};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by allow-list repository adapters.
    pub enum AllowListPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "allow-list store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "allow-list store query failed: {message}",
    }
}

/// Store operations over the allow-list collection.
#[async_trait]
pub trait AllowListRepository: Send + Sync {
    /// Insert the email; re-adding an existing entry is a no-op overwrite.
    async fn upsert(&self, email: &EmailAddress) -> Result<(), AllowListPersistenceError>;

    /// Whether the email is present.
    async fn contains(&self, email: &EmailAddress) -> Result<bool, AllowListPersistenceError>;

    /// Remove the email; removing an absent entry succeeds silently.
    async fn delete(&self, email: &EmailAddress) -> Result<(), AllowListPersistenceError>;

    /// Full scan of the collection, store-native order.
    async fn list(&self) -> Result<Vec<AllowedUser>, AllowListPersistenceError>;
}
