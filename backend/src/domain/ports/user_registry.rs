//! Driving port for administrator allow-list management.

use async_trait::async_trait;

use crate::domain::{AllowedUser, EmailAddress, Error};

/// Domain use-case port for the admin user registry.
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Every allow-list entry, store-native order.
    async fn list_users(&self) -> Result<Vec<AllowedUser>, Error>;

    /// Add `email` to the allow-list. An empty or absent email is an
    /// invalid request; re-adding an existing entry is a no-op.
    async fn add_user(&self, email: &str) -> Result<EmailAddress, Error>;

    /// Remove `email` from the allow-list. Removing the administrator's
    /// configured email is forbidden; removing an absent email succeeds.
    async fn delete_user(&self, email: &str) -> Result<(), Error>;

    /// Startup bootstrap: guarantee the administrator's entry exists.
    async fn ensure_admin(&self) -> Result<(), Error>;
}
