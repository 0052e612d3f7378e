//! Allow-list registry use-case.
//!
//! Thin orchestration over the allow-list repository: presence checks on
//! input, the admin-deletion guard, and the startup bootstrap that
//! guarantees the administrator's entry exists.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{AllowListPersistenceError, AllowListRepository, UserRegistry};
use crate::domain::{AllowedUser, EmailAddress, Error};

/// `UserRegistry` backed by the allow-list store.
pub struct AllowListRegistry {
    repository: Arc<dyn AllowListRepository>,
    admin_email: EmailAddress,
}

impl AllowListRegistry {
    /// Create a registry guarding the configured administrator email.
    pub fn new(repository: Arc<dyn AllowListRepository>, admin_email: EmailAddress) -> Self {
        Self {
            repository,
            admin_email,
        }
    }
}

fn map_persistence_error(error: AllowListPersistenceError) -> Error {
    match error {
        AllowListPersistenceError::Connection { message } => Error::service_unavailable(message),
        AllowListPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl UserRegistry for AllowListRegistry {
    async fn list_users(&self) -> Result<Vec<AllowedUser>, Error> {
        self.repository.list().await.map_err(map_persistence_error)
    }

    async fn add_user(&self, email: &str) -> Result<EmailAddress, Error> {
        let email =
            EmailAddress::new(email).map_err(|_| Error::invalid_request("Email is required"))?;
        self.repository
            .upsert(&email)
            .await
            .map_err(map_persistence_error)?;
        info!(email = %email, "allow-list entry added");
        Ok(email)
    }

    async fn delete_user(&self, email: &str) -> Result<(), Error> {
        let email =
            EmailAddress::new(email).map_err(|_| Error::invalid_request("Email is required"))?;
        if email == self.admin_email {
            return Err(Error::forbidden_operation("Cannot delete admin email"));
        }
        self.repository
            .delete(&email)
            .await
            .map_err(map_persistence_error)?;
        info!(email = %email, "allow-list entry removed");
        Ok(())
    }

    async fn ensure_admin(&self) -> Result<(), Error> {
        self.repository
            .upsert(&self.admin_email)
            .await
            .map_err(map_persistence_error)
    }
}
