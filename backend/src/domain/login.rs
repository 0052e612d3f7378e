//! Login use-case composing credential verification with the allow-list.
//!
//! The administrator may always log in; any other verified identity must be
//! present on the allow-list before a session is established.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AllowListPersistenceError, AllowListRepository, IdentityVerificationError, IdentityVerifier,
    LoginService,
};
use crate::domain::{EmailAddress, Error, SessionUser};

/// Message shown to verified identities that are not yet allow-listed.
pub const NOT_AUTHORIZED_MESSAGE: &str = "You are not allowed to access this application. \
     Please wait for the admin to add your email to the allowed user's email list.";

/// `LoginService` backed by an identity verifier and the allow-list store.
pub struct VerifierLoginService {
    verifier: Arc<dyn IdentityVerifier>,
    allow_list: Arc<dyn AllowListRepository>,
    admin_email: EmailAddress,
}

impl VerifierLoginService {
    /// Create a login service for the configured administrator email.
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        allow_list: Arc<dyn AllowListRepository>,
        admin_email: EmailAddress,
    ) -> Self {
        Self {
            verifier,
            allow_list,
            admin_email,
        }
    }
}

fn map_verification_error(error: IdentityVerificationError) -> Error {
    match error {
        IdentityVerificationError::InvalidToken { .. } => Error::invalid_token("Invalid token"),
        IdentityVerificationError::Transport { message } => Error::service_unavailable(message),
    }
}

fn map_allow_list_error(error: AllowListPersistenceError) -> Error {
    match error {
        AllowListPersistenceError::Connection { message } => Error::service_unavailable(message),
        AllowListPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl LoginService for VerifierLoginService {
    async fn login(&self, credential: &str) -> Result<SessionUser, Error> {
        let identity = self
            .verifier
            .verify(credential)
            .await
            .map_err(map_verification_error)?;
        info!(email = %identity.email, "login attempt");

        if identity.email == self.admin_email {
            return Ok(SessionUser::admin(identity));
        }

        let allowed = self
            .allow_list
            .contains(&identity.email)
            .await
            .map_err(map_allow_list_error)?;
        if allowed {
            Ok(SessionUser::member(identity))
        } else {
            Err(Error::not_authorized(NOT_AUTHORIZED_MESSAGE))
        }
    }
}
