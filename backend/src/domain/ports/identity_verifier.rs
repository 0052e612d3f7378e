//! Driven port for external credential verification.
//!
//! The identity provider is consumed as a capability: verify an opaque
//! token, return a verified identity or an error. The two failure kinds
//! matter to callers because they produce different HTTP statuses; an
//! unverifiable credential is a 401, an unreachable provider is not.

use async_trait::async_trait;

use crate::domain::VerifiedIdentity;

use super::define_port_error;

define_port_error! {
    /// Failures raised by identity verifier adapters.
    pub enum IdentityVerificationError {
        /// The credential is malformed, expired, carries the wrong
        /// audience, or lacks an email claim.
        InvalidToken { message: String } => "credential rejected: {message}",
        /// The provider could not be reached or answered abnormally.
        Transport { message: String } => "identity provider unavailable: {message}",
    }
}

/// Verify an opaque credential against the configured audience.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Validate `credential` and return the verified identity claims.
    async fn verify(&self, credential: &str)
    -> Result<VerifiedIdentity, IdentityVerificationError>;
}
