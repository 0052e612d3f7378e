//! Driving port for login use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! exchange an opaque credential for a session identity without knowing (or
//! importing) the verifier or the backing store. This makes HTTP handler
//! tests deterministic because they can substitute a test double.

use async_trait::async_trait;

use crate::domain::{Error, SessionUser};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify `credential` and decide whether the identity may hold a
    /// session. Returns the session payload to persist, or an error when
    /// the credential is invalid or the identity is not permitted.
    async fn login(&self, credential: &str) -> Result<SessionUser, Error>;
}
