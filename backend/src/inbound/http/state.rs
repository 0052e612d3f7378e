//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::EmailAddress;
use crate::domain::ports::{HistoryService, LoginService, UserRegistry};

/// Request-independent application settings shared with handlers.
#[derive(Clone)]
pub struct AppSettings {
    admin_email: EmailAddress,
    google_client_id: String,
    stage_prefix: String,
}

impl AppSettings {
    /// Bundle the settings handlers need at request time.
    ///
    /// `stage_prefix` must be empty or start with `/` and carry no trailing
    /// slash (e.g. `"/prod"`); [`crate::server::normalize_stage_prefix`]
    /// produces that form from raw configuration.
    pub fn new(
        admin_email: EmailAddress,
        google_client_id: impl Into<String>,
        stage_prefix: impl Into<String>,
    ) -> Self {
        Self {
            admin_email,
            google_client_id: google_client_id.into(),
            stage_prefix: stage_prefix.into(),
        }
    }

    /// The configured administrator email.
    pub fn admin_email(&self) -> &EmailAddress {
        &self.admin_email
    }

    /// Identity-provider client identifier embedded in the login page.
    pub fn google_client_id(&self) -> &str {
        &self.google_client_id
    }

    /// Deployment stage prefix, empty when unset.
    pub fn stage_prefix(&self) -> &str {
        &self.stage_prefix
    }

    /// Stage-prefixed login entry point used by guards and redirects.
    pub fn login_path(&self) -> String {
        format!("{}/login", self.stage_prefix)
    }

    /// Stage-prefixed landing page for authenticated sessions.
    pub fn data_path(&self) -> String {
        format!("{}/data", self.stage_prefix)
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential exchange use-case.
    pub login: Arc<dyn LoginService>,
    /// Admin allow-list use-case.
    pub registry: Arc<dyn UserRegistry>,
    /// History record use-case.
    pub history: Arc<dyn HistoryService>,
}
