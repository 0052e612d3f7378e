//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use async_trait::async_trait;

use crate::domain::ports::{
    HistoryDraft, HistoryService, LoginService, SearchRequest, UserRegistry,
};
use crate::domain::{
    AllowedUser, DateRange, EmailAddress, Error, HistoryRecord, RecordKey, SessionUser,
};

use super::state::AppSettings;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Settings fixture with `admin@example.com` as the administrator.
pub fn test_settings(stage_prefix: &str) -> AppSettings {
    AppSettings::new(
        EmailAddress::new("admin@example.com").expect("valid fixture email"),
        "test-client-id",
        stage_prefix,
    )
}

struct UnusedLogin;

#[async_trait]
impl LoginService for UnusedLogin {
    async fn login(&self, _credential: &str) -> Result<SessionUser, Error> {
        panic!("login service must not be called in this test");
    }
}

struct UnusedRegistry;

#[async_trait]
impl UserRegistry for UnusedRegistry {
    async fn list_users(&self) -> Result<Vec<AllowedUser>, Error> {
        panic!("user registry must not be called in this test");
    }

    async fn add_user(&self, _email: &str) -> Result<EmailAddress, Error> {
        panic!("user registry must not be called in this test");
    }

    async fn delete_user(&self, _email: &str) -> Result<(), Error> {
        panic!("user registry must not be called in this test");
    }

    async fn ensure_admin(&self) -> Result<(), Error> {
        panic!("user registry must not be called in this test");
    }
}

struct UnusedHistory;

#[async_trait]
impl HistoryService for UnusedHistory {
    async fn list(
        &self,
        _owner: &EmailAddress,
        _range: Option<DateRange>,
    ) -> Result<Vec<HistoryRecord>, Error> {
        panic!("history service must not be called in this test");
    }

    async fn create(
        &self,
        _owner: &EmailAddress,
        _draft: HistoryDraft,
    ) -> Result<HistoryRecord, Error> {
        panic!("history service must not be called in this test");
    }

    async fn update(
        &self,
        _owner: &EmailAddress,
        _key: RecordKey,
        _name: String,
        _description: String,
    ) -> Result<HistoryRecord, Error> {
        panic!("history service must not be called in this test");
    }

    async fn delete(&self, _owner: &EmailAddress, _key: RecordKey) -> Result<(), Error> {
        panic!("history service must not be called in this test");
    }

    async fn search(
        &self,
        _owner: &EmailAddress,
        _request: SearchRequest,
    ) -> Result<Vec<HistoryRecord>, Error> {
        panic!("history service must not be called in this test");
    }
}

/// Login port double for tests that never reach the login service.
pub fn unused_login() -> Arc<dyn LoginService> {
    Arc::new(UnusedLogin)
}

/// Registry port double for tests that never reach the registry.
pub fn unused_registry() -> Arc<dyn UserRegistry> {
    Arc::new(UnusedRegistry)
}

/// History port double for tests that never reach the history service.
pub fn unused_history() -> Arc<dyn HistoryService> {
    Arc::new(UnusedHistory)
}
