//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions plus the two request
//! guards: `RequireSession` redirects anonymous callers to the login entry
//! point, `RequireAdmin` additionally rejects non-administrator sessions.
//! Both run before the wrapped handler and short-circuit on failure.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, SessionUser};

use super::state::AppSettings;

pub(crate) const SESSION_USER_KEY: &str = "user";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist_user(&self, user: &SessionUser) -> Result<(), Error> {
        self.0
            .insert(SESSION_USER_KEY, user)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop all session state; idempotent.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Fetch the current identity from the session, if present.
    ///
    /// A cookie that fails to deserialise is treated as no session rather
    /// than an error, so a stale or tampered cookie sends the caller back
    /// through login.
    pub fn current_user(&self) -> Option<SessionUser> {
        match self.0.get::<SessionUser>(SESSION_USER_KEY) {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!("invalid session payload: {error}");
                None
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

fn settings_from(req: &HttpRequest) -> Result<web::Data<AppSettings>, Error> {
    req.app_data::<web::Data<AppSettings>>()
        .cloned()
        .ok_or_else(|| Error::internal("application settings missing from request state"))
}

/// Guard extractor yielding the session identity or redirecting to login.
pub struct RequireSession(pub SessionUser);

impl FromRequest for RequireSession {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let settings = settings_from(req);
        let session = Session::from_request(req, payload);
        Box::pin(async move {
            let settings = settings?;
            let context = SessionContext::new(session.await?);
            context
                .current_user()
                .map(Self)
                .ok_or_else(|| Error::unauthenticated(settings.login_path()).into())
        })
    }
}

/// Guard extractor additionally requiring the administrator identity.
pub struct RequireAdmin(pub SessionUser);

impl FromRequest for RequireAdmin {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let settings = settings_from(req);
        let session = Session::from_request(req, payload);
        Box::pin(async move {
            let settings = settings?;
            let context = SessionContext::new(session.await?);
            let user = context
                .current_user()
                .ok_or_else(|| Error::unauthenticated(settings.login_path()))?;
            if &user.email != settings.admin_email() {
                return Err(Error::forbidden("Admin access required").into());
            }
            Ok(Self(user))
        })
    }
}
