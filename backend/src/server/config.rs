//! HTTP server configuration object and environment loading.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::Key;
use tracing::warn;

use crate::domain::EmailAddress;
use crate::inbound::http::state::{AppSettings, HttpState};

/// Configuration bundle consumed by [`crate::server::create_server`].
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) settings: AppSettings,
    pub(crate) state: HttpState,
}

impl ServerConfig {
    /// Construct a server configuration from its parts.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        bind_addr: SocketAddr,
        settings: AppSettings,
        state: HttpState,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            settings,
            state,
        }
    }
}

/// Normalise a raw stage prefix into the canonical mount form: empty, or
/// `/`-prefixed with no trailing slash (`"prod/"` becomes `"/prod"`).
pub fn normalize_stage_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn missing_var(name: &str) -> std::io::Error {
    std::io::Error::other(format!("environment variable {name} is required"))
}

fn required(name: &str) -> std::io::Result<String> {
    env::var(name).map_err(|_| missing_var(name))
}

/// Environment-sourced application configuration.
pub struct AppEnv {
    /// Identity-provider client identifier (expected token audience).
    pub google_client_id: String,
    /// Administrator email; always allow-listed once the process is up.
    pub admin_email: EmailAddress,
    /// Normalised deployment stage prefix, empty when unset.
    pub stage_prefix: String,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// Whether the session cookie carries the `Secure` flag.
    pub cookie_secure: bool,
    /// Optional override for the identity provider's verification endpoint.
    pub tokeninfo_url: Option<String>,
    secret_key: Option<String>,
}

impl AppEnv {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when a required variable is absent or malformed; startup must
    /// abort in that case.
    pub fn from_env() -> std::io::Result<Self> {
        let google_client_id = required("GOOGLE_CLIENT_ID")?;
        let admin_email = EmailAddress::new(required("ADMIN_EMAIL")?)
            .map_err(|err| std::io::Error::other(format!("ADMIN_EMAIL: {err}")))?;
        let database_url = required("DATABASE_URL")?;
        let stage_prefix =
            normalize_stage_prefix(&env::var("STAGE_PREFIX").unwrap_or_default());
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_owned())
            .parse()
            .map_err(|err| std::io::Error::other(format!("BIND_ADDR: {err}")))?;
        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|value| value != "0")
            .unwrap_or(true);
        let tokeninfo_url = env::var("TOKENINFO_URL").ok();
        let secret_key = env::var("SECRET_KEY").ok();

        Ok(Self {
            google_client_id,
            admin_email,
            stage_prefix,
            database_url,
            bind_addr,
            cookie_secure,
            tokeninfo_url,
            secret_key,
        })
    }

    /// Derive the session signing key from `SECRET_KEY`.
    ///
    /// Development builds fall back to an ephemeral key when the variable
    /// is unset; release builds refuse to start without one unless
    /// `SESSION_ALLOW_EPHEMERAL=1` opts in explicitly.
    ///
    /// # Errors
    ///
    /// Fails when the key material is too short or absent outside
    /// development.
    pub fn session_key(&self) -> std::io::Result<Key> {
        match &self.secret_key {
            Some(secret) if secret.len() >= 32 => Ok(Key::derive_from(secret.as_bytes())),
            Some(_) => Err(std::io::Error::other(
                "SECRET_KEY must be at least 32 bytes of key material",
            )),
            None => {
                let allow_dev =
                    env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!("using temporary session key (dev only)");
                    Ok(Key::generate())
                } else {
                    Err(std::io::Error::other(
                        "SECRET_KEY is required outside development",
                    ))
                }
            }
        }
    }
}
