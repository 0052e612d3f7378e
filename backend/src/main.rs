//! Backend entry-point: wires configuration, persistence, the identity
//! verifier, and the HTTP server.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ports::UserRegistry;
use backend::domain::{AllowListRegistry, ClockedHistoryService, VerifierLoginService};
use backend::inbound::http::state::{AppSettings, HttpState};
use backend::outbound::google::GoogleTokenVerifier;
use backend::outbound::persistence::{
    DbPool, DieselAllowListRepository, DieselHistoryRepository, PoolConfig, run_migrations,
};
use backend::server::{AppEnv, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = AppEnv::from_env()?;
    let key = env.session_key()?;

    run_migrations(&env.database_url)?;
    let pool = DbPool::new(PoolConfig::new(&env.database_url))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let allow_list = Arc::new(DieselAllowListRepository::new(pool.clone()));
    let history_repository = Arc::new(DieselHistoryRepository::new(pool));
    let verifier = match &env.tokeninfo_url {
        Some(endpoint) => GoogleTokenVerifier::with_endpoint(&env.google_client_id, endpoint),
        None => GoogleTokenVerifier::new(&env.google_client_id),
    }
    .map_err(|err| std::io::Error::other(format!("http client construction failed: {err}")))?;

    let admin_email = env.admin_email.clone();
    let login = Arc::new(VerifierLoginService::new(
        Arc::new(verifier),
        allow_list.clone(),
        admin_email.clone(),
    ));
    let registry = Arc::new(AllowListRegistry::new(allow_list, admin_email.clone()));
    let history = Arc::new(ClockedHistoryService::new(
        history_repository,
        Arc::new(DefaultClock),
    ));

    // The allow-list must contain the administrator before any request is
    // served; refusing to start keeps that invariant honest.
    registry.ensure_admin().await.map_err(std::io::Error::other)?;

    let settings = AppSettings::new(
        admin_email,
        env.google_client_id.clone(),
        env.stage_prefix.clone(),
    );
    let state = HttpState {
        login,
        registry,
        history,
    };

    create_server(ServerConfig::new(
        key,
        env.cookie_secure,
        env.bind_addr,
        settings,
        state,
    ))?
    .await
}
