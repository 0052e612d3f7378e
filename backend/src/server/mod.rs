//! Server construction and middleware wiring.

mod config;

pub use config::{AppEnv, ServerConfig, normalize_stage_prefix};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, Scope, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::state::{AppSettings, HttpState};
use crate::inbound::http::{auth, history, pages, users};

/// The application routing table, mounted under the stage prefix.
///
/// Middleware and shared state are attached by the caller, so tests can
/// exercise the exact production routes with their own session key.
pub fn stage_scope(stage_prefix: &str) -> Scope {
    let api = web::scope("/api")
        .service(users::list_users)
        .service(users::add_user)
        .service(users::delete_user)
        .service(history::list_history)
        .service(history::create_history)
        .service(history::update_history)
        .service(history::delete_history)
        .service(history::search_history);

    web::scope(stage_prefix)
        .service(auth::login)
        .service(pages::index)
        .service(pages::login_page)
        .service(pages::logout)
        .service(pages::data_page)
        .service(pages::add_page)
        .service(pages::search_page)
        .service(pages::secret_page)
        .service(pages::users_page)
        .service(api)
}

#[derive(Clone)]
struct AppDependencies {
    state: web::Data<HttpState>,
    settings: web::Data<AppSettings>,
    key: Key,
    cookie_secure: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        state,
        settings,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build();

    let prefix = settings.stage_prefix().to_owned();

    let app = App::new()
        .app_data(state)
        .app_data(settings)
        .service(stage_scope(&prefix).wrap(session));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        settings,
        state,
    } = config;
    let state = web::Data::new(state);
    let settings = web::Data::new(settings);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            state: state.clone(),
            settings: settings.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(bind_addr)?
    .run();
    Ok(server)
}
