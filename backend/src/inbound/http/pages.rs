//! Page-shell handlers and navigation redirects.
//!
//! Real template content is an external concern; these handlers serve
//! minimal HTML shells and enforce the auth guards in front of them. The
//! login shell carries the identity-provider client id so the sign-in
//! widget can be wired up client-side.

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};

use super::session::{RequireAdmin, RequireSession, SessionContext};
use super::state::AppSettings;

fn redirect(path: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, path))
        .finish()
}

fn html_shell(title: &str, body: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(format!(
            "<!doctype html>\n<html>\n<head><title>{title}</title></head>\n<body>{body}</body>\n</html>\n"
        ))
}

/// Entry point: authenticated sessions land on the data page, everyone
/// else on login.
#[get("/")]
pub async fn index(session: SessionContext, settings: web::Data<AppSettings>) -> HttpResponse {
    if session.current_user().is_some() {
        redirect(settings.data_path())
    } else {
        redirect(settings.login_path())
    }
}

/// Login page shell.
#[get("/login")]
pub async fn login_page(settings: web::Data<AppSettings>) -> HttpResponse {
    html_shell(
        "Sign in",
        &format!(
            "<main data-google-client-id=\"{}\"><h1>Sign in</h1></main>",
            settings.google_client_id()
        ),
    )
}

/// Clear the session and return to the login page; idempotent.
#[get("/logout")]
pub async fn logout(session: SessionContext, settings: web::Data<AppSettings>) -> HttpResponse {
    session.clear();
    redirect(settings.login_path())
}

/// Data page shell.
#[get("/data")]
pub async fn data_page(_session: RequireSession) -> HttpResponse {
    html_shell("History", "<main><h1>History</h1></main>")
}

/// Record entry page shell.
#[get("/add")]
pub async fn add_page(_session: RequireSession) -> HttpResponse {
    html_shell("Add record", "<main><h1>Add record</h1></main>")
}

/// Search page shell.
#[get("/search")]
pub async fn search_page(_session: RequireSession) -> HttpResponse {
    html_shell("Search", "<main><h1>Search</h1></main>")
}

/// Secret page shell.
#[get("/secret")]
pub async fn secret_page(_session: RequireSession) -> HttpResponse {
    html_shell("Secret", "<main><h1>Secret</h1></main>")
}

/// Admin page shell.
#[get("/users")]
pub async fn users_page(_admin: RequireAdmin) -> HttpResponse {
    html_shell("Allowed users", "<main><h1>Allowed users</h1></main>")
}
