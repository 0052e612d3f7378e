//! Login API handler.
//!
//! ```text
//! POST /login {"credential":"<opaque identity token>"}
//! ```

use actix_web::{post, web};
use serde::Deserialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::ApiResult;
use super::schemas::{ErrorBody, SuccessBody};
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::{FieldName, missing_field_error};

/// Login request body for `POST /login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Opaque credential issued by the identity provider.
    pub credential: Option<String>,
}

/// Exchange an identity-provider credential for a session cookie.
///
/// The administrator may always log in; any other verified identity must
/// already be on the allow-list.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SuccessBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing credential", body = ErrorBody),
        (status = 401, description = "Invalid credential", body = ErrorBody),
        (status = 403, description = "Identity not on the allow-list", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SuccessBody>> {
    let credential = Zeroizing::new(payload.into_inner().credential.unwrap_or_default());
    if credential.trim().is_empty() {
        return Err(missing_field_error(FieldName::new("credential")));
    }

    let user = state.login.login(&credential).await?;
    session.persist_user(&user)?;
    Ok(web::Json(SuccessBody::ok()))
}
