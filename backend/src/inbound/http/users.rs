//! Admin allow-list API handlers.
//!
//! ```text
//! GET    /api/users
//! POST   /api/users {"email":"ada@example.com"}
//! DELETE /api/users/{email}
//! ```
//!
//! Every route requires the administrator session.

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AllowedUser, EmailAddress};

use super::ApiResult;
use super::schemas::{ErrorBody, SuccessBody};
use super::session::RequireAdmin;
use super::state::HttpState;

/// Response body for `GET /api/users`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    /// Every allow-list entry.
    pub users: Vec<AllowedUser>,
}

/// Request body for `POST /api/users`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddUserRequest {
    /// Email to add to the allow-list.
    pub email: Option<String>,
}

/// Response body for `POST /api/users`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddUserResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// The email as stored.
    #[schema(value_type = String)]
    pub email: EmailAddress,
}

/// List the allow-list entries.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Allow-list entries", body = UsersResponse),
        (status = 303, description = "No session; redirected to login"),
        (status = 403, description = "Session is not the administrator", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    _admin: RequireAdmin,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<UsersResponse>> {
    let users = state.registry.list_users().await?;
    Ok(web::Json(UsersResponse { users }))
}

/// Add an email to the allow-list; re-adding is a no-op.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = AddUserRequest,
    responses(
        (status = 200, description = "Entry added", body = AddUserResponse),
        (status = 303, description = "No session; redirected to login"),
        (status = 400, description = "Missing email", body = ErrorBody),
        (status = 403, description = "Session is not the administrator", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "addUser"
)]
#[post("/users")]
pub async fn add_user(
    _admin: RequireAdmin,
    state: web::Data<HttpState>,
    payload: web::Json<AddUserRequest>,
) -> ApiResult<web::Json<AddUserResponse>> {
    let email = state
        .registry
        .add_user(payload.into_inner().email.as_deref().unwrap_or_default())
        .await?;
    Ok(web::Json(AddUserResponse {
        success: true,
        email,
    }))
}

/// Remove an email from the allow-list; removing an absent entry succeeds.
#[utoipa::path(
    delete,
    path = "/api/users/{email}",
    params(("email" = String, Path, description = "Allow-list entry to remove")),
    responses(
        (status = 200, description = "Entry removed", body = SuccessBody),
        (status = 303, description = "No session; redirected to login"),
        (status = 400, description = "Deleting the administrator is forbidden", body = ErrorBody),
        (status = 403, description = "Session is not the administrator", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{email}")]
pub async fn delete_user(
    _admin: RequireAdmin,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessBody>> {
    state.registry.delete_user(&path.into_inner()).await?;
    Ok(web::Json(SuccessBody::ok()))
}
