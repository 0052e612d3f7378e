//! OpenAPI document served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{AllowedUser, HistoryRecord};
use crate::inbound::http::{auth, history, schemas, users};

/// Public OpenAPI surface used by Swagger UI and tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        users::list_users,
        users::add_user,
        users::delete_user,
        history::list_history,
        history::create_history,
        history::update_history,
        history::delete_history,
        history::search_history,
    ),
    components(schemas(
        AllowedUser,
        HistoryRecord,
        auth::LoginRequest,
        users::UsersResponse,
        users::AddUserRequest,
        users::AddUserResponse,
        history::ItemsResponse,
        history::ItemResponse,
        history::CreateHistoryRequest,
        history::UpdateHistoryRequest,
        schemas::ErrorBody,
        schemas::SuccessBody,
    )),
    tags(
        (name = "auth", description = "Session establishment"),
        (name = "users", description = "Administrator allow-list management"),
        (name = "history", description = "History records and search")
    )
)]
pub struct ApiDoc;
