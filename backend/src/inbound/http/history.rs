//! History record API handlers.
//!
//! ```text
//! GET    /api/history?startDate=..&endDate=..
//! POST   /api/history {"name":..,"description":..,"text":..,"date":..}
//! PUT    /api/history/{id} {"createdAt":..,"name":..,"description":..}
//! DELETE /api/history/{id}?createdAt=..
//! GET    /api/search?name=..&searchText=..&matchMode=..&caseSensitive=..
//! ```
//!
//! Every route is scoped to the session identity: records belonging to
//! other users are invisible to all five operations.

use actix_web::{delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ports::{HistoryDraft, SearchRequest};
use crate::domain::search::MatchMode;
use crate::domain::{DateInput, DateRange, HistoryRecord, RecordKey, Timestamp};

use super::ApiResult;
use super::schemas::{ErrorBody, SuccessBody};
use super::session::RequireSession;
use super::state::HttpState;
use super::validation::{
    FieldName, missing_field_error, parse_optional_timestamp, parse_uuid, required_millis,
};

/// Query parameters for `GET /api/history`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryListQuery {
    /// Inclusive lower bound, ISO-8601.
    pub start_date: Option<String>,
    /// Inclusive upper bound, ISO-8601.
    pub end_date: Option<String>,
}

/// Response body carrying a record collection.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ItemsResponse {
    /// Matching records, newest first.
    pub items: Vec<HistoryRecord>,
}

/// Response body carrying a single record.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ItemResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// The record as stored.
    pub item: HistoryRecord,
}

/// Request body for `POST /api/history`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHistoryRequest {
    /// Free-text label; defaults to empty.
    pub name: Option<String>,
    /// Free-text description; defaults to empty.
    pub description: Option<String>,
    /// Free-text body; defaults to empty.
    pub text: Option<String>,
    /// Creation time: ISO text or epoch milliseconds; defaults to now.
    #[schema(value_type = Option<String>)]
    pub date: Option<DateInput>,
}

/// Request body for `PUT /api/history/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHistoryRequest {
    /// Creation time of the record being updated; part of the key.
    #[schema(value_type = Option<i64>)]
    pub created_at: Option<Timestamp>,
    /// Replacement label; defaults to empty.
    pub name: Option<String>,
    /// Replacement description; defaults to empty.
    pub description: Option<String>,
}

/// Query parameters for `DELETE /api/history/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteHistoryQuery {
    /// Creation time of the record being removed; part of the key.
    pub created_at: Option<String>,
}

/// Query parameters for `GET /api/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryQuery {
    /// Inclusive lower bound, ISO-8601; open when absent.
    pub start_date: Option<String>,
    /// Inclusive upper bound, ISO-8601; open when absent.
    pub end_date: Option<String>,
    /// Substring matched against record names.
    pub name: Option<String>,
    /// Substring matched against all free-text fields.
    pub search_text: Option<String>,
    /// `all` (default) or `any`.
    pub match_mode: Option<String>,
    /// `"true"` enables case-sensitive matching.
    pub case_sensitive: Option<String>,
}

/// List the session's records within a date window.
///
/// Without both bounds the window defaults to the last fourteen days.
#[utoipa::path(
    get,
    path = "/api/history",
    params(
        ("startDate" = Option<String>, Query, description = "Inclusive ISO-8601 lower bound"),
        ("endDate" = Option<String>, Query, description = "Inclusive ISO-8601 upper bound")
    ),
    responses(
        (status = 200, description = "Records, newest first", body = ItemsResponse),
        (status = 303, description = "No session; redirected to login"),
        (status = 400, description = "Unparseable bound", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["history"],
    operation_id = "listHistory"
)]
#[get("/history")]
pub async fn list_history(
    session: RequireSession,
    state: web::Data<HttpState>,
    query: web::Query<HistoryListQuery>,
) -> ApiResult<web::Json<ItemsResponse>> {
    let query = query.into_inner();
    let start = parse_optional_timestamp(query.start_date.as_deref(), FieldName::new("startDate"))?;
    let end = parse_optional_timestamp(query.end_date.as_deref(), FieldName::new("endDate"))?;
    let range = match (start, end) {
        (Some(start), Some(end)) => Some(DateRange::new(start, end)),
        _ => None,
    };

    let items = state.history.list(&session.0.email, range).await?;
    Ok(web::Json(ItemsResponse { items }))
}

/// Create a record owned by the session identity.
#[utoipa::path(
    post,
    path = "/api/history",
    request_body = CreateHistoryRequest,
    responses(
        (status = 200, description = "Record created", body = ItemResponse),
        (status = 303, description = "No session; redirected to login"),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["history"],
    operation_id = "createHistory"
)]
#[post("/history")]
pub async fn create_history(
    session: RequireSession,
    state: web::Data<HttpState>,
    payload: web::Json<CreateHistoryRequest>,
) -> ApiResult<web::Json<ItemResponse>> {
    let payload = payload.into_inner();
    let draft = HistoryDraft {
        name: payload.name.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
        text: payload.text.unwrap_or_default(),
        date: payload.date,
    };

    let item = state.history.create(&session.0.email, draft).await?;
    Ok(web::Json(ItemResponse {
        success: true,
        item,
    }))
}

/// Overwrite the name and description of one record.
///
/// `createdAt` addresses the record; being part of the key it cannot be
/// changed here.
#[utoipa::path(
    put,
    path = "/api/history/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    request_body = UpdateHistoryRequest,
    responses(
        (status = 200, description = "Record updated", body = ItemResponse),
        (status = 303, description = "No session; redirected to login"),
        (status = 400, description = "Malformed id or missing createdAt", body = ErrorBody),
        (status = 404, description = "No record under that key", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["history"],
    operation_id = "updateHistory"
)]
#[put("/history/{id}")]
pub async fn update_history(
    session: RequireSession,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateHistoryRequest>,
) -> ApiResult<web::Json<ItemResponse>> {
    let id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let payload = payload.into_inner();
    let created_at = payload
        .created_at
        .ok_or_else(|| missing_field_error(FieldName::new("createdAt")))?;

    let item = state
        .history
        .update(
            &session.0.email,
            RecordKey { id, created_at },
            payload.name.unwrap_or_default(),
            payload.description.unwrap_or_default(),
        )
        .await?;
    Ok(web::Json(ItemResponse {
        success: true,
        item,
    }))
}

/// Remove one record; removing an absent record succeeds.
#[utoipa::path(
    delete,
    path = "/api/history/{id}",
    params(
        ("id" = String, Path, description = "Record identifier"),
        ("createdAt" = String, Query, description = "Creation time in epoch milliseconds")
    ),
    responses(
        (status = 200, description = "Record removed", body = SuccessBody),
        (status = 303, description = "No session; redirected to login"),
        (status = 400, description = "Malformed id or missing createdAt", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["history"],
    operation_id = "deleteHistory"
)]
#[delete("/history/{id}")]
pub async fn delete_history(
    session: RequireSession,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<DeleteHistoryQuery>,
) -> ApiResult<web::Json<SuccessBody>> {
    let id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let created_at = required_millis(
        query.into_inner().created_at.as_deref(),
        FieldName::new("createdAt"),
    )?;

    state
        .history
        .delete(&session.0.email, RecordKey { id, created_at })
        .await?;
    Ok(web::Json(SuccessBody::ok()))
}

/// Search the session's records by any subset of the criteria.
#[utoipa::path(
    get,
    path = "/api/search",
    params(
        ("startDate" = Option<String>, Query, description = "Inclusive ISO-8601 lower bound"),
        ("endDate" = Option<String>, Query, description = "Inclusive ISO-8601 upper bound"),
        ("name" = Option<String>, Query, description = "Name substring"),
        ("searchText" = Option<String>, Query, description = "Free-text substring"),
        ("matchMode" = Option<String>, Query, description = "all (default) or any"),
        ("caseSensitive" = Option<String>, Query, description = "true for case-sensitive matching")
    ),
    responses(
        (status = 200, description = "Matching records, newest first", body = ItemsResponse),
        (status = 303, description = "No session; redirected to login"),
        (status = 400, description = "Unparseable bound", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["history"],
    operation_id = "searchHistory"
)]
#[get("/search")]
pub async fn search_history(
    session: RequireSession,
    state: web::Data<HttpState>,
    query: web::Query<SearchHistoryQuery>,
) -> ApiResult<web::Json<ItemsResponse>> {
    let query = query.into_inner();
    let request = SearchRequest {
        start: parse_optional_timestamp(query.start_date.as_deref(), FieldName::new("startDate"))?,
        end: parse_optional_timestamp(query.end_date.as_deref(), FieldName::new("endDate"))?,
        name: query.name.filter(|value| !value.is_empty()),
        text: query.search_text.filter(|value| !value.is_empty()),
        match_mode: MatchMode::from_param(query.match_mode.as_deref()),
        case_sensitive: query.case_sensitive.as_deref() == Some("true"),
    };

    let items = state.history.search(&session.0.email, request).await?;
    Ok(web::Json(ItemsResponse { items }))
}
