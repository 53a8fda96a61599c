use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::warn;
use utoipa::ToSchema;
use validator::Validate;

use super::{current_user, ensure_allowed};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::mappers::{ThreadDto, ThreadsPageDto};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct ThreadRequestDto {
    #[validate(length(min = 1, max = 100))]
    pub(crate) title: String,
    #[validate(length(max = 5000))]
    pub(crate) content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThreadsQuery {
    pub(crate) title: Option<String>,
    pub(crate) page: Option<i64>,
    pub(crate) page_size: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/threads",
    tag = "threads",
    params(
        ("title" = Option<String>, Query, description = "Case-sensitive title substring"),
        ("page" = Option<i64>, Query, description = "One-based page, default 1"),
        ("page_size" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Threads listed", body = ThreadsPageDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_threads(
    State(state): State<AppState>,
    Query(query): Query<ThreadsQuery>,
) -> AppResult<Json<ThreadsPageDto>> {
    let page = state
        .thread_service
        .list_threads(
            query.title.as_deref(),
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(20),
        )
        .await?;

    Ok(Json(ThreadsPageDto::from(page)))
}

#[utoipa::path(
    get,
    path = "/api/threads/{thread_id}",
    tag = "threads",
    params(("thread_id" = i64, Path, description = "Thread id")),
    responses(
        (status = 200, description = "Thread found", body = ThreadDto),
        (status = 404, description = "Thread not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<i64>,
) -> AppResult<Json<ThreadDto>> {
    let thread = state.thread_service.get_thread(thread_id).await?;
    Ok(Json(ThreadDto::from(thread)))
}

#[utoipa::path(
    post,
    path = "/api/threads",
    tag = "threads",
    security(("bearer_auth" = [])),
    request_body = ThreadRequestDto,
    responses(
        (status = 201, description = "Thread created", body = ThreadDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_thread(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<ThreadRequestDto>,
) -> AppResult<(StatusCode, Json<ThreadDto>)> {
    dto.validate()?;

    let thread = state
        .thread_service
        .create_thread(auth.user_id, dto.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ThreadDto::from(thread))))
}

#[utoipa::path(
    put,
    path = "/api/threads/{thread_id}",
    tag = "threads",
    security(("bearer_auth" = [])),
    params(("thread_id" = i64, Path, description = "Thread id")),
    request_body = ThreadRequestDto,
    responses(
        (status = 204, description = "Thread updated"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author and not an admin"),
        (status = 404, description = "Thread not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_thread(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(thread_id): Path<i64>,
    Json(dto): Json<ThreadRequestDto>,
) -> AppResult<StatusCode> {
    dto.validate()?;

    let caller = current_user(&state, &auth).await?;
    let allowed = state
        .thread_service
        .can_user_modify_thread(caller.as_ref(), thread_id)
        .await?;
    if !allowed {
        warn!(user_id = auth.user_id, thread_id, "thread update forbidden");
    }
    ensure_allowed(allowed)?;

    state
        .thread_service
        .update_thread(thread_id, dto.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/threads/{thread_id}",
    tag = "threads",
    security(("bearer_auth" = [])),
    params(("thread_id" = i64, Path, description = "Thread id")),
    responses(
        (status = 204, description = "Thread, its posts and their replies deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author and not an admin"),
        (status = 404, description = "Thread not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_thread(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(thread_id): Path<i64>,
) -> AppResult<StatusCode> {
    let caller = current_user(&state, &auth).await?;
    let allowed = state
        .thread_service
        .can_user_modify_thread(caller.as_ref(), thread_id)
        .await?;
    if !allowed {
        warn!(user_id = auth.user_id, thread_id, "thread delete forbidden");
    }
    ensure_allowed(allowed)?;

    state.thread_service.delete_thread(thread_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
