use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::user::Role;
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult};
use crate::presentation::http::mappers::{UserDto, UsersPageDto};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UserUpdateDto {
    #[validate(length(min = 1, message = "User Name is required"))]
    pub(crate) username: String,
    #[validate(email(message = "Invalid email address format"))]
    pub(crate) email: String,
    /// Left empty or omitted, the password is kept.
    pub(crate) password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsersQuery {
    pub(crate) user_name: Option<String>,
    pub(crate) page: Option<i64>,
    pub(crate) page_size: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("user_name" = Option<String>, Query, description = "Case-sensitive user name substring"),
        ("page" = Option<i64>, Query, description = "One-based page, default 1"),
        ("page_size" = Option<i64>, Query, description = "Items per page, default 10")
    ),
    responses(
        (status = 200, description = "Users listed", body = UsersPageDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "No users found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<UsersQuery>,
) -> AppResult<Json<UsersPageDto>> {
    auth.require_role(Role::Admin)?;

    let page = state
        .user_service
        .list_users(
            query.user_name.as_deref(),
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(10),
        )
        .await?;
    if page.total == 0 {
        return Err(AppError::Domain(DomainError::NotFound(
            "No users found.".to_string(),
        )));
    }

    Ok(Json(UsersPageDto::from(page)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Path(user_id): Path<i64>,
) -> AppResult<Json<UserDto>> {
    let user = state.user_service.get_user(user_id).await?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("user_id" = i64, Path, description = "User id")),
    request_body = UserUpdateDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation error or rejected password"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User name taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_user(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(user_id): Path<i64>,
    Json(dto): Json<UserUpdateDto>,
) -> AppResult<Json<UserDto>> {
    auth.require_role(Role::Admin)?;
    dto.validate()?;

    let user = state.user_service.update_user(user_id, dto.into()).await?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User and everything they wrote deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_user(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(user_id): Path<i64>,
) -> AppResult<StatusCode> {
    auth.require_role(Role::Admin)?;

    state.user_service.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
