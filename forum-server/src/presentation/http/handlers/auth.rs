use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{LoginRequest, RegisterRequest, Role};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[validate(length(min = 1, message = "User Name is required"))]
    pub(crate) username: String,
    #[validate(email(message = "Invalid email address format"))]
    pub(crate) email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(length(min = 1, message = "User Name is required"))]
    pub(crate) username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LoginResponseDto {
    pub(crate) token: String,
    pub(crate) user_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RegistrationResponseDto {
    pub(crate) succeeded: bool,
    pub(crate) message: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 400, description = "Unknown user, wrong password or invalid body"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> AppResult<(StatusCode, Json<LoginResponseDto>)> {
    dto.validate()?;

    let req = LoginRequest {
        username: dto.username,
        password: dto.password,
    };
    let success = state.auth_service.login(Some(req)).await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponseDto {
            token: success.token,
            user_name: success.username,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/registration",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered with the User role", body = RegistrationResponseDto),
        (status = 400, description = "Duplicate user, weak password or invalid body"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterDto>,
) -> AppResult<(StatusCode, Json<RegistrationResponseDto>)> {
    dto.validate()?;

    let req = RegisterRequest {
        username: dto.username,
        email: dto.email,
        password: dto.password,
    };
    state.auth_service.register(Some(req), Role::User).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponseDto {
            succeeded: true,
            message: "User registered successfully".to_string(),
        }),
    ))
}
