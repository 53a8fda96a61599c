use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::application::auth_service::AuthFailure;
use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Auth(#[from] AuthFailure),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("unauthorized")]
    Unauthorized,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation { .. } | DomainError::PasswordRejected(_) => {
            StatusCode::BAD_REQUEST
        }
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::AlreadyExists(_) => StatusCode::CONFLICT,
        DomainError::Forbidden => StatusCode::FORBIDDEN,
        DomainError::MissingUser => StatusCode::UNAUTHORIZED,
        DomainError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) | AppError::Auth(AuthFailure::Internal(err)) => {
                (domain_status(&err), err.to_string())
            }
            AppError::Auth(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
        };

        let msg = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %msg, "request failed");
            "internal error".to_string()
        } else {
            msg
        };

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    use super::AppError;
    use crate::application::auth_service::AuthFailure;
    use crate::domain::error::DomainError;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn domain_errors_map_to_statuses() {
        let cases = [
            (
                DomainError::Validation {
                    field: "title",
                    message: "must not be empty",
                },
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::thread_not_found(1), StatusCode::NOT_FOUND),
            (DomainError::Forbidden, StatusCode::FORBIDDEN),
            (DomainError::MissingUser, StatusCode::UNAUTHORIZED),
            (
                DomainError::AlreadyExists("username".to_string()),
                StatusCode::CONFLICT,
            ),
        ];

        for (err, expected) in cases {
            let (status, _) = render(AppError::Domain(err)).await;
            assert_eq!(status, expected);
        }
    }

    #[tokio::test]
    async fn not_found_keeps_its_message() {
        let (_, body) = render(AppError::Domain(DomainError::post_not_found(5))).await;
        assert_eq!(body["error"], "Post with ID 5 not found.");
    }

    #[tokio::test]
    async fn unexpected_errors_are_redacted() {
        let (status, body) = render(AppError::Domain(DomainError::Unexpected(
            "connection refused".to_string(),
        )))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal error");
    }

    #[tokio::test]
    async fn auth_failures_are_bad_requests_with_message() {
        let (status, body) = render(AppError::Auth(AuthFailure::InvalidPassword)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid password");

        let (status, _) = render(AppError::Auth(AuthFailure::Internal(
            DomainError::Unexpected("db down".to_string()),
        )))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
