use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

pub(crate) mod auth;
pub(crate) mod posts;
pub(crate) mod threads;
pub(crate) mod users;

/// The stored user behind a token. `None` once the account is gone.
pub(crate) async fn current_user(
    state: &AppState,
    auth: &AuthenticatedUser,
) -> AppResult<Option<User>> {
    Ok(state.user_service.find_user(auth.user_id).await?)
}

pub(crate) fn ensure_allowed(allowed: bool) -> AppResult<()> {
    if allowed {
        Ok(())
    } else {
        Err(AppError::Domain(DomainError::Forbidden))
    }
}
