use axum::Router;

use crate::presentation::AppState;

pub(crate) mod auth;
pub(crate) mod threads;
pub(crate) mod users;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::router())
        .nest("/api/threads", threads::router(state.clone()))
        .nest("/api/users", users::router(state))
}
