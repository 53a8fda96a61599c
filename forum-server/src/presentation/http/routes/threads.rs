use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{
    create_post, create_reply, delete_post, delete_reply, list_posts, list_replies, update_post,
    update_reply,
};
use crate::presentation::http::handlers::threads::{
    create_thread, delete_thread, get_thread, list_threads, update_thread,
};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

/// Threads with their posts and replies nested underneath.
pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_threads))
        .route("/{thread_id}", get(get_thread))
        .route("/{thread_id}/posts", get(list_posts))
        .route("/{thread_id}/posts/{post_id}/replies", get(list_replies));

    let protected = Router::new()
        .route("/", post(create_thread))
        .route("/{thread_id}", put(update_thread).delete(delete_thread))
        .route("/{thread_id}/posts", post(create_post))
        .route(
            "/{thread_id}/posts/{post_id}",
            put(update_post).delete(delete_post),
        )
        .route("/{thread_id}/posts/{post_id}/replies", post(create_reply))
        .route(
            "/{thread_id}/posts/{post_id}/replies/{reply_id}",
            put(update_reply).delete(delete_reply),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    public.merge(protected)
}
