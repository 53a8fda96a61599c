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
use crate::domain::post::PostView;
use crate::domain::reply::ReplyView;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::mappers::{PostDto, PostsPageDto, ReplyDto};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

/// Body of a post or a reply.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct MessageRequestDto {
    #[validate(length(min = 1, max = 5000))]
    pub(crate) content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostsQuery {
    pub(crate) page: Option<i64>,
    pub(crate) page_size: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/threads/{thread_id}/posts",
    tag = "posts",
    params(
        ("thread_id" = i64, Path, description = "Thread id"),
        ("page" = Option<i64>, Query, description = "One-based page, default 1"),
        ("page_size" = Option<i64>, Query, description = "Items per page, default 10")
    ),
    responses(
        (status = 200, description = "Posts listed", body = PostsPageDto),
        (status = 404, description = "No posts on the requested page"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Path(thread_id): Path<i64>,
    Query(query): Query<PostsQuery>,
) -> AppResult<Json<PostsPageDto>> {
    let page = state
        .post_service
        .get_posts_by_thread(
            thread_id,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(10),
        )
        .await?;

    Ok(Json(PostsPageDto::from(page)))
}

#[utoipa::path(
    post,
    path = "/api/threads/{thread_id}/posts",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("thread_id" = i64, Path, description = "Thread id")),
    request_body = MessageRequestDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Thread not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(thread_id): Path<i64>,
    Json(dto): Json<MessageRequestDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;

    let post = state
        .post_service
        .add_post(thread_id, auth.user_id, dto.into())
        .await?;
    let view = PostView {
        post,
        author_name: Some(auth.username),
    };
    Ok((StatusCode::CREATED, Json(PostDto::from(view))))
}

#[utoipa::path(
    put,
    path = "/api/threads/{thread_id}/posts/{post_id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(
        ("thread_id" = i64, Path, description = "Thread id"),
        ("post_id" = i64, Path, description = "Post id")
    ),
    request_body = MessageRequestDto,
    responses(
        (status = 204, description = "Post updated"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author and not an admin"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path((_thread_id, post_id)): Path<(i64, i64)>,
    Json(dto): Json<MessageRequestDto>,
) -> AppResult<StatusCode> {
    dto.validate()?;

    let caller = current_user(&state, &auth).await?;
    let allowed = state
        .post_service
        .can_user_modify_post(caller.as_ref(), post_id)
        .await?;
    if !allowed {
        warn!(user_id = auth.user_id, post_id, "post update forbidden");
    }
    ensure_allowed(allowed)?;

    state.post_service.update_post(post_id, dto.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/threads/{thread_id}/posts/{post_id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(
        ("thread_id" = i64, Path, description = "Thread id"),
        ("post_id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post and its replies deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author and not an admin"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path((_thread_id, post_id)): Path<(i64, i64)>,
) -> AppResult<StatusCode> {
    let caller = current_user(&state, &auth).await?;
    let allowed = state
        .post_service
        .can_user_modify_post(caller.as_ref(), post_id)
        .await?;
    if !allowed {
        warn!(user_id = auth.user_id, post_id, "post delete forbidden");
    }
    ensure_allowed(allowed)?;

    state.post_service.delete_post(post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/threads/{thread_id}/posts/{post_id}/replies",
    tag = "replies",
    params(
        ("thread_id" = i64, Path, description = "Thread id"),
        ("post_id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Replies listed, possibly empty", body = [ReplyDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_replies(
    State(state): State<AppState>,
    Path((_thread_id, post_id)): Path<(i64, i64)>,
) -> AppResult<Json<Vec<ReplyDto>>> {
    let replies = state.post_service.get_replies_by_post(post_id).await?;
    Ok(Json(replies.into_iter().map(ReplyDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/threads/{thread_id}/posts/{post_id}/replies",
    tag = "replies",
    security(("bearer_auth" = [])),
    params(
        ("thread_id" = i64, Path, description = "Thread id"),
        ("post_id" = i64, Path, description = "Post id")
    ),
    request_body = MessageRequestDto,
    responses(
        (status = 201, description = "Reply created", body = ReplyDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_reply(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path((_thread_id, post_id)): Path<(i64, i64)>,
    Json(dto): Json<MessageRequestDto>,
) -> AppResult<(StatusCode, Json<ReplyDto>)> {
    dto.validate()?;

    let reply = state
        .post_service
        .add_reply(post_id, auth.user_id, dto.into())
        .await?;
    let view = ReplyView {
        reply,
        author_name: Some(auth.username),
    };
    Ok((StatusCode::CREATED, Json(ReplyDto::from(view))))
}

#[utoipa::path(
    put,
    path = "/api/threads/{thread_id}/posts/{post_id}/replies/{reply_id}",
    tag = "replies",
    security(("bearer_auth" = [])),
    params(
        ("thread_id" = i64, Path, description = "Thread id"),
        ("post_id" = i64, Path, description = "Post id"),
        ("reply_id" = i64, Path, description = "Reply id")
    ),
    request_body = MessageRequestDto,
    responses(
        (status = 204, description = "Reply updated"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author and not an admin"),
        (status = 404, description = "Reply not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_reply(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path((_thread_id, _post_id, reply_id)): Path<(i64, i64, i64)>,
    Json(dto): Json<MessageRequestDto>,
) -> AppResult<StatusCode> {
    dto.validate()?;

    let caller = current_user(&state, &auth).await?;
    let allowed = state
        .post_service
        .can_user_modify_reply(caller.as_ref(), reply_id)
        .await?;
    if !allowed {
        warn!(user_id = auth.user_id, reply_id, "reply update forbidden");
    }
    ensure_allowed(allowed)?;

    state.post_service.update_reply(reply_id, dto.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/threads/{thread_id}/posts/{post_id}/replies/{reply_id}",
    tag = "replies",
    security(("bearer_auth" = [])),
    params(
        ("thread_id" = i64, Path, description = "Thread id"),
        ("post_id" = i64, Path, description = "Post id"),
        ("reply_id" = i64, Path, description = "Reply id")
    ),
    responses(
        (status = 204, description = "Reply deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author and not an admin"),
        (status = 404, description = "Reply not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_reply(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path((_thread_id, _post_id, reply_id)): Path<(i64, i64, i64)>,
) -> AppResult<StatusCode> {
    let caller = current_user(&state, &auth).await?;
    let allowed = state
        .post_service
        .can_user_modify_reply(caller.as_ref(), reply_id)
        .await?;
    if !allowed {
        warn!(user_id = auth.user_id, reply_id, "reply delete forbidden");
    }
    ensure_allowed(allowed)?;

    state.post_service.delete_reply(reply_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
