use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::map_db_error;
use crate::data::pagination::Pagination;
use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostView};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    content: String,
    thread_id: i64,
    author_id: i64,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct PostViewRow {
    id: i64,
    content: String,
    thread_id: i64,
    author_id: i64,
    created_at: DateTime<Utc>,
    author_name: Option<String>,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_posts_by_thread(
        &self,
        thread_id: i64,
        pagination: Pagination,
    ) -> Result<Vec<PostView>, DomainError> {
        if pagination.is_empty_window() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, PostViewRow>(
            r#"
            SELECT
                p.id,
                p.content,
                p.thread_id,
                p.author_id,
                p.created_at,
                u.username AS author_name
            FROM posts p
            LEFT JOIN users u ON u.id = p.author_id
            WHERE p.thread_id = $1
            ORDER BY p.id
            LIMIT $2
            OFFSET $3
            "#,
        )
        .bind(thread_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(map_row_to_view).collect()
    }

    async fn count_posts_by_thread(&self, thread_id: i64) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE thread_id = $1")
            .bind(thread_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn get_post(&self, id: i64) -> Result<Option<PostView>, DomainError> {
        let row = sqlx::query_as::<_, PostViewRow>(
            r#"
            SELECT
                p.id,
                p.content,
                p.thread_id,
                p.author_id,
                p.created_at,
                u.username AS author_name
            FROM posts p
            LEFT JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_view).transpose()
    }

    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (content, thread_id, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, thread_id, author_id, created_at
            "#,
        )
        .bind(input.content)
        .bind(input.thread_id)
        .bind(input.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_row_to_post(row)
    }

    async fn update_post(&self, id: i64, content: String) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET content = $2
            WHERE id = $1
            RETURNING id, content, thread_id, author_id, created_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_post).transpose()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post::new(row.id, row.content, row.thread_id, row.author_id, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_row_to_view(row: PostViewRow) -> Result<PostView, DomainError> {
    let post = Post::new(row.id, row.content, row.thread_id, row.author_id, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Ok(PostView {
        post,
        author_name: row.author_name,
    })
}
