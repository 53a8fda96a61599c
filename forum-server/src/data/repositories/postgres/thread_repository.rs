use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::map_db_error;
use crate::data::pagination::Pagination;
use crate::data::thread_repository::{NewThread, ThreadPatch, ThreadRepository};
use crate::domain::error::DomainError;
use crate::domain::thread::{Thread, ThreadView};

#[derive(Debug, Clone)]
pub(crate) struct PostgresThreadRepository {
    pool: PgPool,
}

impl PostgresThreadRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ThreadRow {
    id: i64,
    title: String,
    content: Option<String>,
    author_id: i64,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct ThreadViewRow {
    id: i64,
    title: String,
    content: Option<String>,
    author_id: i64,
    created_at: DateTime<Utc>,
    author_name: Option<String>,
    post_count: i64,
}

const SELECT_THREAD_VIEW: &str = r#"
    SELECT
        t.id,
        t.title,
        t.content,
        t.author_id,
        t.created_at,
        u.username AS author_name,
        (SELECT COUNT(*) FROM posts p WHERE p.thread_id = t.id) AS post_count
    FROM threads t
    LEFT JOIN users u ON u.id = t.author_id
"#;

#[async_trait]
impl ThreadRepository for PostgresThreadRepository {
    async fn list_threads(
        &self,
        title_filter: Option<&str>,
        pagination: Pagination,
    ) -> Result<Vec<ThreadView>, DomainError> {
        if pagination.is_empty_window() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "{SELECT_THREAD_VIEW}
            WHERE ($1::TEXT IS NULL OR strpos(t.title, $1) > 0)
            ORDER BY t.id
            LIMIT $2
            OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ThreadViewRow>(&sql)
            .bind(title_filter)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(map_row_to_view).collect()
    }

    async fn count_threads(&self, title_filter: Option<&str>) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM threads
            WHERE ($1::TEXT IS NULL OR strpos(title, $1) > 0)
            "#,
        )
        .bind(title_filter)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn get_thread(&self, id: i64) -> Result<Option<ThreadView>, DomainError> {
        let sql = format!("{SELECT_THREAD_VIEW} WHERE t.id = $1");
        let row = sqlx::query_as::<_, ThreadViewRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        row.map(map_row_to_view).transpose()
    }

    async fn create_thread(&self, input: NewThread) -> Result<Thread, DomainError> {
        let row = sqlx::query_as::<_, ThreadRow>(
            r#"
            INSERT INTO threads (title, content, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, author_id, created_at
            "#,
        )
        .bind(input.title)
        .bind(input.content)
        .bind(input.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_row_to_thread(row)
    }

    async fn update_thread(
        &self,
        id: i64,
        patch: ThreadPatch,
    ) -> Result<Option<Thread>, DomainError> {
        let row = sqlx::query_as::<_, ThreadRow>(
            r#"
            UPDATE threads
            SET title = $2,
                content = $3
            WHERE id = $1
            RETURNING id, title, content, author_id, created_at
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.content)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_thread).transpose()
    }
}

fn map_row_to_thread(row: ThreadRow) -> Result<Thread, DomainError> {
    Thread::new(row.id, row.title, row.content, row.author_id, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_row_to_view(row: ThreadViewRow) -> Result<ThreadView, DomainError> {
    let thread = Thread::new(row.id, row.title, row.content, row.author_id, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Ok(ThreadView {
        thread,
        author_name: row.author_name,
        post_count: row.post_count,
    })
}
