use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::map_db_error;
use crate::data::reply_repository::{NewReply, ReplyRepository};
use crate::domain::error::DomainError;
use crate::domain::reply::{Reply, ReplyView};

#[derive(Debug, Clone)]
pub(crate) struct PostgresReplyRepository {
    pool: PgPool,
}

impl PostgresReplyRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ReplyRow {
    id: i64,
    content: String,
    post_id: i64,
    author_id: i64,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct ReplyViewRow {
    id: i64,
    content: String,
    post_id: i64,
    author_id: i64,
    created_at: DateTime<Utc>,
    author_name: Option<String>,
}

#[async_trait]
impl ReplyRepository for PostgresReplyRepository {
    async fn list_replies_by_post(&self, post_id: i64) -> Result<Vec<ReplyView>, DomainError> {
        let rows = sqlx::query_as::<_, ReplyViewRow>(
            r#"
            SELECT
                r.id,
                r.content,
                r.post_id,
                r.author_id,
                r.created_at,
                u.username AS author_name
            FROM replies r
            LEFT JOIN users u ON u.id = r.author_id
            WHERE r.post_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(map_row_to_view).collect()
    }

    async fn get_reply(&self, id: i64) -> Result<Option<ReplyView>, DomainError> {
        let row = sqlx::query_as::<_, ReplyViewRow>(
            r#"
            SELECT
                r.id,
                r.content,
                r.post_id,
                r.author_id,
                r.created_at,
                u.username AS author_name
            FROM replies r
            LEFT JOIN users u ON u.id = r.author_id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_view).transpose()
    }

    async fn create_reply(&self, input: NewReply) -> Result<Reply, DomainError> {
        let row = sqlx::query_as::<_, ReplyRow>(
            r#"
            INSERT INTO replies (content, post_id, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, post_id, author_id, created_at
            "#,
        )
        .bind(input.content)
        .bind(input.post_id)
        .bind(input.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_row_to_reply(row)
    }

    async fn update_reply(&self, id: i64, content: String) -> Result<Option<Reply>, DomainError> {
        let row = sqlx::query_as::<_, ReplyRow>(
            r#"
            UPDATE replies
            SET content = $2
            WHERE id = $1
            RETURNING id, content, post_id, author_id, created_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_reply).transpose()
    }
}

fn map_row_to_reply(row: ReplyRow) -> Result<Reply, DomainError> {
    Reply::new(row.id, row.content, row.post_id, row.author_id, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_row_to_view(row: ReplyViewRow) -> Result<ReplyView, DomainError> {
    let reply = Reply::new(row.id, row.content, row.post_id, row.author_id, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Ok(ReplyView {
        reply,
        author_name: row.author_name,
    })
}
