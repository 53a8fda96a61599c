use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::map_db_error;
use crate::data::cascade::{CascadeStore, CascadeTx};
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCascadeStore {
    pool: PgPool,
}

impl PostgresCascadeStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CascadeStore for PostgresCascadeStore {
    async fn begin(&self) -> Result<Box<dyn CascadeTx>, DomainError> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PostgresCascadeTx { tx }))
    }
}

/// Rolled back by `sqlx` when dropped before `commit`.
struct PostgresCascadeTx {
    tx: Transaction<'static, Postgres>,
}

impl PostgresCascadeTx {
    async fn ids(&mut self, sql: &'static str, key: i64) -> Result<Vec<i64>, DomainError> {
        sqlx::query_scalar::<_, i64>(sql)
            .bind(key)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(map_db_error)
    }

    async fn delete(&mut self, sql: &'static str, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CascadeTx for PostgresCascadeTx {
    async fn post_ids_by_thread(&mut self, thread_id: i64) -> Result<Vec<i64>, DomainError> {
        self.ids("SELECT id FROM posts WHERE thread_id = $1", thread_id)
            .await
    }

    async fn reply_ids_by_post(&mut self, post_id: i64) -> Result<Vec<i64>, DomainError> {
        self.ids("SELECT id FROM replies WHERE post_id = $1", post_id)
            .await
    }

    async fn thread_ids_by_author(&mut self, author_id: i64) -> Result<Vec<i64>, DomainError> {
        self.ids("SELECT id FROM threads WHERE author_id = $1", author_id)
            .await
    }

    async fn post_ids_by_author(&mut self, author_id: i64) -> Result<Vec<i64>, DomainError> {
        self.ids("SELECT id FROM posts WHERE author_id = $1", author_id)
            .await
    }

    async fn reply_ids_by_author(&mut self, author_id: i64) -> Result<Vec<i64>, DomainError> {
        self.ids("SELECT id FROM replies WHERE author_id = $1", author_id)
            .await
    }

    async fn delete_reply(&mut self, id: i64) -> Result<bool, DomainError> {
        self.delete("DELETE FROM replies WHERE id = $1", id).await
    }

    async fn delete_post(&mut self, id: i64) -> Result<bool, DomainError> {
        self.delete("DELETE FROM posts WHERE id = $1", id).await
    }

    async fn delete_thread(&mut self, id: i64) -> Result<bool, DomainError> {
        self.delete("DELETE FROM threads WHERE id = $1", id).await
    }

    async fn delete_user(&mut self, id: i64) -> Result<bool, DomainError> {
        self.delete("DELETE FROM users WHERE id = $1", id).await
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx.commit().await.map_err(map_db_error)
    }
}
