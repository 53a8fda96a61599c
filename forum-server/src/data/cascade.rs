//! Unit of work for multi-row deletes.
//!
//! A [`CascadeTx`] groups the child lookups and single-row deletes of one
//! cascade. Nothing becomes visible until [`CascadeTx::commit`]; dropping the
//! unit without committing discards every delete made through it.

use async_trait::async_trait;

use crate::domain::error::DomainError;

#[async_trait]
pub(crate) trait CascadeStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn CascadeTx>, DomainError>;
}

#[async_trait]
pub(crate) trait CascadeTx: Send {
    async fn post_ids_by_thread(&mut self, thread_id: i64) -> Result<Vec<i64>, DomainError>;
    async fn reply_ids_by_post(&mut self, post_id: i64) -> Result<Vec<i64>, DomainError>;
    async fn thread_ids_by_author(&mut self, author_id: i64) -> Result<Vec<i64>, DomainError>;
    async fn post_ids_by_author(&mut self, author_id: i64) -> Result<Vec<i64>, DomainError>;
    async fn reply_ids_by_author(&mut self, author_id: i64) -> Result<Vec<i64>, DomainError>;

    async fn delete_reply(&mut self, id: i64) -> Result<bool, DomainError>;
    async fn delete_post(&mut self, id: i64) -> Result<bool, DomainError>;
    async fn delete_thread(&mut self, id: i64) -> Result<bool, DomainError>;
    async fn delete_user(&mut self, id: i64) -> Result<bool, DomainError>;

    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}
