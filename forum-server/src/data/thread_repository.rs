use async_trait::async_trait;

use super::pagination::Pagination;
use crate::domain::error::DomainError;
use crate::domain::thread::{Thread, ThreadView};

#[derive(Debug, Clone)]
pub(crate) struct NewThread {
    pub(crate) title: String,
    pub(crate) content: Option<String>,
    pub(crate) author_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct ThreadPatch {
    pub(crate) title: String,
    pub(crate) content: Option<String>,
}

#[async_trait]
pub(crate) trait ThreadRepository: Send + Sync {
    /// `title_filter` is a case-sensitive substring match on the title.
    async fn list_threads(
        &self,
        title_filter: Option<&str>,
        pagination: Pagination,
    ) -> Result<Vec<ThreadView>, DomainError>;
    async fn count_threads(&self, title_filter: Option<&str>) -> Result<i64, DomainError>;
    async fn get_thread(&self, id: i64) -> Result<Option<ThreadView>, DomainError>;
    async fn create_thread(&self, input: NewThread) -> Result<Thread, DomainError>;
    async fn update_thread(&self, id: i64, patch: ThreadPatch)
    -> Result<Option<Thread>, DomainError>;
}
