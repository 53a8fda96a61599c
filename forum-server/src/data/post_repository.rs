use async_trait::async_trait;

use super::pagination::Pagination;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostView};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) content: String,
    pub(crate) thread_id: i64,
    pub(crate) author_id: i64,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn list_posts_by_thread(
        &self,
        thread_id: i64,
        pagination: Pagination,
    ) -> Result<Vec<PostView>, DomainError>;
    async fn count_posts_by_thread(&self, thread_id: i64) -> Result<i64, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<PostView>, DomainError>;
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn update_post(&self, id: i64, content: String) -> Result<Option<Post>, DomainError>;
}
