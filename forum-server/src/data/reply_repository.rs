use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::reply::{Reply, ReplyView};

#[derive(Debug, Clone)]
pub(crate) struct NewReply {
    pub(crate) content: String,
    pub(crate) post_id: i64,
    pub(crate) author_id: i64,
}

#[async_trait]
pub(crate) trait ReplyRepository: Send + Sync {
    async fn list_replies_by_post(&self, post_id: i64) -> Result<Vec<ReplyView>, DomainError>;
    async fn get_reply(&self, id: i64) -> Result<Option<ReplyView>, DomainError>;
    async fn create_reply(&self, input: NewReply) -> Result<Reply, DomainError>;
    async fn update_reply(&self, id: i64, content: String) -> Result<Option<Reply>, DomainError>;
}
