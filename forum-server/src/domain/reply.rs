use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation::validate_positive_id;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Reply {
    pub(crate) id: i64,
    pub(crate) content: String,
    pub(crate) post_id: i64,
    pub(crate) author_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

impl Reply {
    pub(crate) fn new(
        id: i64,
        content: impl Into<String>,
        post_id: i64,
        author_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_id("id", id)?;
        validate_positive_id("post_id", post_id)?;
        validate_positive_id("author_id", author_id)?;

        Ok(Self {
            id,
            content: content.into(),
            post_id,
            author_id,
            created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ReplyView {
    pub(crate) reply: Reply,
    pub(crate) author_name: Option<String>,
}
