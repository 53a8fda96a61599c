use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation::{validate_positive_id, validate_required_content};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) content: String,
    pub(crate) thread_id: i64,
    pub(crate) author_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

impl Post {
    pub(crate) fn new(
        id: i64,
        content: impl Into<String>,
        thread_id: i64,
        author_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_id("id", id)?;
        validate_positive_id("thread_id", thread_id)?;
        validate_positive_id("author_id", author_id)?;

        Ok(Self {
            id,
            content: content.into(),
            thread_id,
            author_id,
            created_at,
        })
    }
}

/// Message body shared by posts and replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MessageInput {
    pub(crate) content: String,
}

impl MessageInput {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_required_content(&self.content)?;
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PostView {
    pub(crate) post: Post,
    pub(crate) author_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{DomainError, MessageInput, Post};

    #[test]
    fn message_input_rejects_whitespace_only_content() {
        let input = MessageInput {
            content: " \n ".to_string(),
        };

        let err = input.validate().expect_err("content must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "content", .. }));
    }

    #[test]
    fn message_input_accepts_content_at_limit() {
        let input = MessageInput {
            content: "y".repeat(5000),
        };

        assert!(input.validate().is_ok());
    }

    #[test]
    fn post_new_rejects_non_positive_thread_id() {
        let err = Post::new(1, "body", 0, 1, Utc::now()).expect_err("thread_id must be > 0");
        assert!(matches!(err, DomainError::Validation { field: "thread_id", .. }));
    }
}
