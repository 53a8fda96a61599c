use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation::{validate_optional_content, validate_positive_id, validate_title};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Thread {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: Option<String>,
    pub(crate) author_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

impl Thread {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        content: Option<String>,
        author_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_id("id", id)?;
        validate_positive_id("author_id", author_id)?;

        Ok(Self {
            id,
            title: title.into(),
            content,
            author_id,
            created_at,
        })
    }
}

/// Create and update payload for a thread. Updates overwrite both fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ThreadInput {
    pub(crate) title: String,
    pub(crate) content: Option<String>,
}

impl ThreadInput {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_title(&self.title)?;
        validate_optional_content(self.content.as_deref())?;
        Ok(self)
    }
}

/// A thread joined with its author's name and the size of its post collection.
#[derive(Debug, Clone)]
pub(crate) struct ThreadView {
    pub(crate) thread: Thread,
    pub(crate) author_name: Option<String>,
    pub(crate) post_count: i64,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{DomainError, Thread, ThreadInput};

    #[test]
    fn thread_input_rejects_blank_title() {
        let input = ThreadInput {
            title: "   ".to_string(),
            content: Some("content".to_string()),
        };

        let err = input.validate().expect_err("blank title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn thread_input_rejects_oversized_content() {
        let input = ThreadInput {
            title: "Title".to_string(),
            content: Some("x".repeat(5001)),
        };

        let err = input.validate().expect_err("content must be rejected");
        assert_validation_field(err, "content");
    }

    #[test]
    fn thread_input_keeps_fields_untouched() {
        let input = ThreadInput {
            title: " Title ".to_string(),
            content: None,
        };

        let validated = input.validate().expect("must validate");
        assert_eq!(validated.title, " Title ");
        assert!(validated.content.is_none());
    }

    #[test]
    fn thread_new_rejects_non_positive_author_id() {
        let err = Thread::new(1, "Title", None, 0, Utc::now()).expect_err("author_id must be > 0");
        assert_validation_field(err, "author_id");
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
