use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    #[error("Failed to update password: {0}")]
    PasswordRejected(String),

    #[error("forbidden")]
    Forbidden,

    /// The caller could not be resolved to a stored user.
    #[error("user is required")]
    MissingUser,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}

impl DomainError {
    pub(crate) fn thread_not_found(id: i64) -> Self {
        Self::NotFound(format!("Thread with ID {id} not found."))
    }

    pub(crate) fn post_not_found(id: i64) -> Self {
        Self::NotFound(format!("Post with ID {id} not found."))
    }

    pub(crate) fn reply_not_found(id: i64) -> Self {
        Self::NotFound(format!("Reply with ID {id} not found."))
    }

    pub(crate) fn user_not_found(id: i64) -> Self {
        Self::NotFound(format!("User with ID {id} not found."))
    }
}
