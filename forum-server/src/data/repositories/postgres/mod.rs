use crate::domain::error::DomainError;

pub(crate) mod cascade;
pub(crate) mod post_repository;
pub(crate) mod reply_repository;
pub(crate) mod thread_repository;
pub(crate) mod user_repository;

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

pub(crate) fn map_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(FOREIGN_KEY_VIOLATION) => {
                let message = match db_err.constraint() {
                    Some("posts_thread_id_fkey") => "Thread not found.",
                    Some("replies_post_id_fkey") => "Post not found.",
                    Some("user_roles_role_name_fkey") => "Role not found.",
                    _ => "Author not found.",
                };
                return DomainError::NotFound(message.to_string());
            }
            Some(UNIQUE_VIOLATION) => {
                let resource = match db_err.constraint() {
                    Some("users_username_key") => "username",
                    _ => "record",
                };
                return DomainError::AlreadyExists(resource.to_string());
            }
            _ => {}
        }
    }
    DomainError::Unexpected(err.to_string())
}
