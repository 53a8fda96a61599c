use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::{Role, User};

/// Admins may modify anything; everyone else only what they authored.
pub(crate) async fn is_owner_or_admin(
    users: &dyn UserRepository,
    user: Option<&User>,
    author_id: i64,
) -> Result<bool, DomainError> {
    let user = user.ok_or(DomainError::MissingUser)?;
    if users.is_in_role(user.id, Role::Admin).await? {
        return Ok(true);
    }
    Ok(user.id == author_id)
}
