use async_trait::async_trait;

use super::pagination::Pagination;
use crate::domain::error::DomainError;
use crate::domain::user::{Role, User};

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct UserPatch {
    pub(crate) username: String,
    pub(crate) email: String,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserCredentials>, DomainError>;
    async fn list_users(
        &self,
        username_filter: Option<&str>,
        pagination: Pagination,
    ) -> Result<Vec<User>, DomainError>;
    async fn count_users(&self, username_filter: Option<&str>) -> Result<i64, DomainError>;
    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, DomainError>;
    async fn update_password_hash(&self, id: i64, password_hash: String)
    -> Result<bool, DomainError>;

    async fn get_roles(&self, user_id: i64) -> Result<Vec<Role>, DomainError>;
    async fn is_in_role(&self, user_id: i64, role: Role) -> Result<bool, DomainError>;
    async fn add_to_role(&self, user_id: i64, role: Role) -> Result<(), DomainError>;
    async fn role_exists(&self, role: Role) -> Result<bool, DomainError>;
    async fn create_role(&self, role: Role) -> Result<(), DomainError>;
}
