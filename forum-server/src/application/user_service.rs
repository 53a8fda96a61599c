use std::sync::Arc;

use tracing::{info, warn};

use super::cascade::delete_user_tree;
use crate::data::cascade::CascadeStore;
use crate::data::pagination::{Page, Pagination};
use crate::data::user_repository::{UserPatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{User, UserUpdate, password_policy_errors};
use crate::infrastructure::password::PasswordHasher;

pub(crate) struct UserService {
    users: Arc<dyn UserRepository>,
    cascade: Arc<dyn CascadeStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub(crate) fn new(
        users: Arc<dyn UserRepository>,
        cascade: Arc<dyn CascadeStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            cascade,
            hasher,
        }
    }

    pub(crate) async fn list_users(
        &self,
        username: Option<&str>,
        page: i64,
        page_size: i64,
    ) -> Result<Page<User>, DomainError> {
        let username = username.filter(|username| !username.is_empty());
        let pagination = Pagination::new(page, page_size);

        let items = self.users.list_users(username, pagination).await?;
        let total = self.users.count_users(username).await?;

        Ok(Page { items, total })
    }

    pub(crate) async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.find_user(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    /// Resolves a token subject to the stored user, if it still exists.
    pub(crate) async fn find_user(&self, id: i64) -> Result<Option<User>, DomainError> {
        self.users.find_by_id(id).await
    }

    /// Overwrites username and email. A non-empty password replaces the
    /// current one after passing the password policy.
    pub(crate) async fn update_user(
        &self,
        id: i64,
        input: UserUpdate,
    ) -> Result<User, DomainError> {
        let input = input.validate()?;
        if self.users.find_by_id(id).await?.is_none() {
            warn!(user_id = id, "user not found for update");
            return Err(DomainError::user_not_found(id));
        }

        let password_hash = match input.password.as_deref() {
            Some(password) => {
                let errors = password_policy_errors(password);
                if !errors.is_empty() {
                    return Err(DomainError::PasswordRejected(errors.join(", ")));
                }
                Some(self.hasher.hash(password)?)
            }
            None => None,
        };

        let user = self
            .users
            .update_user(
                id,
                UserPatch {
                    username: input.username,
                    email: input.email,
                },
            )
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        if let Some(password_hash) = password_hash {
            self.users.update_password_hash(id, password_hash).await?;
            info!(user_id = id, "password reset");
        }
        info!(user_id = id, "user updated");

        Ok(user)
    }

    /// Removes the user together with every thread, post and reply they wrote.
    pub(crate) async fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        let mut tx = self.cascade.begin().await?;
        if !delete_user_tree(tx.as_mut(), id).await? {
            warn!(user_id = id, "user not found for deletion");
            return Err(DomainError::user_not_found(id));
        }
        tx.commit().await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }
}
