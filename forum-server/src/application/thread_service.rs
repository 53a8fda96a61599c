use std::sync::Arc;

use tracing::{info, warn};

use super::cascade::delete_thread_tree;
use super::ownership::is_owner_or_admin;
use crate::data::cascade::CascadeStore;
use crate::data::pagination::{Page, Pagination};
use crate::data::thread_repository::{NewThread, ThreadPatch, ThreadRepository};
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::thread::{Thread, ThreadInput, ThreadView};
use crate::domain::user::User;

pub(crate) struct ThreadService {
    threads: Arc<dyn ThreadRepository>,
    users: Arc<dyn UserRepository>,
    cascade: Arc<dyn CascadeStore>,
}

impl ThreadService {
    pub(crate) fn new(
        threads: Arc<dyn ThreadRepository>,
        users: Arc<dyn UserRepository>,
        cascade: Arc<dyn CascadeStore>,
    ) -> Self {
        Self {
            threads,
            users,
            cascade,
        }
    }

    pub(crate) async fn list_threads(
        &self,
        title: Option<&str>,
        page: i64,
        page_size: i64,
    ) -> Result<Page<ThreadView>, DomainError> {
        let title = title.filter(|title| !title.is_empty());
        let pagination = Pagination::new(page, page_size);

        let items = self.threads.list_threads(title, pagination).await?;
        let total = self.threads.count_threads(title).await?;

        Ok(Page { items, total })
    }

    pub(crate) async fn get_thread(&self, id: i64) -> Result<ThreadView, DomainError> {
        self.threads.get_thread(id).await?.ok_or_else(|| {
            warn!(thread_id = id, "thread not found");
            DomainError::thread_not_found(id)
        })
    }

    pub(crate) async fn create_thread(
        &self,
        author_id: i64,
        input: ThreadInput,
    ) -> Result<ThreadView, DomainError> {
        let input = input.validate()?;

        let thread = self
            .threads
            .create_thread(NewThread {
                title: input.title,
                content: input.content,
                author_id,
            })
            .await?;
        info!(thread_id = thread.id, author_id, "thread created");

        self.get_thread(thread.id).await
    }

    /// Overwrites title and content. The author stays the original one.
    pub(crate) async fn update_thread(
        &self,
        id: i64,
        input: ThreadInput,
    ) -> Result<Thread, DomainError> {
        let input = input.validate()?;

        let thread = self
            .threads
            .update_thread(
                id,
                ThreadPatch {
                    title: input.title,
                    content: input.content,
                },
            )
            .await?
            .ok_or_else(|| DomainError::thread_not_found(id))?;
        info!(thread_id = id, "thread updated");

        Ok(thread)
    }

    pub(crate) async fn delete_thread(&self, id: i64) -> Result<(), DomainError> {
        let mut tx = self.cascade.begin().await?;
        if !delete_thread_tree(tx.as_mut(), id).await? {
            warn!(thread_id = id, "thread not found for deletion");
            return Err(DomainError::thread_not_found(id));
        }
        tx.commit().await?;
        info!(thread_id = id, "thread deleted");
        Ok(())
    }

    pub(crate) async fn can_user_modify_thread(
        &self,
        user: Option<&User>,
        id: i64,
    ) -> Result<bool, DomainError> {
        let thread = self.get_thread(id).await?;
        is_owner_or_admin(self.users.as_ref(), user, thread.thread.author_id).await
    }
}
