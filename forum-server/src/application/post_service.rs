use std::sync::Arc;

use tracing::{info, warn};

use super::cascade::delete_post_tree;
use super::ownership::is_owner_or_admin;
use crate::data::cascade::CascadeStore;
use crate::data::pagination::{Page, Pagination};
use crate::data::post_repository::{NewPost, PostRepository};
use crate::data::reply_repository::{NewReply, ReplyRepository};
use crate::data::thread_repository::ThreadRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{MessageInput, Post, PostView};
use crate::domain::reply::{Reply, ReplyView};
use crate::domain::user::User;

/// Posts and the replies attached to them.
pub(crate) struct PostService {
    threads: Arc<dyn ThreadRepository>,
    posts: Arc<dyn PostRepository>,
    replies: Arc<dyn ReplyRepository>,
    users: Arc<dyn UserRepository>,
    cascade: Arc<dyn CascadeStore>,
}

impl PostService {
    pub(crate) fn new(
        threads: Arc<dyn ThreadRepository>,
        posts: Arc<dyn PostRepository>,
        replies: Arc<dyn ReplyRepository>,
        users: Arc<dyn UserRepository>,
        cascade: Arc<dyn CascadeStore>,
    ) -> Self {
        Self {
            threads,
            posts,
            replies,
            users,
            cascade,
        }
    }

    /// An empty page is reported as `NotFound`, including pages past the end.
    pub(crate) async fn get_posts_by_thread(
        &self,
        thread_id: i64,
        page: i64,
        page_size: i64,
    ) -> Result<Page<PostView>, DomainError> {
        let pagination = Pagination::new(page, page_size);
        let items = self
            .posts
            .list_posts_by_thread(thread_id, pagination)
            .await?;
        if items.is_empty() {
            warn!(thread_id, "no posts found for thread");
            return Err(DomainError::NotFound(format!(
                "Posts with this thread ID {thread_id} not found."
            )));
        }
        let total = self.posts.count_posts_by_thread(thread_id).await?;

        Ok(Page { items, total })
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<PostView, DomainError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub(crate) async fn add_post(
        &self,
        thread_id: i64,
        author_id: i64,
        input: MessageInput,
    ) -> Result<Post, DomainError> {
        let input = input.validate()?;
        if self.threads.get_thread(thread_id).await?.is_none() {
            warn!(thread_id, "post rejected, thread not found");
            return Err(DomainError::thread_not_found(thread_id));
        }

        let post = self
            .posts
            .create_post(NewPost {
                content: input.content,
                thread_id,
                author_id,
            })
            .await?;
        info!(post_id = post.id, thread_id, author_id, "post created");

        Ok(post)
    }

    pub(crate) async fn update_post(
        &self,
        id: i64,
        input: MessageInput,
    ) -> Result<Post, DomainError> {
        let input = input.validate()?;

        let post = self
            .posts
            .update_post(id, input.content)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        info!(post_id = id, "post updated");

        Ok(post)
    }

    pub(crate) async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
        let mut tx = self.cascade.begin().await?;
        if !delete_post_tree(tx.as_mut(), id).await? {
            warn!(post_id = id, "post not found for deletion");
            return Err(DomainError::post_not_found(id));
        }
        tx.commit().await?;
        info!(post_id = id, "post deleted");
        Ok(())
    }

    pub(crate) async fn get_replies_by_post(
        &self,
        post_id: i64,
    ) -> Result<Vec<ReplyView>, DomainError> {
        let replies = self.replies.list_replies_by_post(post_id).await?;
        if replies.is_empty() {
            warn!(post_id, "no replies found for post");
        }
        Ok(replies)
    }

    pub(crate) async fn add_reply(
        &self,
        post_id: i64,
        author_id: i64,
        input: MessageInput,
    ) -> Result<Reply, DomainError> {
        let input = input.validate()?;
        if self.posts.get_post(post_id).await?.is_none() {
            warn!(post_id, "reply rejected, post not found");
            return Err(DomainError::post_not_found(post_id));
        }

        let reply = self
            .replies
            .create_reply(NewReply {
                content: input.content,
                post_id,
                author_id,
            })
            .await?;
        info!(reply_id = reply.id, post_id, author_id, "reply created");

        Ok(reply)
    }

    pub(crate) async fn update_reply(
        &self,
        id: i64,
        input: MessageInput,
    ) -> Result<Reply, DomainError> {
        let input = input.validate()?;

        let reply = self
            .replies
            .update_reply(id, input.content)
            .await?
            .ok_or_else(|| DomainError::reply_not_found(id))?;
        info!(reply_id = id, "reply updated");

        Ok(reply)
    }

    pub(crate) async fn delete_reply(&self, id: i64) -> Result<(), DomainError> {
        let mut tx = self.cascade.begin().await?;
        if !tx.delete_reply(id).await? {
            warn!(reply_id = id, "reply not found for deletion");
            return Err(DomainError::reply_not_found(id));
        }
        tx.commit().await?;
        info!(reply_id = id, "reply deleted");
        Ok(())
    }

    pub(crate) async fn can_user_modify_post(
        &self,
        user: Option<&User>,
        id: i64,
    ) -> Result<bool, DomainError> {
        let post = self.get_post(id).await?;
        is_owner_or_admin(self.users.as_ref(), user, post.post.author_id).await
    }

    pub(crate) async fn can_user_modify_reply(
        &self,
        user: Option<&User>,
        id: i64,
    ) -> Result<bool, DomainError> {
        let reply = self
            .replies
            .get_reply(id)
            .await?
            .ok_or_else(|| DomainError::reply_not_found(id))?;
        is_owner_or_admin(self.users.as_ref(), user, reply.reply.author_id).await
    }
}
