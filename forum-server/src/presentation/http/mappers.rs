//! Conversions between HTTP bodies and service types.
//!
//! Response DTOs carry the author's user name instead of a nested user, and
//! none of them exposes child collections.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::handlers::posts::MessageRequestDto;
use super::handlers::threads::ThreadRequestDto;
use super::handlers::users::UserUpdateDto;
use crate::data::pagination::Page;
use crate::domain::post::{MessageInput, PostView};
use crate::domain::reply::ReplyView;
use crate::domain::thread::{ThreadInput, ThreadView};
use crate::domain::user::{User, UserUpdate};

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ThreadDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: Option<String>,
    pub(crate) created: DateTime<Utc>,
    pub(crate) user_name: Option<String>,
    pub(crate) posts_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ThreadsPageDto {
    pub(crate) threads: Vec<ThreadDto>,
    pub(crate) threads_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) content: String,
    pub(crate) created: DateTime<Utc>,
    pub(crate) user_name: Option<String>,
    pub(crate) thread_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostsPageDto {
    pub(crate) posts: Vec<PostDto>,
    pub(crate) posts_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ReplyDto {
    pub(crate) id: i64,
    pub(crate) content: String,
    pub(crate) created: DateTime<Utc>,
    pub(crate) user_name: Option<String>,
    pub(crate) post_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) user_name: String,
    pub(crate) email: String,
    pub(crate) created: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UsersPageDto {
    pub(crate) users: Vec<UserDto>,
    pub(crate) users_count: i64,
}

impl From<ThreadView> for ThreadDto {
    fn from(view: ThreadView) -> Self {
        Self {
            id: view.thread.id,
            title: view.thread.title,
            content: view.thread.content,
            created: view.thread.created_at,
            user_name: view.author_name,
            posts_count: view.post_count,
        }
    }
}

impl From<Page<ThreadView>> for ThreadsPageDto {
    fn from(page: Page<ThreadView>) -> Self {
        Self {
            threads: page.items.into_iter().map(ThreadDto::from).collect(),
            threads_count: page.total,
        }
    }
}

impl From<PostView> for PostDto {
    fn from(view: PostView) -> Self {
        Self {
            id: view.post.id,
            content: view.post.content,
            created: view.post.created_at,
            user_name: view.author_name,
            thread_id: view.post.thread_id,
        }
    }
}

impl From<Page<PostView>> for PostsPageDto {
    fn from(page: Page<PostView>) -> Self {
        Self {
            posts: page.items.into_iter().map(PostDto::from).collect(),
            posts_count: page.total,
        }
    }
}

impl From<ReplyView> for ReplyDto {
    fn from(view: ReplyView) -> Self {
        Self {
            id: view.reply.id,
            content: view.reply.content,
            created: view.reply.created_at,
            user_name: view.author_name,
            post_id: view.reply.post_id,
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.username,
            email: user.email,
            created: user.created_at,
        }
    }
}

impl From<Page<User>> for UsersPageDto {
    fn from(page: Page<User>) -> Self {
        Self {
            users: page.items.into_iter().map(UserDto::from).collect(),
            users_count: page.total,
        }
    }
}

impl From<ThreadRequestDto> for ThreadInput {
    fn from(dto: ThreadRequestDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
        }
    }
}

impl From<MessageRequestDto> for MessageInput {
    fn from(dto: MessageRequestDto) -> Self {
        Self {
            content: dto.content,
        }
    }
}

impl From<UserUpdateDto> for UserUpdate {
    fn from(dto: UserUpdateDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            password: dto.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{ThreadDto, ThreadsPageDto};
    use crate::data::pagination::Page;
    use crate::domain::thread::{Thread, ThreadView};

    #[test]
    fn thread_page_keeps_total_not_page_length() {
        let thread = Thread::new(1, "Title", None, 2, Utc::now()).expect("valid thread");
        let page = Page {
            items: vec![ThreadView {
                thread,
                author_name: Some("bob".to_string()),
                post_count: 4,
            }],
            total: 9,
        };

        let dto = ThreadsPageDto::from(page);
        assert_eq!(dto.threads_count, 9);
        assert_eq!(dto.threads.len(), 1);
        let ThreadDto {
            user_name,
            posts_count,
            ..
        } = &dto.threads[0];
        assert_eq!(user_name.as_deref(), Some("bob"));
        assert_eq!(*posts_count, 4);
    }
}
