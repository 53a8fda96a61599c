//! In-memory storage backing service and router tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::data::cascade::{CascadeStore, CascadeTx};
use crate::data::pagination::Pagination;
use crate::data::post_repository::{NewPost, PostRepository};
use crate::data::reply_repository::{NewReply, ReplyRepository};
use crate::data::thread_repository::{NewThread, ThreadPatch, ThreadRepository};
use crate::data::user_repository::{NewUser, UserCredentials, UserPatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostView};
use crate::domain::reply::{Reply, ReplyView};
use crate::domain::thread::{Thread, ThreadView};
use crate::domain::user::{Role, User};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    next_id: i64,
    users: BTreeMap<i64, UserCredentials>,
    roles: HashSet<Role>,
    user_roles: HashSet<(i64, Role)>,
    threads: BTreeMap<i64, Thread>,
    posts: BTreeMap<i64, Post>,
    replies: BTreeMap<i64, Reply>,
    failing_post_delete: Option<i64>,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn author_name(&self, author_id: i64) -> Option<String> {
        self.users
            .get(&author_id)
            .map(|creds| creds.user.username.clone())
    }

    fn thread_view(&self, thread: &Thread) -> ThreadView {
        ThreadView {
            thread: thread.clone(),
            author_name: self.author_name(thread.author_id),
            post_count: self
                .posts
                .values()
                .filter(|post| post.thread_id == thread.id)
                .count() as i64,
        }
    }

    fn post_view(&self, post: &Post) -> PostView {
        PostView {
            post: post.clone(),
            author_name: self.author_name(post.author_id),
        }
    }

    fn reply_view(&self, reply: &Reply) -> ReplyView {
        ReplyView {
            reply: reply.clone(),
            author_name: self.author_name(reply.author_id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory store mutex poisoned")
    }

    /// Makes every cascade delete of `post_id` fail.
    pub(crate) fn fail_post_delete(&self, post_id: i64) {
        self.lock().failing_post_delete = Some(post_id);
    }

    pub(crate) fn thread_exists(&self, id: i64) -> bool {
        self.lock().threads.contains_key(&id)
    }

    pub(crate) fn post_exists(&self, id: i64) -> bool {
        self.lock().posts.contains_key(&id)
    }

    pub(crate) fn reply_exists(&self, id: i64) -> bool {
        self.lock().replies.contains_key(&id)
    }

    pub(crate) fn user_exists(&self, id: i64) -> bool {
        self.lock().users.contains_key(&id)
    }

    pub(crate) fn posts_in_thread(&self, thread_id: i64) -> usize {
        self.lock()
            .posts
            .values()
            .filter(|post| post.thread_id == thread_id)
            .count()
    }

    pub(crate) fn replies_to_post(&self, post_id: i64) -> usize {
        self.lock()
            .replies
            .values()
            .filter(|reply| reply.post_id == post_id)
            .count()
    }
}

fn page<T>(items: Vec<T>, pagination: Pagination) -> Vec<T> {
    if pagination.is_empty_window() {
        return Vec::new();
    }
    items
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(pagination.limit() as usize)
        .collect()
}

fn matches(value: &str, filter: Option<&str>) -> bool {
    filter.is_none_or(|needle| value.contains(needle))
}

#[async_trait]
impl ThreadRepository for MemoryStore {
    async fn list_threads(
        &self,
        title_filter: Option<&str>,
        pagination: Pagination,
    ) -> Result<Vec<ThreadView>, DomainError> {
        let state = self.lock();
        let views = state
            .threads
            .values()
            .filter(|thread| matches(&thread.title, title_filter))
            .map(|thread| state.thread_view(thread))
            .collect();
        Ok(page(views, pagination))
    }

    async fn count_threads(&self, title_filter: Option<&str>) -> Result<i64, DomainError> {
        Ok(self
            .lock()
            .threads
            .values()
            .filter(|thread| matches(&thread.title, title_filter))
            .count() as i64)
    }

    async fn get_thread(&self, id: i64) -> Result<Option<ThreadView>, DomainError> {
        let state = self.lock();
        Ok(state.threads.get(&id).map(|thread| state.thread_view(thread)))
    }

    async fn create_thread(&self, input: NewThread) -> Result<Thread, DomainError> {
        let mut state = self.lock();
        if !state.users.contains_key(&input.author_id) {
            return Err(DomainError::NotFound("Author not found.".to_string()));
        }
        let id = state.next_id();
        let thread = Thread::new(id, input.title, input.content, input.author_id, Utc::now())?;
        state.threads.insert(id, thread.clone());
        Ok(thread)
    }

    async fn update_thread(
        &self,
        id: i64,
        patch: ThreadPatch,
    ) -> Result<Option<Thread>, DomainError> {
        let mut state = self.lock();
        Ok(state.threads.get_mut(&id).map(|thread| {
            thread.title = patch.title;
            thread.content = patch.content;
            thread.clone()
        }))
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn list_posts_by_thread(
        &self,
        thread_id: i64,
        pagination: Pagination,
    ) -> Result<Vec<PostView>, DomainError> {
        let state = self.lock();
        let views = state
            .posts
            .values()
            .filter(|post| post.thread_id == thread_id)
            .map(|post| state.post_view(post))
            .collect();
        Ok(page(views, pagination))
    }

    async fn count_posts_by_thread(&self, thread_id: i64) -> Result<i64, DomainError> {
        Ok(self.posts_in_thread(thread_id) as i64)
    }

    async fn get_post(&self, id: i64) -> Result<Option<PostView>, DomainError> {
        let state = self.lock();
        Ok(state.posts.get(&id).map(|post| state.post_view(post)))
    }

    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut state = self.lock();
        if !state.threads.contains_key(&input.thread_id) {
            return Err(DomainError::NotFound("Thread not found.".to_string()));
        }
        let id = state.next_id();
        let post = Post::new(id, input.content, input.thread_id, input.author_id, Utc::now())?;
        state.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: i64, content: String) -> Result<Option<Post>, DomainError> {
        let mut state = self.lock();
        Ok(state.posts.get_mut(&id).map(|post| {
            post.content = content;
            post.clone()
        }))
    }
}

#[async_trait]
impl ReplyRepository for MemoryStore {
    async fn list_replies_by_post(&self, post_id: i64) -> Result<Vec<ReplyView>, DomainError> {
        let state = self.lock();
        Ok(state
            .replies
            .values()
            .filter(|reply| reply.post_id == post_id)
            .map(|reply| state.reply_view(reply))
            .collect())
    }

    async fn get_reply(&self, id: i64) -> Result<Option<ReplyView>, DomainError> {
        let state = self.lock();
        Ok(state.replies.get(&id).map(|reply| state.reply_view(reply)))
    }

    async fn create_reply(&self, input: NewReply) -> Result<Reply, DomainError> {
        let mut state = self.lock();
        if !state.posts.contains_key(&input.post_id) {
            return Err(DomainError::NotFound("Post not found.".to_string()));
        }
        let id = state.next_id();
        let reply = Reply::new(id, input.content, input.post_id, input.author_id, Utc::now())?;
        state.replies.insert(id, reply.clone());
        Ok(reply)
    }

    async fn update_reply(&self, id: i64, content: String) -> Result<Option<Reply>, DomainError> {
        let mut state = self.lock();
        Ok(state.replies.get_mut(&id).map(|reply| {
            reply.content = content;
            reply.clone()
        }))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut state = self.lock();
        if state
            .users
            .values()
            .any(|creds| creds.user.username == input.username)
        {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }
        let id = state.next_id();
        let user = User::new(id, input.username, input.email, Utc::now())?;
        state.users.insert(
            id,
            UserCredentials {
                user: user.clone(),
                password_hash: input.password_hash,
            },
        );
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.lock().users.get(&id).map(|creds| creds.user.clone()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|creds| creds.user.username == username)
            .cloned())
    }

    async fn list_users(
        &self,
        username_filter: Option<&str>,
        pagination: Pagination,
    ) -> Result<Vec<User>, DomainError> {
        let users = self
            .lock()
            .users
            .values()
            .filter(|creds| matches(&creds.user.username, username_filter))
            .map(|creds| creds.user.clone())
            .collect();
        Ok(page(users, pagination))
    }

    async fn count_users(&self, username_filter: Option<&str>) -> Result<i64, DomainError> {
        Ok(self
            .lock()
            .users
            .values()
            .filter(|creds| matches(&creds.user.username, username_filter))
            .count() as i64)
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, DomainError> {
        let mut state = self.lock();
        if state
            .users
            .values()
            .any(|creds| creds.user.id != id && creds.user.username == patch.username)
        {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }
        Ok(state.users.get_mut(&id).map(|creds| {
            creds.user.username = patch.username;
            creds.user.email = patch.email;
            creds.user.clone()
        }))
    }

    async fn update_password_hash(
        &self,
        id: i64,
        password_hash: String,
    ) -> Result<bool, DomainError> {
        let mut state = self.lock();
        Ok(match state.users.get_mut(&id) {
            Some(creds) => {
                creds.password_hash = password_hash;
                true
            }
            None => false,
        })
    }

    async fn get_roles(&self, user_id: i64) -> Result<Vec<Role>, DomainError> {
        let state = self.lock();
        Ok(Role::ALL
            .into_iter()
            .filter(|role| state.user_roles.contains(&(user_id, *role)))
            .collect())
    }

    async fn is_in_role(&self, user_id: i64, role: Role) -> Result<bool, DomainError> {
        Ok(self.lock().user_roles.contains(&(user_id, role)))
    }

    async fn add_to_role(&self, user_id: i64, role: Role) -> Result<(), DomainError> {
        let mut state = self.lock();
        if !state.roles.contains(&role) {
            return Err(DomainError::NotFound("Role not found.".to_string()));
        }
        state.user_roles.insert((user_id, role));
        Ok(())
    }

    async fn role_exists(&self, role: Role) -> Result<bool, DomainError> {
        Ok(self.lock().roles.contains(&role))
    }

    async fn create_role(&self, role: Role) -> Result<(), DomainError> {
        self.lock().roles.insert(role);
        Ok(())
    }
}

#[async_trait]
impl CascadeStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn CascadeTx>, DomainError> {
        let staged = self.lock().clone();
        Ok(Box::new(MemoryCascadeTx {
            store: self.clone(),
            staged,
        }))
    }
}

/// Works on a snapshot that replaces the shared state on commit.
struct MemoryCascadeTx {
    store: MemoryStore,
    staged: MemoryState,
}

#[async_trait]
impl CascadeTx for MemoryCascadeTx {
    async fn post_ids_by_thread(&mut self, thread_id: i64) -> Result<Vec<i64>, DomainError> {
        Ok(self
            .staged
            .posts
            .values()
            .filter(|post| post.thread_id == thread_id)
            .map(|post| post.id)
            .collect())
    }

    async fn reply_ids_by_post(&mut self, post_id: i64) -> Result<Vec<i64>, DomainError> {
        Ok(self
            .staged
            .replies
            .values()
            .filter(|reply| reply.post_id == post_id)
            .map(|reply| reply.id)
            .collect())
    }

    async fn thread_ids_by_author(&mut self, author_id: i64) -> Result<Vec<i64>, DomainError> {
        Ok(self
            .staged
            .threads
            .values()
            .filter(|thread| thread.author_id == author_id)
            .map(|thread| thread.id)
            .collect())
    }

    async fn post_ids_by_author(&mut self, author_id: i64) -> Result<Vec<i64>, DomainError> {
        Ok(self
            .staged
            .posts
            .values()
            .filter(|post| post.author_id == author_id)
            .map(|post| post.id)
            .collect())
    }

    async fn reply_ids_by_author(&mut self, author_id: i64) -> Result<Vec<i64>, DomainError> {
        Ok(self
            .staged
            .replies
            .values()
            .filter(|reply| reply.author_id == author_id)
            .map(|reply| reply.id)
            .collect())
    }

    async fn delete_reply(&mut self, id: i64) -> Result<bool, DomainError> {
        Ok(self.staged.replies.remove(&id).is_some())
    }

    async fn delete_post(&mut self, id: i64) -> Result<bool, DomainError> {
        if self.staged.failing_post_delete == Some(id) {
            return Err(DomainError::Unexpected(format!("injected failure for post {id}")));
        }
        if self.staged.replies.values().any(|reply| reply.post_id == id) {
            return Err(DomainError::Unexpected(format!("post {id} still has replies")));
        }
        Ok(self.staged.posts.remove(&id).is_some())
    }

    async fn delete_thread(&mut self, id: i64) -> Result<bool, DomainError> {
        if self.staged.posts.values().any(|post| post.thread_id == id) {
            return Err(DomainError::Unexpected(format!("thread {id} still has posts")));
        }
        Ok(self.staged.threads.remove(&id).is_some())
    }

    async fn delete_user(&mut self, id: i64) -> Result<bool, DomainError> {
        let staged = &self.staged;
        if staged.threads.values().any(|thread| thread.author_id == id)
            || staged.posts.values().any(|post| post.author_id == id)
            || staged.replies.values().any(|reply| reply.author_id == id)
        {
            return Err(DomainError::Unexpected(format!("user {id} still owns content")));
        }
        self.staged.user_roles.retain(|(user_id, _)| *user_id != id);
        Ok(self.staged.users.remove(&id).is_some())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let Self { store, staged } = *self;
        *store.lock() = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::data::cascade::CascadeStore;
    use crate::data::pagination::Pagination;
    use crate::data::post_repository::{NewPost, PostRepository};
    use crate::data::thread_repository::{NewThread, ThreadRepository};
    use crate::data::user_repository::{NewUser, UserRepository};

    async fn seed_thread(store: &MemoryStore, title: &str) -> i64 {
        let author = match store.find_by_username("author").await.expect("lookup") {
            Some(creds) => creds.user,
            None => store
                .create_user(NewUser {
                    username: "author".to_string(),
                    email: "author@example.com".to_string(),
                    password_hash: "hash".to_string(),
                })
                .await
                .expect("user"),
        };
        store
            .create_thread(NewThread {
                title: title.to_string(),
                content: None,
                author_id: author.id,
            })
            .await
            .expect("thread")
            .id
    }

    #[tokio::test]
    async fn dropped_unit_of_work_leaves_state_untouched() {
        let store = MemoryStore::new();
        let thread_id = seed_thread(&store, "Kept").await;

        let mut tx = store.begin().await.expect("begin");
        assert!(tx.delete_thread(thread_id).await.expect("delete"));
        drop(tx);

        assert!(store.thread_exists(thread_id));
    }

    #[tokio::test]
    async fn committed_unit_of_work_is_visible() {
        let store = MemoryStore::new();
        let thread_id = seed_thread(&store, "Gone").await;

        let mut tx = store.begin().await.expect("begin");
        tx.delete_thread(thread_id).await.expect("delete");
        tx.commit().await.expect("commit");

        assert!(!store.thread_exists(thread_id));
    }

    #[tokio::test]
    async fn thread_listing_pages_after_filtering() {
        let store = MemoryStore::new();
        seed_thread(&store, "Test Thread").await;
        seed_thread(&store, "Another Thread").await;
        seed_thread(&store, "Test Again").await;

        let page = store
            .list_threads(Some("Test"), Pagination::new(2, 1))
            .await
            .expect("list");
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].thread.title, "Test Again");
        assert_eq!(store.count_threads(Some("Test")).await.expect("count"), 2);
    }

    #[tokio::test]
    async fn post_requires_existing_thread() {
        let store = MemoryStore::new();
        let err = store
            .create_post(NewPost {
                content: "body".to_string(),
                thread_id: 999,
                author_id: 1,
            })
            .await
            .expect_err("thread is missing");
        assert!(matches!(err, crate::domain::error::DomainError::NotFound(_)));
    }
}
