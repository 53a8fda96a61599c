use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::post_service::PostService;
use crate::application::thread_service::ThreadService;
use crate::application::user_service::UserService;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService>,
    pub(crate) thread_service: Arc<ThreadService>,
    pub(crate) post_service: Arc<PostService>,
    pub(crate) user_service: Arc<UserService>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService>,
        thread_service: Arc<ThreadService>,
        post_service: Arc<PostService>,
        user_service: Arc<UserService>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            auth_service,
            thread_service,
            post_service,
            user_service,
            jwt,
        }
    }
}
