pub(crate) mod auth_service;
pub(crate) mod cascade;
pub(crate) mod ownership;
pub(crate) mod post_service;
pub(crate) mod thread_service;
pub(crate) mod user_service;
