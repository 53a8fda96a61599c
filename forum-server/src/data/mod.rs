pub(crate) mod cascade;
pub(crate) mod pagination;
pub(crate) mod post_repository;
pub(crate) mod reply_repository;
pub(crate) mod repositories;
pub(crate) mod thread_repository;
pub(crate) mod user_repository;
