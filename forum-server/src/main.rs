use std::sync::Arc;

use anyhow::{Result, anyhow};
use tracing::{info, warn};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::{AuthFailure, AuthService};
use application::post_service::PostService;
use application::thread_service::ThreadService;
use application::user_service::UserService;
use data::cascade::CascadeStore;
use data::post_repository::PostRepository;
use data::reply_repository::ReplyRepository;
use data::repositories::postgres::cascade::PostgresCascadeStore;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::reply_repository::PostgresReplyRepository;
use data::repositories::postgres::thread_repository::PostgresThreadRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use data::thread_repository::ThreadRepository;
use data::user_repository::UserRepository;
use domain::user::{RegisterRequest, Role};
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::password::{Argon2PasswordHasher, PasswordHasher};
use infrastructure::settings::{AdminBootstrap, Settings};
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let threads: Arc<dyn ThreadRepository> = Arc::new(PostgresThreadRepository::new(pool.clone()));
    let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(pool.clone()));
    let replies: Arc<dyn ReplyRepository> = Arc::new(PostgresReplyRepository::new(pool.clone()));
    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let cascade: Arc<dyn CascadeStore> = Arc::new(PostgresCascadeStore::new(pool));

    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let jwt = Arc::new(JwtService::new(
        &settings.jwt_secret,
        &settings.jwt_issuer,
        &settings.jwt_audience,
        settings.jwt_ttl_seconds,
    ));

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        hasher.clone(),
        jwt.clone(),
    ));
    let thread_service = Arc::new(ThreadService::new(
        threads.clone(),
        users.clone(),
        cascade.clone(),
    ));
    let post_service = Arc::new(PostService::new(
        threads,
        posts,
        replies,
        users.clone(),
        cascade.clone(),
    ));
    let user_service = Arc::new(UserService::new(users, cascade, hasher));

    auth_service.ensure_roles().await?;
    if let Some(admin) = &settings.admin {
        bootstrap_admin(&auth_service, admin).await?;
    }

    let state = AppState::new(
        auth_service,
        thread_service,
        post_service,
        user_service,
        jwt,
    );

    server::run_http(&settings, state).await
}

async fn bootstrap_admin(auth: &AuthService, admin: &AdminBootstrap) -> Result<()> {
    let req = RegisterRequest {
        username: admin.username.clone(),
        email: admin.email.clone(),
        password: admin.password.clone(),
    };

    match auth.register(Some(req), Role::Admin).await {
        Ok(_) => {
            info!(username = %admin.username, "admin account created");
            Ok(())
        }
        Err(AuthFailure::DuplicateUser) => {
            warn!(username = %admin.username, "admin account already exists, skipping");
            Ok(())
        }
        Err(err) => Err(anyhow!("failed to create admin account: {err}")),
    }
}
