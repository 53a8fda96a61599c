use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest, Role, password_policy_errors};
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::PasswordHasher;

pub(crate) const REGISTRATION_SUCCEEDED: &str = "User created successfully!";

/// Rejected login or registration. Each variant's message is returned to the client.
#[derive(Debug, Error)]
pub(crate) enum AuthFailure {
    #[error("User is empty")]
    EmptyModel,

    #[error("User with this name already exists")]
    DuplicateUser,

    #[error("No such username")]
    UnknownUser,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("User registration failed: {0}")]
    RegistrationFailed(String),

    #[error(transparent)]
    Internal(#[from] DomainError),
}

#[derive(Debug, Clone)]
pub(crate) struct LoginSuccess {
    pub(crate) token: String,
    pub(crate) username: String,
}

pub(crate) struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub(crate) fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self { users, hasher, jwt }
    }

    pub(crate) async fn register(
        &self,
        req: Option<RegisterRequest>,
        role: Role,
    ) -> Result<&'static str, AuthFailure> {
        let Some(req) = req else {
            warn!("registration attempted with empty model");
            return Err(AuthFailure::EmptyModel);
        };
        let req = req
            .validate()
            .map_err(|err| AuthFailure::RegistrationFailed(err.to_string()))?;

        if self.users.find_by_username(&req.username).await?.is_some() {
            warn!(username = %req.username, "registration rejected, username taken");
            return Err(AuthFailure::DuplicateUser);
        }

        let errors = password_policy_errors(&req.password);
        if !errors.is_empty() {
            let errors = errors.join(", ");
            error!(username = %req.username, %errors, "registration rejected by password policy");
            return Err(AuthFailure::RegistrationFailed(errors));
        }

        let password_hash = self.hasher.hash(&req.password)?;
        let user = self
            .users
            .create_user(NewUser {
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await
            .map_err(|err| match err {
                DomainError::AlreadyExists(_) => AuthFailure::DuplicateUser,
                other => AuthFailure::Internal(other),
            })?;

        if !self.users.role_exists(role).await? {
            self.users.create_role(role).await?;
        }
        self.users.add_to_role(user.id, role).await?;
        info!(user_id = user.id, username = %user.username, %role, "user registered");

        Ok(REGISTRATION_SUCCEEDED)
    }

    pub(crate) async fn login(&self, req: Option<LoginRequest>) -> Result<LoginSuccess, AuthFailure> {
        let Some(req) = req else {
            warn!("login attempted with empty model");
            return Err(AuthFailure::EmptyModel);
        };

        // Stored names are trimmed at registration.
        let username = req.username.trim();
        let Some(creds) = self.users.find_by_username(username).await? else {
            self.hasher.verify_dummy(&req.password)?;
            warn!(%username, "login failed, no such username");
            return Err(AuthFailure::UnknownUser);
        };

        if !self.hasher.verify(&req.password, &creds.password_hash)? {
            warn!(%username, "login failed, invalid password");
            return Err(AuthFailure::InvalidPassword);
        }

        let roles = self.users.get_roles(creds.user.id).await?;
        let token = self
            .jwt
            .generate_token(&creds.user, &roles)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        info!(user_id = creds.user.id, "user logged in");

        Ok(LoginSuccess {
            token,
            username: creds.user.username,
        })
    }

    /// Creates every known role that is still missing.
    pub(crate) async fn ensure_roles(&self) -> Result<(), DomainError> {
        for role in Role::ALL {
            if !self.users.role_exists(role).await? {
                self.users.create_role(role).await?;
                info!(%role, "role created");
            }
        }
        Ok(())
    }
}
