use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::user::{Role, User};

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),

    #[error("token lifetime of {0} seconds is out of range")]
    Lifetime(i64),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    pub(crate) name: String,
    pub(crate) nameidentifier: i64,
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) role: Vec<Role>,
    pub(crate) iss: String,
    pub(crate) aud: String,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

pub(crate) struct JwtService {
    secret: String,
    issuer: String,
    audience: String,
    ttl_seconds: i64,
}

impl JwtService {
    const DEFAULT_TTL_SECONDS: i64 = 3 * 60 * 60;

    pub(crate) fn new(secret: &str, issuer: &str, audience: &str, ttl_seconds: i64) -> Self {
        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        JwtService {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_seconds,
        }
    }

    pub(crate) fn generate_token(&self, user: &User, roles: &[Role]) -> Result<String, JwtError> {
        let now = Utc::now();
        let expires_at = TimeDelta::try_seconds(self.ttl_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(JwtError::Lifetime(self.ttl_seconds))?;

        let claims = Claims {
            name: user.username.clone(),
            nameidentifier: user.id,
            email: user.email.clone(),
            role: roles.to_vec(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(JwtError::Encode)
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(JwtError::Decode)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{JwtError, JwtService};
    use crate::domain::user::{Role, User};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn sample_user() -> User {
        User::new(7, "alice", "alice@example.com", Utc::now()).expect("valid user")
    }

    #[test]
    fn token_round_trip_keeps_identity_and_roles() {
        let jwt = JwtService::new(SECRET, "forum-server", "forum-clients", 3600);
        let token = jwt
            .generate_token(&sample_user(), &[Role::Admin, Role::User])
            .expect("token");

        let claims = jwt.verify_token(&token).expect("claims");
        assert_eq!(claims.nameidentifier, 7);
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, vec![Role::Admin, Role::User]);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn non_positive_ttl_falls_back_to_three_hours() {
        let jwt = JwtService::new(SECRET, "forum-server", "forum-clients", 0);
        let token = jwt.generate_token(&sample_user(), &[]).expect("token");
        let claims = jwt.verify_token(&token).expect("claims");
        assert_eq!(claims.exp - claims.iat, 3 * 60 * 60);
    }

    #[test]
    fn oversized_ttl_is_an_error_not_a_panic() {
        let jwt = JwtService::new(SECRET, "forum-server", "forum-clients", 10_000_000_000_000_000);
        let err = jwt
            .generate_token(&sample_user(), &[])
            .expect_err("lifetime out of range");
        assert!(matches!(err, JwtError::Lifetime(10_000_000_000_000_000)));
    }

    #[test]
    fn foreign_audience_is_rejected() {
        let issuer = JwtService::new(SECRET, "forum-server", "someone-else", 3600);
        let verifier = JwtService::new(SECRET, "forum-server", "forum-clients", 3600);
        let token = issuer.generate_token(&sample_user(), &[]).expect("token");
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = JwtService::new(SECRET, "forum-server", "forum-clients", 3600);
        let verifier = JwtService::new(
            "ffffffffffffffffffffffffffffffff",
            "forum-server",
            "forum-clients",
            3600,
        );
        let token = issuer.generate_token(&sample_user(), &[]).expect("token");
        assert!(verifier.verify_token(&token).is_err());
    }
}
