use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidateEmail;

use super::error::DomainError;

const MAX_USERNAME_CHARS: usize = 256;
const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub(crate) enum Role {
    Admin,
    User,
}

impl Role {
    pub(crate) const ALL: [Role; 2] = [Role::Admin, Role::User];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Admin" => Ok(Role::Admin),
            "User" => Ok(Role::User),
            other => Err(DomainError::Unexpected(format!("unknown role: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            username: normalize_username(&self.username)?,
            email: normalize_email(&self.email)?,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

/// Full overwrite of a user's profile; an empty password leaves the hash as is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserUpdate {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: Option<String>,
}

impl UserUpdate {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            username: normalize_username(&self.username)?,
            email: normalize_email(&self.email)?,
            password: self.password.filter(|password| !password.is_empty()),
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }

        Ok(Self {
            id,
            username: username.into(),
            email: email.into(),
            created_at,
        })
    }
}

/// Account-creation password rules. Every violated rule is reported, in order.
pub(crate) fn password_policy_errors(password: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if password.chars().count() < MIN_PASSWORD_CHARS {
        errors.push(format!(
            "Passwords must be at least {MIN_PASSWORD_CHARS} characters."
        ));
    }
    if password.chars().all(char::is_alphanumeric) {
        errors.push("Passwords must have at least one non alphanumeric character.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Passwords must have at least one digit ('0'-'9').".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
    }
    errors
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    if username.is_empty() || username.chars().count() > MAX_USERNAME_CHARS {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 1..256 chars",
        });
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::{Role, UserUpdate, normalize_email, normalize_username, password_policy_errors};
    use std::str::FromStr;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
    }

    #[test]
    fn username_must_not_be_blank() {
        assert!(normalize_username("   ").is_err());
        assert_eq!(normalize_username(" bob ").expect("valid"), "bob");
    }

    #[test]
    fn strong_password_has_no_policy_errors() {
        assert!(password_policy_errors("Str0ng!pass").is_empty());
    }

    #[test]
    fn weak_password_reports_every_rule() {
        let errors = password_policy_errors("abc");
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("at least 6 characters"));
        assert!(errors.iter().any(|e| e.contains("uppercase")));
        assert!(errors.iter().any(|e| e.contains("digit")));
    }

    #[test]
    fn case_rules_need_ascii_letters() {
        let errors = password_policy_errors("ÄÖÜäöü1!");
        assert!(errors.iter().any(|e| e.contains("lowercase ('a'-'z')")));
        assert!(errors.iter().any(|e| e.contains("uppercase ('A'-'Z')")));
        assert!(password_policy_errors("Äb0!xY").is_empty());
    }

    #[test]
    fn role_round_trips_through_its_name() {
        for role in Role::ALL {
            assert_eq!(Role::from_str(role.as_str()).expect("known role"), role);
        }
        assert!(Role::from_str("Moderator").is_err());
    }

    #[test]
    fn user_update_drops_empty_password() {
        let update = UserUpdate {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: Some(String::new()),
        };

        let validated = update.validate().expect("must validate");
        assert!(validated.password.is_none());
    }
}
