use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher as _, PasswordVerifier,
        SaltString, rand_core::OsRng,
    },
};

use crate::domain::error::DomainError;

pub(crate) trait PasswordHasher: Send + Sync {
    fn hash(&self, raw_password: &str) -> Result<String, DomainError>;

    /// `Ok(false)` on mismatch; malformed hashes are errors.
    fn verify(&self, raw_password: &str, password_hash: &str) -> Result<bool, DomainError>;

    /// Burns one verification so unknown usernames cost the same as wrong passwords.
    fn verify_dummy(&self, raw_password: &str) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new() -> Self {
        Self
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    fn verify(&self, raw_password: &str, password_hash: &str) -> Result<bool, DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        match Self::argon2()?.verify_password(raw_password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(err) => Err(DomainError::Unexpected(err.to_string())),
        }
    }

    fn verify_dummy(&self, raw_password: &str) -> Result<(), DomainError> {
        self.verify(raw_password, Self::DUMMY_PASSWORD_HASH)
            .map(|_| ())
    }
}
