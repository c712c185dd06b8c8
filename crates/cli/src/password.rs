//! Password handling for the single configured account.
//!
//! Only an Argon2id PHC string is ever configured; `hash-password` produces
//! one and `login` checks attempts against it.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Shortest password `hash-password` will accept, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    TooShort,

    #[error("Not a valid Argon2 PHC string: {0}")]
    MalformedHash(password_hash::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(password_hash::Error),
}

/// Produce the PHC string to put in `STORYBOARD_PASSWORD_HASH`.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    if plain.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(PasswordError::Hashing)
}

/// Whether `plain` matches the configured `phc` string.
pub fn matches_hash(plain: &str, phc: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(phc).map_err(PasswordError::MalformedHash)?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::MalformedHash(e)),
    }
}
