//! Password hashing and verification (Argon2id).
//!
//! The engine only ever sees the encoded hash string; plaintext passwords
//! stay inside this crate.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::ServerError;

pub(crate) fn hash_password(password: &str) -> Result<String, ServerError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServerError::Internal(format!("failed to hash password: {err}")))
}

pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub(crate) fn validate_password(password: &str) -> Result<(), ServerError> {
    let len = password.chars().count();
    if !(10..=50).contains(&len) {
        return Err(ServerError::Generic(
            "password must be between 10 and 50 characters".to_string(),
        ));
    }
    Ok(())
}
