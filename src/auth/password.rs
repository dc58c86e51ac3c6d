//! Argon2 password hashing and verification.
//!
//! Hashing and verification are CPU-bound, so both run on the blocking pool.
//! Verification is constant-time within the argon2 primitive.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ApiError;

pub async fn hash(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(ApiError::internal)
    })
    .await
    .map_err(ApiError::internal)?
}

/// Verify a password against a stored PHC hash. An unparseable stored hash
/// verifies as false rather than erroring, so a corrupt record reads as a
/// failed login instead of a 500.
pub async fn verify(password: String, stored_hash: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || {
        let Ok(parsed) = PasswordHash::new(&stored_hash) else {
            tracing::warn!("stored password hash is not a valid PHC string");
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
    .await
    .map_err(ApiError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hashed = hash("correct horse".into()).await.unwrap();
        assert!(hashed.starts_with("$argon2"));
        assert!(verify("correct horse".into(), hashed.clone()).await.unwrap());
        assert!(!verify("wrong horse".into(), hashed).await.unwrap());
    }

    #[tokio::test]
    async fn garbage_hash_fails_closed() {
        assert!(!verify("anything".into(), "plaintext".into()).await.unwrap());
    }
}
