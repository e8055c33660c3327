//! Password hashing (bcrypt, off the async runtime).

use thiserror::Error;
use tokio::task;

/// Default bcrypt cost for production hashing.
///
/// Tests pass a low cost instead; at the default, hashing takes long enough
/// to stall an async worker, hence `spawn_blocking`.
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(String),

    #[error("hashing task failed: {0}")]
    Background(String),
}

/// Hash a password with bcrypt at the given cost.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_owned();
    task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| PasswordError::Background(e.to_string()))?
        .map_err(|e| PasswordError::Bcrypt(e.to_string()))
}

/// Check a password against a stored bcrypt hash.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| PasswordError::Background(e.to_string()))?
        .map_err(|e| PasswordError::Bcrypt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the suite fast; production uses DEFAULT_BCRYPT_COST.
    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hash_produces_bcrypt_format_with_fresh_salt() {
        let first = hash_password("osu-123456", TEST_COST).await.unwrap();
        let second = hash_password("osu-123456", TEST_COST).await.unwrap();

        assert!(first.starts_with("$2"));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn correct_password_verifies() {
        let hash = hash_password("osu-123456", TEST_COST).await.unwrap();
        assert!(verify_password("osu-123456", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn wrong_password_does_not_verify() {
        let hash = hash_password("osu-123456", TEST_COST).await.unwrap();
        assert!(!verify_password("osu-654321", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let err = verify_password("osu-123456", "not-a-bcrypt-hash").await;
        assert!(err.is_err());
    }
}
