use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(String);

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// `Ok(false)` for a wrong password; `Err` only when the stored hash is unreadable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}

/// Argon2id with a random salt per password, stored as a PHC string.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(hash).map_err(|e| HashError(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Stand-in stored hash checked when no account matches, so an unknown
/// email costs the same as a wrong password.
static DUMMY_HASH: Lazy<String> =
    Lazy::new(|| Argon2Hasher.hash("no-such-account-placeholder").unwrap_or_default());

/// Hashes on the blocking pool; Argon2 would otherwise stall the worker thread.
pub async fn hash_password(hasher: Arc<dyn PasswordHasher>, password: String) -> Result<String, HashError> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| HashError(format!("hashing task failed: {e}")))?
}

/// Verifies on the blocking pool. With no stored hash the dummy hash is
/// checked instead and the answer is always `false`.
pub async fn verify_password(
    hasher: Arc<dyn PasswordHasher>,
    password: String,
    stored: Option<String>,
) -> Result<bool, HashError> {
    tokio::task::spawn_blocking(move || match stored {
        Some(hash) => hasher.verify(&password, &hash),
        None => {
            let _ = hasher.verify(&password, &DUMMY_HASH);
            Ok(false)
        }
    })
    .await
    .map_err(|e| HashError(format!("verification task failed: {e}")))?
}
