use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, PasswordHash, Version,
};
use rand::rngs::OsRng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::errors::AuthError;

// Hashed once per `PasswordHashing`, on the first unknown-user login.
const DUMMY_PASSWORD: &str = "lobby-auth-dummy-password";

/// Argon2id hashing with a fixed cost. Hash and verify run on the blocking pool.
/// Clones share the dummy hash and the verify counter.
#[derive(Debug, Clone, Default)]
pub struct PasswordHashing {
    params: Params,
    dummy_hash: Arc<OnceCell<String>>,
    verifications: Arc<AtomicU64>,
}

impl PasswordHashing {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::HashError(e.to_string()))?;
        Ok(Self { params, ..Default::default() })
    }

    /// Minimum argon2 cost. Only meant for tests and benchmarks.
    pub fn low_cost() -> Self {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None).unwrap_or_default();
        Self { params, ..Default::default() }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash into a PHC string (salt and parameters embedded).
    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let argon = self.argon2();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| AuthError::HashError(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::HashError(e.to_string()))?
    }

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
    pub async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
        self.verifications.fetch_add(1, Ordering::Relaxed);
        let argon = self.argon2();
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
            Ok(argon.verify_password(password.as_bytes(), &parsed).is_ok())
        })
        .await
        .map_err(|e| AuthError::HashError(e.to_string()))?
    }

    /// Verify against a throwaway hash of the same cost and discard the result.
    pub async fn verify_dummy(&self, password: &str) -> Result<(), AuthError> {
        let dummy = self.dummy_hash.get_or_try_init(|| self.hash(DUMMY_PASSWORD)).await?;
        self.verify(password, dummy).await?;
        Ok(())
    }

    /// Verify calls made so far, dummy checks included.
    pub fn verifications(&self) -> u64 {
        self.verifications.load(Ordering::Relaxed)
    }
}
