use std::collections::{hash_map::Entry, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::domain::Account;
use super::errors::{AuthError, StoreError};
use super::password::PasswordHashing;

/// Storage abstraction for accounts. Implementations own uniqueness:
/// `insert` must check and insert under one critical section.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn exists(&self, username: &str) -> Result<bool, StoreError>;
    async fn insert(&self, account: Account) -> Result<(), StoreError>;
    async fn find(&self, username: &str) -> Result<Option<Account>, StoreError>;
    async fn count(&self) -> Result<usize, StoreError>;

    /// Look up and verify. Callers must not reveal which variant failed; an
    /// unknown username still pays for one verify.
    async fn authenticate(&self, username: &str, password: &str, hashing: &PasswordHashing) -> Result<Account, AuthError> {
        let Some(account) = self.find(username).await? else {
            hashing.verify_dummy(password).await?;
            return Err(AuthError::AccountNotFound);
        };
        if !hashing.verify(password, &account.password_hash).await? {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(account)
    }
}

/// Process-local store keyed by exact username.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn exists(&self, username: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.contains_key(username))
    }

    async fn insert(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        match accounts.entry(account.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::UsernameTaken),
            Entry::Vacant(slot) => {
                slot.insert(account);
                Ok(())
            }
        }
    }

    async fn find(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(username).cloned())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.accounts.read().await.len())
    }
}
