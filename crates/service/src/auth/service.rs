use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::domain::{Account, AccountProfile, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::password::PasswordHashing;
use super::repository::AccountStore;
use super::validation::ValidationRules;

/// Auth service configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub rules: ValidationRules,
    pub hashing: PasswordHashing,
}

/// Registration and login, independent of the transport carrying them.
///
/// Holds no per-request state; all shared state lives in the injected store.
pub struct AuthService<R: AccountStore> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AccountStore> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    pub fn store(&self) -> &Arc<R> { &self.repo }

    /// Register a new account with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, repository::InMemoryAccountStore};
    /// use service::auth::domain::RegisterInput;
    /// use service::auth::password::PasswordHashing;
    /// use std::sync::Arc;
    /// let repo = Arc::new(InMemoryAccountStore::new());
    /// let svc = AuthService::new(repo, AuthConfig { hashing: PasswordHashing::low_cost(), ..Default::default() });
    /// let input = RegisterInput { username: "newuser".into(), password: "newpass123".into() };
    /// tokio_test::block_on(svc.register(input)).unwrap();
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<(), AuthError> {
        self.cfg.rules.validate_registration(&input)?;

        // Fast path; `insert` re-checks under the write lock.
        if self.repo.exists(&input.username).await? {
            debug!("username already registered");
            return Err(AuthError::Conflict);
        }

        let password_hash = self.cfg.hashing.hash(&input.password).await?;
        let account = Account { username: input.username, password_hash, created_at: Utc::now() };
        self.repo.insert(account).await?;
        info!("account_registered");
        Ok(())
    }

    /// Authenticate an account and return its public profile.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, repository::InMemoryAccountStore};
    /// use service::auth::domain::{LoginInput, RegisterInput};
    /// use service::auth::password::PasswordHashing;
    /// use std::sync::Arc;
    /// let repo = Arc::new(InMemoryAccountStore::new());
    /// let svc = AuthService::new(repo, AuthConfig { hashing: PasswordHashing::low_cost(), ..Default::default() });
    /// tokio_test::block_on(svc.register(RegisterInput { username: "testuser".into(), password: "testpass123".into() })).unwrap();
    /// let profile = tokio_test::block_on(svc.login(LoginInput { username: "testuser".into(), password: "testpass123".into() })).unwrap();
    /// assert_eq!(profile.username, "testuser");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AccountProfile, AuthError> {
        self.cfg.rules.validate_login(&input)?;
        let account = self.repo.authenticate(&input.username, &input.password, &self.cfg.hashing).await?;
        info!("account_logged_in");
        Ok(AccountProfile::from(&account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::InMemoryAccountStore;

    fn svc() -> AuthService<InMemoryAccountStore> {
        let cfg = AuthConfig { hashing: PasswordHashing::low_cost(), ..Default::default() };
        AuthService::new(Arc::new(InMemoryAccountStore::new()), cfg)
    }

    fn reg(u: &str, p: &str) -> RegisterInput {
        RegisterInput { username: u.into(), password: p.into() }
    }

    fn login(u: &str, p: &str) -> LoginInput {
        LoginInput { username: u.into(), password: p.into() }
    }

    #[tokio::test]
    async fn register_then_login_scenario() -> Result<(), anyhow::Error> {
        let svc = svc();

        let err = svc.register(reg("a", "a")).await.unwrap_err();
        assert_eq!(err.client_message(), "Username must be between 5 and 15 characters.");

        svc.register(reg("newuser", "newpass123")).await?;

        let err = svc.register(reg("newuser", "anything")).await.unwrap_err();
        assert_eq!(err.client_message(), "Username already exists");

        let profile = svc.login(login("newuser", "newpass123")).await?;
        assert_eq!(profile.username, "newuser");

        let err = svc.login(login("newuser", "wrong")).await.unwrap_err();
        assert_eq!(err.client_message(), "Username or password incorrect");
        Ok(())
    }

    #[tokio::test]
    async fn invalid_username_wins_over_valid_password() {
        let svc = svc();
        for username in ["", "abcd", "abcdefghijklmnop"] {
            let err = svc.register(reg(username, "perfectly-fine-pw")).await.unwrap_err();
            assert_eq!(err.client_message(), "Username must be between 5 and 15 characters.");
        }
    }

    #[tokio::test]
    async fn duplicate_check_runs_after_validation() -> Result<(), anyhow::Error> {
        let svc = svc();
        svc.register(reg("newuser", "newpass123")).await?;
        // invalid password on a taken name still reports the rule, not the conflict
        let err = svc.register(reg("newuser", "short")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_look_the_same() -> Result<(), anyhow::Error> {
        let svc = svc();
        svc.register(reg("testuser", "testpass123")).await?;
        let wrong_pw = svc.login(login("testuser", "wrongpass")).await.unwrap_err();
        let unknown = svc.login(login("ghostuser", "testpass123")).await.unwrap_err();
        assert_eq!(wrong_pw.client_message(), unknown.client_message());
        assert_eq!(wrong_pw.code(), unknown.code());
        Ok(())
    }

    #[tokio::test]
    async fn both_login_failures_run_the_hasher() -> Result<(), anyhow::Error> {
        let hashing = PasswordHashing::low_cost();
        let svc = AuthService::new(
            Arc::new(InMemoryAccountStore::new()),
            AuthConfig { hashing: hashing.clone(), ..Default::default() },
        );
        svc.register(reg("testuser", "testpass123")).await?;

        let before = hashing.verifications();
        svc.login(login("testuser", "wrongpass")).await.unwrap_err();
        assert_eq!(hashing.verifications() - before, 1);

        let before = hashing.verifications();
        svc.login(login("ghostuser", "wrongpass")).await.unwrap_err();
        assert_eq!(hashing.verifications() - before, 1);
        Ok(())
    }

    #[tokio::test]
    async fn failed_registration_is_repeatable() {
        let svc = svc();
        let first = svc.register(reg("a", "a")).await.unwrap_err().client_message();
        for _ in 0..3 {
            assert_eq!(svc.register(reg("a", "a")).await.unwrap_err().client_message(), first);
        }
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let svc = svc();
        let err = svc.login(login("", "x")).await.unwrap_err();
        assert_eq!(err.client_message(), "Username is required and must be a string.");
        let err = svc.login(login("testuser", "")).await.unwrap_err();
        assert_eq!(err.client_message(), "Password is required and must be a string.");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_admit_one() -> Result<(), anyhow::Error> {
        let svc = Arc::new(svc());
        let mut handles = Vec::new();
        for i in 0..16 {
            let svc = Arc::clone(&svc);
            handles.push(tokio::spawn(async move { svc.register(reg("newuser", &format!("password{i:02}"))).await }));
        }
        let mut ok = 0;
        let mut conflicts = 0;
        for h in handles {
            match h.await? {
                Ok(()) => ok += 1,
                Err(AuthError::Conflict) => conflicts += 1,
                Err(e) => return Err(e.into()),
            }
        }
        assert_eq!((ok, conflicts), (1, 15));
        assert_eq!(svc.store().count().await?, 1);
        Ok(())
    }
}
