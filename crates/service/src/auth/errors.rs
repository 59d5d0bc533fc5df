use thiserror::Error;

/// Uniform text for every failed login, whichever half of the credential was wrong.
pub const LOGIN_FAILED_MSG: &str = "Username or password incorrect";
pub const USERNAME_TAKEN_MSG: &str = "Username already exists";
pub const INTERNAL_ERROR_MSG: &str = "Internal server error";

/// Input rule violations. `Display` is the exact text shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username must be between {min} and {max} characters.")]
    InvalidUsernameLength { min: usize, max: usize },
    #[error("Password must be between {min} and {max} characters.")]
    InvalidPasswordLength { min: usize, max: usize },
    #[error("Username is required and must be a string.")]
    MissingUsername,
    #[error("Password is required and must be a string.")]
    MissingPassword,
}

/// Account store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already taken")]
    UsernameTaken,
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("user already exists")]
    Conflict,
    #[error("account not found")]
    AccountNotFound,
    #[error("password mismatch")]
    PasswordMismatch,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UsernameTaken => AuthError::Conflict,
            StoreError::Backend(msg) => AuthError::Repository(msg),
        }
    }
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::AccountNotFound | AuthError::PasswordMismatch => 1004,
            AuthError::HashError(_) => 1101,
            AuthError::Repository(_) => 1200,
        }
    }

    /// Whether the failure is the caller's fault rather than ours.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AuthError::HashError(_) | AuthError::Repository(_))
    }

    /// The message a client is allowed to see.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Validation(v) => v.to_string(),
            AuthError::Conflict => USERNAME_TAKEN_MSG.to_string(),
            AuthError::AccountNotFound | AuthError::PasswordMismatch => LOGIN_FAILED_MSG.to_string(),
            AuthError::HashError(_) | AuthError::Repository(_) => INTERNAL_ERROR_MSG.to_string(),
        }
    }
}
