use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registration input. Missing fields decode as empty strings so the
/// validator reports them with its own messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Stored account. `password_hash` is an argon2 PHC string.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of an account, sent back on successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub username: String,
    pub registered_at: DateTime<Utc>,
}

impl From<&Account> for AccountProfile {
    fn from(a: &Account) -> Self {
        Self { username: a.username.clone(), registered_at: a.created_at }
    }
}
