//! Pure input checks run before any store access.
//!
//! Lengths count Unicode scalar values, so `"héllo"` is five characters.

use super::domain::{LoginInput, RegisterInput};
use super::errors::ValidationError;

/// Inclusive length bounds for usernames and passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub username_min: usize,
    pub username_max: usize,
    pub password_min: usize,
    pub password_max: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self { username_min: 5, username_max: 15, password_min: 8, password_max: 64 }
    }
}

fn within(s: &str, min: usize, max: usize) -> bool {
    let len = s.chars().count();
    (min..=max).contains(&len)
}

impl ValidationRules {
    pub fn validate_username(&self, username: &str) -> Result<(), ValidationError> {
        if !within(username, self.username_min, self.username_max) {
            return Err(ValidationError::InvalidUsernameLength { min: self.username_min, max: self.username_max });
        }
        Ok(())
    }

    pub fn validate_password(&self, password: &str) -> Result<(), ValidationError> {
        if !within(password, self.password_min, self.password_max) {
            return Err(ValidationError::InvalidPasswordLength { min: self.password_min, max: self.password_max });
        }
        Ok(())
    }

    /// Username first; the first failing rule is the only one reported.
    pub fn validate_registration(&self, input: &RegisterInput) -> Result<(), ValidationError> {
        self.validate_username(&input.username)?;
        self.validate_password(&input.password)
    }

    /// Login only checks that both fields are present.
    pub fn validate_login(&self, input: &LoginInput) -> Result<(), ValidationError> {
        if input.username.is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        if input.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        Ok(())
    }
}
