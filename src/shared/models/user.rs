use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{authentication::auth, errors::AppError, user_add_request::UserAddRequest, user_summary::UserSummary};

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 30;
pub const PASSWORD_MIN_CHARS: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Validate a registration and hash its password. Uniqueness is the
    /// caller's job; it needs the store.
    pub fn new(request: UserAddRequest) -> Result<Self, AppError> {
        let username = request.username.trim();
        let email = request.email.trim().to_lowercase();
        let password = request.password.as_str();

        let username_len = username.chars().count();
        if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&username_len) {
            return Err(AppError::validation(format!(
                "Username must be between {USERNAME_MIN_CHARS} and {USERNAME_MAX_CHARS} characters"
            )));
        }
        if !is_plausible_email(&email) {
            return Err(AppError::validation("Please provide a valid email"));
        }
        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(AppError::validation(format!(
                "Password must be at least {PASSWORD_MIN_CHARS} characters"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email,
            password_hash: auth::hash_password(password)?,
            created_at: Utc::now(),
        })
    }

    pub fn to_summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }

    /// Case-insensitive substring match on username or email.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.username.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !email.contains(char::is_whitespace),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> UserAddRequest {
        UserAddRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn new_normalizes_and_hashes() {
        let user = User::new(request(" alice ", "Alice@Example.COM", "hunter22")).unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_ne!(user.password_hash, "hunter22");
        assert!(auth::verify_password("hunter22", &user.password_hash));
    }

    #[test]
    fn new_rejects_bad_input() {
        assert!(User::new(request("al", "al@example.com", "hunter22")).is_err());
        assert!(User::new(request("alice", "not-an-email", "hunter22")).is_err());
        assert!(User::new(request("alice", "alice@example.com", "123")).is_err());
    }

    #[test]
    fn matches_username_or_email_case_insensitively() {
        let user = User {
            id: Uuid::nil(),
            username: "AlexKim".into(),
            email: "kim@corp.io".into(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        assert!(user.matches("alex"));
        assert!(user.matches("corp"));
        assert!(!user.matches("zed"));
    }
}
