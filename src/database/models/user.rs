use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

static USERNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]{3,64}$").expect("username pattern compiles")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<serde_json::Value>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin_user: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(input: NewUserInput, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: input.username,
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            password_hash,
            is_admin_user: input.is_admin_user.unwrap_or(false),
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public view of a user, returned by auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub is_admin_user: bool,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            is_admin_user: user.is_admin_user,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserInput {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub name: String,
    pub is_admin_user: Option<bool>,
    pub address: Option<serde_json::Value>,
}

impl NewUserInput {
    pub fn validate(&self) -> Result<(), String> {
        if !USERNAME_PATTERN.is_match(&self.username) {
            return Err(
                "Username must be 3-64 characters of letters, digits, '.', '_' or '-'".to_string(),
            );
        }
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if !EMAIL_PATTERN.is_match(&self.email) {
            return Err(format!("Invalid email address: {}", self.email));
        }
        if self.password.len() < 8 {
            return Err("Password must be at least 8 characters".to_string());
        }
        Ok(())
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    pub user_id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub is_admin_user: Option<bool>,
    pub address: Option<serde_json::Value>,
}

impl UpdateUserInput {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(username) = &self.username {
            if !USERNAME_PATTERN.is_match(username) {
                return Err(
                    "Username must be 3-64 characters of letters, digits, '.', '_' or '-'"
                        .to_string(),
                );
            }
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("Name must not be empty".to_string());
            }
        }
        if let Some(email) = &self.email {
            if !EMAIL_PATTERN.is_match(email) {
                return Err(format!("Invalid email address: {}", email));
            }
        }
        if let Some(password) = &self.password {
            if password.len() < 8 {
                return Err("Password must be at least 8 characters".to_string());
            }
        }
        Ok(())
    }

    /// Apply the present fields onto `user`. The password is handled by the caller.
    pub fn apply_to(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(phone) = self.phone {
            user.phone = Some(phone);
        }
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(is_admin_user) = self.is_admin_user {
            user.is_admin_user = is_admin_user;
        }
        if let Some(address) = self.address {
            user.address = Some(address);
        }
        user.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewUserInput {
        NewUserInput {
            username: "jane.doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            password: "correct-horse".to_string(),
            name: "Jane Doe".to_string(),
            is_admin_user: None,
            address: None,
        }
    }

    #[test]
    fn accepts_valid_new_user() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn rejects_bad_email_and_short_password() {
        let mut bad_email = input();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut short_password = input();
        short_password.password = "short".to_string();
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn update_keeps_absent_fields() {
        let mut user = User::new(input(), "hash".to_string());
        let update = UpdateUserInput {
            user_id: user.id.clone(),
            username: None,
            email: None,
            phone: Some("555-0100".to_string()),
            password: None,
            name: Some("Jane Smith".to_string()),
            is_admin_user: None,
            address: None,
        };
        update.apply_to(&mut user);

        assert_eq!(user.username, "jane.doe");
        assert_eq!(user.name, "Jane Smith");
        assert_eq!(user.phone.as_deref(), Some("555-0100"));
        assert!(!user.is_admin_user);
    }
}
