use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password;

pub const EMAIL_MAX_LEN: usize = 256;
pub const NAME_MAX_LEN: usize = 150;

/// A user account. The email address is the login identifier.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Cleared instead of deleting the row.
    pub is_active: bool,
    /// Can use the admin API.
    pub is_staff: bool,
    pub is_superuser: bool,
    pub account_created: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
}

impl User {
    pub fn get_username(&self) -> &str {
        &self.email
    }

    /// First name plus last name, separated by a space.
    pub fn get_full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn has_usable_password(&self) -> bool {
        password::is_usable(&self.password_hash)
    }

    /// Check a raw password against the stored hash. Accounts without a usable
    /// password never match.
    pub fn check_password(&self, raw: &str) -> bool {
        if !self.has_usable_password() {
            return false;
        }
        password::verify(raw, &self.password_hash).unwrap_or(false)
    }

    pub fn can_access_admin(&self) -> bool {
        self.is_active && self.is_staff
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

/// A validated account ready to be inserted. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub account_created: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
}

impl NewUser {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            account_created: self.account_created,
            last_login: None,
            first_name: self.first_name,
            last_name: self.last_name,
            display_name: self.display_name,
        }
    }
}
