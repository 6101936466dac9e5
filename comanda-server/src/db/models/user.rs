//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use shared::Role;

use super::serde_helpers;

/// User ID type
pub type UserId = RecordId;

/// Account status: accounts start Pending and become Active once the
/// emailed confirmation code is redeemed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserStatus {
    Pending,
    Active,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "Pending",
            UserStatus::Active => "Active",
        }
    }
}

/// User model matching the `user` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        skip_serializing,
        deserialize_with = "serde_helpers::option_record_id::deserialize"
    )]
    pub id: Option<UserId>,
    pub name: String,
    /// Stored lowercase; uniqueness is case-insensitive
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub status: UserStatus,
    /// Doubles as the password-reset token
    #[serde(default)]
    pub confirmation_code: Option<String>,
    /// Reset token validity boundary; set to "now" once consumed
    #[serde(default)]
    pub reset_password_expires: Option<DateTime<Utc>>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub role: Role,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

/// Registration payload (also used when an admin registers a worker)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please insert a valid email"))]
    #[validate(length(max = 254, message = "Email is too long"))]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Please insert a password with 6 or more characters"
    ))]
    pub password: String,
    /// Defaults to `user`; worker registration passes `worker`
    #[serde(default)]
    pub role: Option<Role>,
}

/// Change-own-password payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordChange {
    #[validate(length(
        min = 6,
        max = 128,
        message = "Please insert a password with 6 or more characters"
    ))]
    pub password: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Please insert a password with 6 or more characters"
    ))]
    pub new_password: String,
}

/// Request-reset-code payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecoverRequest {
    #[validate(email(message = "Please insert a valid email"))]
    pub email: String,
}

/// Redeem-reset-code payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordReset {
    #[validate(length(
        min = 6,
        max = 128,
        message = "Please insert a password with 6 or more characters"
    ))]
    pub new_password: String,
}
