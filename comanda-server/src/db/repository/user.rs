//! User Repository

use chrono::Utc;
use ring::rand::{SecureRandom, SystemRandom};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::Role;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{User, UserCreate, UserStatus};
use crate::services::avatar;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by email (case-insensitive: emails are stored lowercase)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing = parse_id(TABLE, id);
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find user by confirmation code
    pub async fn find_by_confirmation_code(&self, code: &str) -> RepoResult<Option<User>> {
        let code = code.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE confirmation_code = $code LIMIT 1")
            .bind(("code", code))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user account (status Pending, fresh confirmation code)
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        let email = data.email.trim().to_lowercase();

        // Check duplicate email
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate("User already exists".to_string()));
        }

        // Hash password
        let hash_pass = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let avatar = avatar::gravatar_url(&email);
        let confirmation_code = generate_confirmation_code()?;
        let role = data.role.unwrap_or(Role::User);

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    name = $name,
                    email = $email,
                    hash_pass = $hash_pass,
                    status = $status,
                    confirmation_code = $confirmation_code,
                    reset_password_expires = NONE,
                    avatar = $avatar,
                    created_at = $created_at,
                    role = $role
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("email", email))
            .bind(("hash_pass", hash_pass))
            .bind(("status", UserStatus::Pending))
            .bind(("confirmation_code", confirmation_code))
            .bind(("avatar", avatar))
            .bind(("created_at", Utc::now()))
            .bind(("role", role))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Activate the account holding this confirmation code
    pub async fn activate_by_code(&self, code: &str) -> RepoResult<Option<User>> {
        let code = code.to_string();
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE user SET status = $status WHERE confirmation_code = $code RETURN AFTER",
            )
            .bind(("status", UserStatus::Active))
            .bind(("code", code))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Issue a fresh reset code, valid for one hour
    pub async fn issue_reset_code(&self, id: &str) -> RepoResult<User> {
        let code = generate_confirmation_code()?;
        let expires = Utc::now() + chrono::Duration::hours(1);

        let thing = parse_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    confirmation_code = $code,
                    reset_password_expires = $expires
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("code", code))
            .bind(("expires", expires))
            .await?;
        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Replace the password hash
    pub async fn update_password(&self, id: &str, hash_pass: String) -> RepoResult<User> {
        let thing = parse_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET hash_pass = $hash_pass RETURN AFTER")
            .bind(("thing", thing))
            .bind(("hash_pass", hash_pass))
            .await?;
        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Replace the password hash and invalidate the reset code by moving
    /// its validity boundary to now
    pub async fn reset_password(&self, id: &str, hash_pass: String) -> RepoResult<User> {
        let thing = parse_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    hash_pass = $hash_pass,
                    reset_password_expires = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("hash_pass", hash_pass))
            .bind(("now", Utc::now()))
            .await?;
        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Hard delete a user account
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_id(TABLE, id);
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}

/// Random 32-hex-char token used as confirmation / password-reset code
fn generate_confirmation_code() -> RepoResult<String> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes)
        .map_err(|_| RepoError::Database("Failed to generate confirmation code".to_string()))?;
    Ok(hex::encode(bytes))
}
