//! Repository Module
//!
//! Provides CRUD operations over the SurrealDB tables. Cross-table
//! references are stored as "table:id" strings, so query binds always use
//! the string form of a RecordId.

pub mod order;
pub mod profile;
pub mod user;

// Re-exports
pub use order::OrderRepository;
pub use profile::ProfileRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse an id that may or may not carry its table prefix
/// (e.g. "profile:xyz" or "xyz")
pub fn parse_id(table: &str, id: &str) -> RecordId {
    match id.strip_prefix(&format!("{table}:")) {
        Some(key) => RecordId::from_table_key(table, key),
        None => RecordId::from_table_key(table, id),
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
