//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend) plus schema definitions.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at the given path and apply schema
    /// definitions
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;

        db.use_ns("comanda")
            .use_db("main")
            .await
            .map_err(|e| AppError::Database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;

        tracing::info!(path = %db_path.display(), "Database connection established");

        Ok(Self { db })
    }

    /// Schema definitions, applied on every startup (idempotent)
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        // Uniqueness backstop; repositories lowercase emails before writes
        db.query("DEFINE INDEX IF NOT EXISTS uniq_user_email ON TABLE user COLUMNS email UNIQUE")
            .await
            .map_err(|e| AppError::Database(format!("Failed to define email index: {e}")))?;

        db.query("DEFINE INDEX IF NOT EXISTS idx_profile_owner ON TABLE profile COLUMNS owner")
            .await
            .map_err(|e| AppError::Database(format!("Failed to define owner index: {e}")))?;

        db.query(
            "DEFINE INDEX IF NOT EXISTS idx_orders_restaurant ON TABLE orders COLUMNS restaurant",
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to define restaurant index: {e}")))?;

        Ok(())
    }
}
