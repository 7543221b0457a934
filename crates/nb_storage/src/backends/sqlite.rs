use async_trait::async_trait;
use nb_core::{KeyValueStore, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use crate::StorageBackend;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

pub const DEFAULT_DB_PATH: &str = "news.db";

/// Key/value store persisted in a single SQLite table.
pub struct SqliteStore {
    pool: Arc<SqlitePool>,
    db_path: Option<PathBuf>,
}

impl StorageBackend for SqliteStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }
}

fn storage_error(context: &str, e: sqlx::Error) -> nb_core::Error {
    nb_core::Error::Storage(format!("{}: {}", context, e))
}

impl SqliteStore {
    pub async fn new() -> Result<Self> {
        Self::new_with_path(Path::new(DEFAULT_DB_PATH)).await
    }

    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| storage_error("Failed to connect to database", e))?;

        Self::migrate(pool, Some(db_path.to_path_buf())).await
    }

    /// A private in-memory database, mostly for tests.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new().filename(":memory:");
        // every connection would otherwise get its own empty database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| storage_error("Failed to open in-memory database", e))?;

        Self::migrate(pool, None).await
    }

    async fn migrate(pool: SqlitePool, db_path: Option<PathBuf>) -> Result<Self> {
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| storage_error(&format!("Failed to run migration {}", i), e))?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path,
        })
    }

    pub fn get_db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| storage_error("Failed to read key", e))?;

        Ok(row.map(|row| row.get::<String, _>("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&*self.pool)
        .await
        .map_err(|e| storage_error("Failed to write key", e))?;

        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM kv")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| storage_error("Failed to list keys", e))?;

        Ok(rows.into_iter().map(|row| row.get::<String, _>("key")).collect())
    }
}
