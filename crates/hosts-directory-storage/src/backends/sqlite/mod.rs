//! SQLite storage backend implementation using sqlx
//!
//! SQLite is the default backend: a single file next to the service, or an
//! in-memory database for tests.
//!
//! # Architecture
//!
//! - **schema**: `sys_hosts` table and its unique index, created on initialize
//! - **records**: CRUD queries and row mapping
//!
//! # Connection Management
//!
//! Uses sqlx's SqlitePool for async database operations without blocking
//! the Tokio runtime. An in-memory database lives only as long as its
//! connection, so `:memory:` pools are pinned to exactly one connection that
//! is never recycled.
//!
//! # Timestamps
//!
//! `created_time` and `updated_time` are stored as INTEGER microseconds since
//! the Unix epoch.
//!
//! # Security
//!
//! All queries use sqlx's prepared statement bindings (`bind()`) to prevent
//! SQL injection. User-provided data is never interpolated into query strings.

use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;

use crate::config::PoolSettings;
use crate::error::StorageError;
use crate::traits::{HostStore, Storage};
use crate::types::{HostFilter, HostId, HostPatch, HostRecord, NewHost};

mod records;
mod schema;

/// SQLite storage backend
///
/// # Examples
///
/// ```no_run
/// use hosts_directory_storage::backends::sqlite::SqliteStorage;
/// use hosts_directory_storage::Storage;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // In-memory database for testing
/// let storage = SqliteStorage::new(":memory:").await?;
/// storage.initialize().await?;
///
/// // File-based database for production
/// let storage = SqliteStorage::new("/var/lib/hosts-directory/hosts.sqlite").await?;
/// storage.initialize().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new SQLite storage backend with default pool settings
    ///
    /// # Arguments
    ///
    /// * `path` - Database path or `:memory:` for in-memory database
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the database connection fails.
    pub async fn new(path: &str) -> Result<Self, StorageError> {
        Self::with_pool(path, &PoolSettings::default()).await
    }

    /// Create a new SQLite storage backend
    ///
    /// `settings.max_connections` is capped at 5 for files: SQLite has a
    /// single writer, so more connections add overhead without throughput.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the database connection fails.
    pub async fn with_pool(path: &str, settings: &PoolSettings) -> Result<Self, StorageError> {
        let in_memory = path == ":memory:";

        let options = if in_memory {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StorageError::connection("invalid SQLite URL", e))?
        } else {
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            let max = settings.max_connections.clamp(1, 5);
            SqlitePoolOptions::new()
                .min_connections(settings.min_connections.min(max))
                .max_connections(max)
                .max_lifetime(settings.max_lifetime)
                .idle_timeout(Duration::from_secs(600))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(|e| StorageError::connection("failed to create SQLite pool", e))?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool for internal use
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl HostStore for SqliteStorage {
    async fn list(&self, filter: &HostFilter) -> Result<Vec<HostRecord>, StorageError> {
        self.list_impl(filter).await
    }

    async fn get_by_id(&self, id: HostId) -> Result<HostRecord, StorageError> {
        self.get_by_id_impl(id).await
    }

    async fn create(&self, host: NewHost) -> Result<HostRecord, StorageError> {
        self.create_impl(host).await
    }

    async fn update(&self, id: HostId, patch: HostPatch) -> Result<HostRecord, StorageError> {
        self.update_impl(id, patch).await
    }

    async fn delete(&self, id: HostId) -> Result<(), StorageError> {
        self.delete_impl(id).await
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn initialize(&self) -> Result<(), StorageError> {
        schema::initialize_schema(self).await
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::connection("health check: database connection failed", e))?;

        let table_exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM sqlite_master
                WHERE type = 'table' AND name = 'sys_hosts'
            )
            "#,
        )
        .fetch_one(self.pool())
        .await
        .map_err(|e| StorageError::connection("health check: failed to verify schema", e))?;

        if !table_exists {
            return Err(StorageError::connection(
                "health check: schema not initialized (sys_hosts table missing)",
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "schema not initialized - call initialize() first",
                ),
            ));
        }

        Ok(())
    }

    async fn close(&self) -> Result<(), StorageError> {
        self.pool.close().await;
        Ok(())
    }
}
