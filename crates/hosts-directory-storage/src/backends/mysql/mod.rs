//! MySQL / MariaDB storage backend implementation
//!
//! Reads tables created by earlier deployments of the `sys_hosts` layout:
//! `id BIGINT UNSIGNED`, nullable `created_by`/`updated_by` and DATETIME
//! columns of any fractional precision.
//!
//! DATETIME carries no zone. Values are written and read as UTC, so rows an
//! older writer stored in server-local time read back shifted by that
//! server's UTC offset.
//!
//! # Connection Pooling
//!
//! Uses sqlx's MySqlPool. `PoolSettings` maps onto the pool the same way it
//! does for PostgreSQL: `min_connections` idle connections are kept warm,
//! `max_connections` caps the pool and `max_lifetime` recycles connections.

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

use crate::config::PoolSettings;
use crate::error::StorageError;
use crate::traits::{HostStore, Storage};
use crate::types::{HostFilter, HostId, HostPatch, HostRecord, NewHost};

mod records;
mod schema;

/// MySQL storage backend
#[derive(Debug)]
pub struct MySqlStorage {
    pool: MySqlPool,
}

impl MySqlStorage {
    /// Create a new MySQL storage backend with default pool settings
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidData` if the URL does not use a mysql scheme.
    /// Returns `StorageError::Connection` if connecting or authenticating fails.
    pub async fn new(url: &str) -> Result<Self, StorageError> {
        Self::with_pool(url, &PoolSettings::default()).await
    }

    /// Create a new MySQL storage backend
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidData` if the URL does not use a mysql scheme.
    /// Returns `StorageError::Connection` if connecting or authenticating fails.
    pub async fn with_pool(url: &str, settings: &PoolSettings) -> Result<Self, StorageError> {
        if !url.starts_with("mysql://") {
            return Err(StorageError::InvalidData(
                "invalid MySQL URL: must start with mysql://".to_string(),
            ));
        }

        let max = settings.max_connections.max(1);
        let pool = MySqlPoolOptions::new()
            .min_connections(settings.min_connections.min(max))
            .max_connections(max)
            .max_lifetime(settings.max_lifetime)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(url)
            .await
            .map_err(|e| StorageError::connection("failed to create MySQL pool", e))?;

        Ok(Self { pool })
    }

    pub(crate) fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl HostStore for MySqlStorage {
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
impl Storage for MySqlStorage {
    fn backend_name(&self) -> &'static str {
        "mysql"
    }

    async fn initialize(&self) -> Result<(), StorageError> {
        schema::initialize_schema(self).await
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::connection("health check: database connection failed", e))?;

        let tables: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM information_schema.tables
            WHERE table_schema = DATABASE() AND table_name = 'sys_hosts'
            "#,
        )
        .fetch_one(self.pool())
        .await
        .map_err(|e| StorageError::connection("health check: failed to verify schema", e))?;

        if tables == 0 {
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
