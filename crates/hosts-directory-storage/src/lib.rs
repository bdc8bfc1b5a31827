//! Storage abstraction layer for hosts-directory
//!
//! Provides a backend-agnostic CRUD interface over the `sys_hosts` table.
//!
//! # Supported Backends
//!
//! - **SQLite** (feature: `sqlite`, default) - Embedded database, file or in-memory
//! - **PostgreSQL** (feature: `postgres`) - Networked database for multi-instance deployments
//! - **MySQL / MariaDB** (feature: `mysql`) - Networked database using the classic table layout
//!
//! # Architecture
//!
//! All backends implement the same traits:
//! - [`HostStore`] - List, get, create, update and delete host records
//! - [`Storage`] - Lifecycle management (initialize, health check, close)
//!
//! Field validation and group defaulting happen here, so every backend
//! stores the same normalized data.
//!
//! # Examples
//!
//! ```no_run
//! use hosts_directory_storage::{create_storage, HostFilter, NewHost, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorageConfig::from_url("sqlite://:memory:")?;
//! let storage = create_storage(&config).await?;
//!
//! let record = storage.create(NewHost::new("192.168.1.10", "nas.local")).await?;
//! assert_eq!(record.hosts_group, "default_group");
//!
//! let all = storage.list(&HostFilter::all()).await?;
//! assert_eq!(all.len(), 1);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod traits;
mod types;

pub mod backends;

// Re-exports
pub use config::{BackendType, ConfigError, PoolSettings, StorageConfig};
pub use error::StorageError;
pub use traits::{HostStore, Storage};
pub use types::{CallerId, HostFilter, HostId, HostPatch, HostRecord, NewHost, ParseHostIdError};

use std::sync::Arc;

/// Create storage from configuration
///
/// This is the primary entry point for creating a storage backend.
/// It connects the backend selected by `config.backend`, applies the pool
/// settings and initializes the schema.
///
/// # Errors
///
/// Returns `StorageError::InvalidConnectionString` if the backend type
/// is not compiled in (missing feature flag).
/// Returns `StorageError::Connection` or `StorageError::Migration` if
/// connecting or schema setup fails.
pub async fn create_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>, StorageError> {
    let storage: Arc<dyn Storage> = match config.backend {
        #[cfg(feature = "sqlite")]
        BackendType::Sqlite => Arc::new(
            backends::sqlite::SqliteStorage::with_pool(&config.connection_string, &config.pool)
                .await?,
        ),
        #[cfg(not(feature = "sqlite"))]
        BackendType::Sqlite => {
            return Err(StorageError::InvalidConnectionString(
                "SQLite backend not compiled in (enable 'sqlite' feature)".into(),
            ))
        }
        #[cfg(feature = "postgres")]
        BackendType::Postgres => Arc::new(
            backends::postgres::PostgresStorage::with_pool(
                &config.connection_string,
                &config.pool,
            )
            .await?,
        ),
        #[cfg(not(feature = "postgres"))]
        BackendType::Postgres => {
            return Err(StorageError::InvalidConnectionString(
                "PostgreSQL backend not compiled in (enable 'postgres' feature)".into(),
            ))
        }
        #[cfg(feature = "mysql")]
        BackendType::MySql => Arc::new(
            backends::mysql::MySqlStorage::with_pool(&config.connection_string, &config.pool)
                .await?,
        ),
        #[cfg(not(feature = "mysql"))]
        BackendType::MySql => {
            return Err(StorageError::InvalidConnectionString(
                "MySQL backend not compiled in (enable 'mysql' feature)".into(),
            ))
        }
    };

    storage.initialize().await?;
    tracing::debug!(backend = storage.backend_name(), "storage initialized");
    Ok(storage)
}
