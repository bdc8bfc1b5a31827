//! Storage trait definitions
//!
//! - HostStore: CRUD over the single `sys_hosts` table
//! - Storage: HostStore plus lifecycle management

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::{HostFilter, HostId, HostPatch, HostRecord, NewHost};

/// CRUD over host records
#[async_trait]
pub trait HostStore: Send + Sync {
    /// List host records, optionally restricted to a set of groups
    ///
    /// Returns records in insertion order (ascending id).
    ///
    /// # Errors
    /// * `StorageError::Query` - Database error
    async fn list(&self, filter: &HostFilter) -> Result<Vec<HostRecord>, StorageError>;

    /// Get a host record by ID
    ///
    /// # Errors
    /// * `StorageError::NotFound` - Record doesn't exist
    /// * `StorageError::Query` - Database error
    async fn get_by_id(&self, id: HostId) -> Result<HostRecord, StorageError>;

    /// Insert a new host record
    ///
    /// Assigns the id and sets `created_time` and `updated_time` to the same
    /// instant. Uniqueness of (ip_addr, domain, hosts_group) is enforced by the
    /// database; no lookup happens before the insert.
    ///
    /// # Errors
    /// * `StorageError::Validation` - `ip_addr` or `domain` empty, or a field too long
    /// * `StorageError::DuplicateEntry` - Unique constraint violated
    /// * `StorageError::Query` - Database error
    async fn create(&self, host: NewHost) -> Result<HostRecord, StorageError>;

    /// Apply a partial update to an existing record
    ///
    /// Only non-empty patch fields overwrite stored values. `updated_by` and
    /// `updated_time` are refreshed even if nothing else changed.
    ///
    /// # Errors
    /// * `StorageError::NotFound` - Record doesn't exist
    /// * `StorageError::Validation` - A supplied field is too long
    /// * `StorageError::DuplicateEntry` - Update collides with another record
    /// * `StorageError::Query` - Database error
    async fn update(&self, id: HostId, patch: HostPatch) -> Result<HostRecord, StorageError>;

    /// Permanently delete a record
    ///
    /// # Errors
    /// * `StorageError::NotFound` - Record doesn't exist
    /// * `StorageError::Query` - Database error
    async fn delete(&self, id: HostId) -> Result<(), StorageError>;
}

/// Host store with lifecycle management
///
/// This is the trait consumers hold (as `Arc<dyn Storage>`).
#[async_trait]
pub trait Storage: HostStore {
    /// Short backend identifier, e.g. "sqlite"
    fn backend_name(&self) -> &'static str;

    /// Create the table and indexes if missing
    ///
    /// Must be called before any other operations. Idempotent.
    ///
    /// # Errors
    /// * `StorageError::Migration` - Schema setup failed
    async fn initialize(&self) -> Result<(), StorageError>;

    /// Check connectivity and that the schema exists
    ///
    /// # Errors
    /// * `StorageError::Connection` - Backend unreachable or schema missing
    async fn health_check(&self) -> Result<(), StorageError>;

    /// Close pooled connections. Idempotent.
    async fn close(&self) -> Result<(), StorageError>;
}
