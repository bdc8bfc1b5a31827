//! Command handlers for host management operations
//!
//! This module sits between the HTTP handlers and the storage layer. It turns
//! request inputs into storage calls and classifies storage failures into the
//! categories the API reports.

use hosts_directory_storage::{
    CallerId, HostFilter, HostId, HostPatch, HostRecord, NewHost, Storage, StorageError,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for CommandError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Validation(e) => CommandError::ValidationFailed(e.to_string()),
            StorageError::NotFound { .. } => CommandError::NotFound(err.to_string()),
            StorageError::DuplicateEntry { .. } => CommandError::DuplicateEntry(err.to_string()),
            other => CommandError::Storage(other),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Fields accepted when creating a host
#[derive(Debug, Clone, Default)]
pub struct CreateHost {
    pub ip_addr: String,
    pub domain: String,
    pub hosts_group: String,
    pub remark: String,
}

pub struct CommandHandler {
    storage: Arc<dyn Storage>,
}

impl CommandHandler {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// List hosts, narrowed by a raw comma-separated `hosts_groups` value
    pub async fn list_hosts(&self, hosts_groups: Option<&str>) -> CommandResult<Vec<HostRecord>> {
        let filter = hosts_groups
            .map(HostFilter::from_query)
            .unwrap_or_else(HostFilter::all);

        let records = self.storage.list(&filter).await?;
        debug!(groups = ?filter.groups, count = records.len(), "Listed hosts");
        Ok(records)
    }

    pub async fn get_host(&self, id: HostId) -> CommandResult<HostRecord> {
        Ok(self.storage.get_by_id(id).await?)
    }

    /// Add a new host entry on behalf of `caller`
    pub async fn add_host(&self, request: CreateHost, caller: CallerId) -> CommandResult<HostRecord> {
        let new_host = NewHost::new(request.ip_addr, request.domain)
            .with_group(request.hosts_group)
            .with_remark(request.remark)
            .created_by(caller);

        let record = self.storage.create(new_host).await?;
        info!(
            id = %record.id,
            ip_addr = %record.ip_addr,
            domain = %record.domain,
            hosts_group = %record.hosts_group,
            "Host created"
        );
        Ok(record)
    }

    /// Apply a partial update on behalf of `caller`
    ///
    /// The caller always overrides whatever `updated_by` the patch carries.
    pub async fn update_host(
        &self,
        id: HostId,
        patch: HostPatch,
        caller: CallerId,
    ) -> CommandResult<HostRecord> {
        let patch = HostPatch {
            updated_by: caller,
            ..patch
        };

        let record = self.storage.update(id, patch).await?;
        info!(id = %record.id, updated_by = %caller, "Host updated");
        Ok(record)
    }

    pub async fn delete_host(&self, id: HostId) -> CommandResult<()> {
        self.storage.delete(id).await?;
        info!(id = %id, "Host deleted");
        Ok(())
    }
}
