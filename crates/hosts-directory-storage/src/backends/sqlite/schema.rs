//! Database schema definitions for SQLite
//!
//! `id` is declared `INTEGER PRIMARY KEY AUTOINCREMENT` so ids are never
//! reused after a delete.

use super::SqliteStorage;
use crate::error::StorageError;

/// Create the `sys_hosts` table and its indexes if they don't exist
pub(super) async fn initialize_schema(storage: &SqliteStorage) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sys_hosts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ip_addr TEXT NOT NULL,
            domain TEXT NOT NULL,
            hosts_group TEXT NOT NULL DEFAULT 'default_group',
            remark TEXT NOT NULL DEFAULT '',
            created_by INTEGER NOT NULL DEFAULT 0,
            created_time INTEGER NOT NULL,
            updated_by INTEGER NOT NULL DEFAULT 0,
            updated_time INTEGER NOT NULL
        )
        "#,
    )
    .execute(storage.pool())
    .await
    .map_err(|e| StorageError::migration("failed to create sys_hosts table", e))?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_ip_domain_group \
         ON sys_hosts(ip_addr, domain, hosts_group)",
    )
    .execute(storage.pool())
    .await
    .map_err(|e| StorageError::migration("failed to create unique index", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_hosts_group ON sys_hosts(hosts_group)")
        .execute(storage.pool())
        .await
        .map_err(|e| StorageError::migration("failed to create group index", e))?;

    Ok(())
}
