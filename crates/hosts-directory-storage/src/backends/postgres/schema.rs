//! Database schema definitions for PostgreSQL
//!
//! Uses CREATE ... IF NOT EXISTS for idempotent initialization.

use super::PostgresStorage;
use crate::error::StorageError;

/// Create the `sys_hosts` table and its indexes if they don't exist
pub(super) async fn initialize_schema(storage: &PostgresStorage) -> Result<(), StorageError> {
    let pool = storage.pool();

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sys_hosts (
            id BIGSERIAL PRIMARY KEY,
            ip_addr VARCHAR(32) NOT NULL,
            domain VARCHAR(100) NOT NULL,
            hosts_group VARCHAR(32) NOT NULL DEFAULT 'default_group',
            remark VARCHAR(255) NOT NULL DEFAULT '',
            created_by BIGINT NOT NULL DEFAULT 0,
            created_time TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_by BIGINT NOT NULL DEFAULT 0,
            updated_time TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::migration("failed to create sys_hosts table", e))?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_ip_domain_group \
         ON sys_hosts(ip_addr, domain, hosts_group)",
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::migration("failed to create unique index", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_hosts_group ON sys_hosts(hosts_group)")
        .execute(pool)
        .await
        .map_err(|e| StorageError::migration("failed to create group index", e))?;

    Ok(())
}
