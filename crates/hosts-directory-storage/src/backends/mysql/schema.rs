//! Database schema definitions for MySQL
//!
//! The table layout follows the long-standing `sys_hosts` definition:
//! DATETIME(6) timestamps, utf8mb4 charset and the
//! `idx_ip_domain_group` unique key.

use super::MySqlStorage;
use crate::error::StorageError;

pub(super) async fn initialize_schema(storage: &MySqlStorage) -> Result<(), StorageError> {
    // MySQL has no CREATE INDEX IF NOT EXISTS; keys are declared inline
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sys_hosts (
            id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
            ip_addr VARCHAR(32) NOT NULL,
            domain VARCHAR(100) NOT NULL,
            hosts_group VARCHAR(32) NOT NULL DEFAULT 'default_group',
            remark VARCHAR(255) NOT NULL DEFAULT '',
            created_by BIGINT NOT NULL DEFAULT 0,
            created_time DATETIME(6) NOT NULL,
            updated_by BIGINT NOT NULL DEFAULT 0,
            updated_time DATETIME(6) NOT NULL,
            PRIMARY KEY (id),
            UNIQUE KEY idx_ip_domain_group (ip_addr, domain, hosts_group),
            KEY idx_hosts_group (hosts_group)
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
        "#,
    )
    .execute(storage.pool())
    .await
    .map_err(|e| StorageError::migration("failed to create sys_hosts table", e))?;

    Ok(())
}
