//! Host record CRUD for MySQL
//!
//! DATETIME(6) carries no zone; values are written and read as UTC.

use chrono::NaiveDateTime;
use sqlx::mysql::MySqlRow;
use sqlx::Row;

use super::MySqlStorage;
use crate::backends::{group_clause, map_write_error, HOST_COLUMNS};
use crate::error::StorageError;
use crate::types::{now_micros, CallerId, HostFilter, HostId, HostPatch, HostRecord, NewHost};

impl MySqlStorage {
    pub(super) async fn list_impl(
        &self,
        filter: &HostFilter,
    ) -> Result<Vec<HostRecord>, StorageError> {
        let groups = match &filter.groups {
            Some(groups) if groups.is_empty() => return Ok(Vec::new()),
            Some(groups) => groups.as_slice(),
            None => &[],
        };

        let where_clause = if groups.is_empty() {
            String::new()
        } else {
            group_clause(groups.len(), |_| "?".to_string())
        };

        let query = format!(
            "SELECT {} FROM sys_hosts {} ORDER BY id",
            HOST_COLUMNS, where_clause
        );

        let mut q = sqlx::query(&query);
        for group in groups {
            q = q.bind(group);
        }

        let rows = q
            .fetch_all(self.pool())
            .await
            .map_err(|e| StorageError::query("failed to list hosts", e))?;

        rows.iter().map(row_to_host_record).collect()
    }

    pub(super) async fn get_by_id_impl(&self, id: HostId) -> Result<HostRecord, StorageError> {
        let query = format!("SELECT {} FROM sys_hosts WHERE id = ?", HOST_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.get())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| StorageError::query("failed to get host by id", e))?
            .ok_or_else(|| StorageError::host_not_found(id))?;

        row_to_host_record(&row)
    }

    pub(super) async fn create_impl(&self, host: NewHost) -> Result<HostRecord, StorageError> {
        let host = host.prepare()?;
        let now = now_micros();

        let result = sqlx::query(
            r#"
            INSERT INTO sys_hosts (
                ip_addr, domain, hosts_group, remark,
                created_by, created_time, updated_by, updated_time
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&host.ip_addr)
        .bind(&host.domain)
        .bind(&host.hosts_group)
        .bind(&host.remark)
        .bind(host.created_by.get())
        .bind(now.naive_utc())
        .bind(host.created_by.get())
        .bind(now.naive_utc())
        .execute(self.pool())
        .await
        .map_err(|e| {
            map_write_error(
                e,
                "failed to insert host",
                &host.ip_addr,
                &host.domain,
                &host.hosts_group,
            )
        })?;

        let id = i64::try_from(result.last_insert_id()).map_err(|_| {
            StorageError::InvalidData(format!(
                "insert id out of range: {}",
                result.last_insert_id()
            ))
        })?;

        Ok(HostRecord {
            id: HostId::new(id),
            ip_addr: host.ip_addr,
            domain: host.domain,
            hosts_group: host.hosts_group,
            remark: host.remark,
            created_by: host.created_by,
            created_time: now,
            updated_by: host.created_by,
            updated_time: now,
        })
    }

    pub(super) async fn update_impl(
        &self,
        id: HostId,
        patch: HostPatch,
    ) -> Result<HostRecord, StorageError> {
        patch.validate()?;

        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| StorageError::query("failed to begin transaction", e))?;

        let query = format!(
            "SELECT {} FROM sys_hosts WHERE id = ? FOR UPDATE",
            HOST_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(id.get())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| StorageError::query("failed to load host for update", e))?
            .ok_or_else(|| StorageError::host_not_found(id))?;

        let mut record = row_to_host_record(&row)?;
        patch.apply_to(&mut record, now_micros());

        sqlx::query(
            r#"
            UPDATE sys_hosts
            SET ip_addr = ?, domain = ?, hosts_group = ?, remark = ?,
                updated_by = ?, updated_time = ?
            WHERE id = ?
            "#,
        )
        .bind(&record.ip_addr)
        .bind(&record.domain)
        .bind(&record.hosts_group)
        .bind(&record.remark)
        .bind(record.updated_by.get())
        .bind(record.updated_time.naive_utc())
        .bind(id.get())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                "failed to update host",
                &record.ip_addr,
                &record.domain,
                &record.hosts_group,
            )
        })?;

        tx.commit()
            .await
            .map_err(|e| StorageError::query("failed to commit update", e))?;

        Ok(record)
    }

    pub(super) async fn delete_impl(&self, id: HostId) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM sys_hosts WHERE id = ?")
            .bind(id.get())
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::query("failed to delete host", e))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::host_not_found(id));
        }

        Ok(())
    }
}

fn row_to_host_record(row: &MySqlRow) -> Result<HostRecord, StorageError> {
    let created_time: NaiveDateTime = get(row, "created_time")?;
    let updated_time: NaiveDateTime = get(row, "updated_time")?;

    let id: u64 = get(row, "id")?;
    let id = i64::try_from(id)
        .map_err(|_| StorageError::InvalidData(format!("column id out of range: {}", id)))?;

    Ok(HostRecord {
        id: HostId::new(id),
        ip_addr: get(row, "ip_addr")?,
        domain: get(row, "domain")?,
        hosts_group: get(row, "hosts_group")?,
        remark: get(row, "remark")?,
        created_by: caller(row, "created_by")?,
        created_time: created_time.and_utc(),
        updated_by: caller(row, "updated_by")?,
        updated_time: updated_time.and_utc(),
    })
}

/// Audit columns may be NULL in older tables; NULL reads as anonymous
fn caller(row: &MySqlRow, column: &str) -> Result<CallerId, StorageError> {
    let id: Option<i64> = get(row, column)?;
    Ok(id.map(CallerId::new).unwrap_or(CallerId::ANONYMOUS))
}

fn get<'r, T>(row: &'r MySqlRow, column: &str) -> Result<T, StorageError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(column)
        .map_err(|e| StorageError::InvalidData(format!("column {}: {}", column, e)))
}
