//! Storage backend implementations
//!
//! This module contains implementations of the Storage trait for different databases.
//! At least one backend must be enabled via feature flags.

#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "sqlite")]
pub mod sqlite;

use crate::error::StorageError;

/// Columns selected for every host record query, in row-mapping order
#[allow(dead_code)]
pub(crate) const HOST_COLUMNS: &str = "id, ip_addr, domain, hosts_group, remark, \
     created_by, created_time, updated_by, updated_time";

/// Map an INSERT/UPDATE failure, turning unique violations into `DuplicateEntry`
#[allow(dead_code)]
pub(crate) fn map_write_error(
    err: sqlx::Error,
    context: &'static str,
    ip_addr: &str,
    domain: &str,
    hosts_group: &str,
) -> StorageError {
    let unique = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());

    if unique {
        StorageError::DuplicateEntry {
            ip_addr: ip_addr.to_string(),
            domain: domain.to_string(),
            hosts_group: hosts_group.to_string(),
        }
    } else {
        StorageError::query(context, err)
    }
}

/// Build a `WHERE hosts_group IN (...)` clause for `count` groups.
///
/// `placeholder` renders the n-th (1-based) bind marker for the dialect.
#[allow(dead_code)]
pub(crate) fn group_clause(count: usize, placeholder: impl Fn(usize) -> String) -> String {
    let markers: Vec<String> = (1..=count).map(placeholder).collect();
    format!("WHERE hosts_group IN ({})", markers.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_clause_question_marks() {
        let clause = group_clause(3, |_| "?".to_string());
        assert_eq!(clause, "WHERE hosts_group IN (?, ?, ?)");
    }

    #[test]
    fn test_group_clause_numbered() {
        let clause = group_clause(2, |n| format!("${}", n));
        assert_eq!(clause, "WHERE hosts_group IN ($1, $2)");
    }

    #[test]
    fn test_map_write_error_non_database() {
        let err = map_write_error(sqlx::Error::RowNotFound, "insert failed", "a", "b", "c");
        assert!(matches!(err, StorageError::Query { .. }));
    }
}
