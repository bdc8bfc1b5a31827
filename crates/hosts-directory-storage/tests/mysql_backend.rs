//! MySQL backend test runner
//!
//! Runs the shared test suite against the MySQL storage backend
//! using testcontainers.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hosts-directory-storage --features mysql --test mysql_backend
//! ```
//!
//! # Prerequisites
//!
//! - Docker must be running
//! - The `mysql` feature must be enabled

#![cfg(feature = "mysql")]

mod common;

use hosts_directory_storage::backends::mysql::MySqlStorage;
use hosts_directory_storage::{CallerId, HostFilter, HostId, HostStore, NewHost, Storage};
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mysql::Mysql;

/// Start an empty MySQL container and return its connection URL
async fn start_mysql() -> (String, testcontainers::ContainerAsync<Mysql>) {
    let container = Mysql::default()
        .start()
        .await
        .expect("failed to start MySQL container");

    let host = container.get_host().await.expect("failed to get host");
    let port = container
        .get_host_port_ipv4(3306)
        .await
        .expect("failed to get port");

    // the module starts an empty-password root account with a `test` database
    let url = format!("mysql://root@{}:{}/test", host, port);
    (url, container)
}

/// Create an initialized MySQL storage using testcontainers
async fn create_storage() -> (MySqlStorage, testcontainers::ContainerAsync<Mysql>) {
    let (url, container) = start_mysql().await;

    let storage = MySqlStorage::new(&url)
        .await
        .expect("failed to create MySQL storage");
    storage
        .initialize()
        .await
        .expect("failed to initialize MySQL storage");

    (storage, container)
}

/// Run the complete storage test suite against MySQL
#[tokio::test]
async fn mysql_passes_all_storage_tests() {
    let (storage, _container) = create_storage().await;
    common::run_all_tests(&storage).await;
}

/// Test MySQL initialization is idempotent
#[tokio::test]
async fn mysql_initialize_is_idempotent() {
    let (storage, _container) = create_storage().await;

    storage
        .initialize()
        .await
        .expect("second initialize should succeed");
    storage
        .health_check()
        .await
        .expect("health check should succeed after double init");
}

/// Tables created by earlier deployments use an unsigned id, nullable audit
/// columns and millisecond DATETIME precision
#[tokio::test]
async fn mysql_reads_pre_existing_table() {
    let (url, _container) = start_mysql().await;

    let pool = sqlx::MySqlPool::connect(&url)
        .await
        .expect("failed to connect");
    sqlx::query(
        r#"
        CREATE TABLE sys_hosts (
            id BIGINT UNSIGNED AUTO_INCREMENT,
            ip_addr VARCHAR(32) NOT NULL,
            domain VARCHAR(100) NOT NULL,
            hosts_group VARCHAR(32) NOT NULL DEFAULT 'default_group',
            remark VARCHAR(255) NOT NULL DEFAULT '',
            created_by BIGINT DEFAULT 0,
            created_time DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
            updated_by BIGINT DEFAULT 0,
            updated_time DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3)
                ON UPDATE CURRENT_TIMESTAMP(3),
            PRIMARY KEY (id),
            UNIQUE INDEX idx_ip_domain_group (ip_addr, domain, hosts_group)
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("failed to create table");
    sqlx::query(
        "INSERT INTO sys_hosts (ip_addr, domain, created_by, updated_by) \
         VALUES ('10.0.0.5', 'nas.local', NULL, 7)",
    )
    .execute(&pool)
    .await
    .expect("failed to insert row");
    pool.close().await;

    let storage = MySqlStorage::new(&url)
        .await
        .expect("failed to create MySQL storage");
    storage.initialize().await.expect("initialize keeps table");

    let records = storage.list(&HostFilter::all()).await.expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, HostId::new(1));
    assert_eq!(records[0].hosts_group, "default_group");
    assert_eq!(records[0].created_by, CallerId::ANONYMOUS);
    assert_eq!(records[0].updated_by, CallerId::new(7));

    let created = storage
        .create(NewHost::new("10.0.0.6", "nas2.local"))
        .await
        .expect("create");
    let fetched = storage.get_by_id(created.id).await.expect("get");
    assert_eq!(fetched.domain, "nas2.local");
}
