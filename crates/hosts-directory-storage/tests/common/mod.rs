//! Shared test harness for storage backends
//!
//! This module provides generic test functions that verify correct
//! implementation of the storage traits. All storage backends must
//! pass these tests to ensure consistent behavior.
//!
//! # Usage
//!
//! ```ignore
//! use hosts_directory_storage::backends::sqlite::SqliteStorage;
//!
//! #[tokio::test]
//! async fn sqlite_passes_all_tests() {
//!     let storage = SqliteStorage::new(":memory:").await.unwrap();
//!     storage.initialize().await.unwrap();
//!     common::run_all_tests(&storage).await;
//! }
//! ```
//!
//! The suite runs against one shared database, so every test works in its
//! own groups and never assumes the table is empty.

pub mod host_store_tests;

use hosts_directory_storage::Storage;

/// Run all storage trait tests
pub async fn run_all_tests<S: Storage>(storage: &S) {
    println!("Running HostStore tests...");
    host_store_tests::run_all(storage).await;

    println!("All storage tests passed!");
}
