//! Adapters for the domain ports.
//!
//! The in-memory adapters are the default. Enabling the `storage-rocksdb`
//! feature adds a RocksDB-backed order table and local storage.

pub mod in_memory;
pub mod log_notifier;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
