#![cfg(feature = "storage-rocksdb")]

mod common;

use assert_cmd::cargo_bin;
use common::{customer_rows, write_script};
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: place an order and start cooking it
    let script1 = dir.path().join("run1.csv");
    let mut rows = vec![["add", "2", "", ""]];
    rows.extend(customer_rows("Ana", "2025-05-01", "19:30"));
    rows.push(["submit", "", "", ""]);
    rows.push(["advance", "1", "", ""]);
    write_script(&script1, &rows).unwrap();

    let mut cmd1 = Command::new(cargo_bin!("storefront"));
    cmd1.arg(&script1).arg("--db-path").arg(&db_path);

    let output1 = cmd1.output().expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("1,cooking,Ana"));

    // 2. Second run: another order, and the first one is delivered
    let script2 = dir.path().join("run2.csv");
    let mut rows = vec![["add", "4", "", ""]];
    rows.extend(customer_rows("Luis", "2025-05-01", "20:00"));
    rows.push(["submit", "", "", ""]);
    rows.push(["advance", "1", "", ""]);
    write_script(&script2, &rows).unwrap();

    let mut cmd2 = Command::new(cargo_bin!("storefront"));
    cmd2.arg(&script2).arg("--db-path").arg(&db_path);

    let output2 = cmd2.output().expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);

    // Order ids continue and the status map was recovered
    assert!(stdout2.contains("2,pending,Luis"));
    assert!(stdout2.contains("1,delivered,Ana"));
    assert!(stdout2.contains("Total collected: $ 12.500"));
}
