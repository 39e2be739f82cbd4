#![cfg(feature = "storage-rocksdb")]

mod common;

use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_rocksdb_vote_across_runs() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("ballot_db");

    // 1. First run: register a voter and capture the issued credential.
    let csv1 = dir.path().join("register.csv");
    common::write_requests(&csv1, &[common::register_row(1)]).unwrap();

    let output1 = Command::new(cargo_bin!("ballotbox"))
        .arg(&csv1)
        .arg("--db-path")
        .arg(&db_path)
        .arg("--report")
        .arg("voters")
        .output()
        .expect("Failed to execute command");
    assert!(output1.status.success());

    let mut reader = csv::Reader::from_reader(output1.stdout.as_slice());
    let record = reader.records().next().unwrap().unwrap();
    let credential = record[5].to_string();
    assert_eq!(credential.len(), 16);

    // 2. Second run: vote with that credential against the same DB.
    let csv2 = dir.path().join("vote.csv");
    common::write_requests(&csv2, &[common::vote_row(&credential, "Ian Park")]).unwrap();

    let output2 = Command::new(cargo_bin!("ballotbox"))
        .arg(&csv2)
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);
    assert!(stdout2.contains("Ian Park,1"));
    assert!(stdout2.contains("winner,Ian Park"));

    // 3. Third run: the same credential is spent for good.
    let output3 = Command::new(cargo_bin!("ballotbox"))
        .arg(&csv2)
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output3.status.success());
    let stderr3 = String::from_utf8_lossy(&output3.stderr);
    assert!(stderr3.contains("already been used to vote"));
    let stdout3 = String::from_utf8_lossy(&output3.stdout);
    assert!(stdout3.contains("Ian Park,1"));
}

#[test]
fn test_rocksdb_registration_conflict_across_runs() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("ballot_db");

    let csv = dir.path().join("register.csv");
    common::write_requests(&csv, &[common::register_row(1)]).unwrap();

    let output1 = Command::new(cargo_bin!("ballotbox"))
        .arg(&csv)
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .unwrap();
    assert!(output1.status.success());

    // Re-running the same registration must hit the email uniqueness check.
    let output2 = Command::new(cargo_bin!("ballotbox"))
        .arg(&csv)
        .arg("--db-path")
        .arg(&db_path)
        .arg("--report")
        .arg("voters")
        .output()
        .unwrap();
    assert!(output2.status.success());
    let stderr2 = String::from_utf8_lossy(&output2.stderr);
    assert!(stderr2.contains("already registered"));

    // Still exactly one voter on the roll.
    let stdout2 = String::from_utf8_lossy(&output2.stdout);
    assert_eq!(stdout2.lines().count(), 2); // header + one row
}
