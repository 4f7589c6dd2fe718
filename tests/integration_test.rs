//! Integration tests for the mapped-csv CLI.
//!
//! These tests run the actual binary against temporary input files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Write `contents` to a temporary `.csv` file
fn input_file(contents: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

/// Run the binary with the given arguments and return stdout
fn run_cli(args: &[&str], input: &NamedTempFile) -> String {
    let mut cmd = Command::cargo_bin("mapped-csv").unwrap();
    let assert = cmd.args(args).arg(input.path()).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_normalizes_unix_input_with_header() {
    let input = input_file(b"id,val\n1,\"x,y\"\n2,\"z\"\"q\"\n");
    let output = run_cli(&["--header", "--line-ending", "unix"], &input);
    assert_eq!(output, "1,\"x,y\"\n2,\"z\"\"q\"\n");
}

#[test]
fn test_default_line_ending_is_dos() {
    let input = input_file(b"a,b\r\n1,2\r\n");
    let output = run_cli(&[], &input);
    assert_eq!(output, "a,b\n1,2\n");
}

#[test]
fn test_mac_line_endings() {
    let input = input_file(b"a,b\r1,2\r");
    let output = run_cli(&["--line-ending", "mac"], &input);
    assert_eq!(output, "a,b\n1,2\n");
}

#[test]
fn test_pad_short_rows_flag() {
    let input = input_file(b"a,b,c\n1\n");
    let output = run_cli(&["--line-ending", "unix", "--pad"], &input);
    assert_eq!(output, "a,b,c\n1,,\n");
}

#[test]
fn test_empty_file_produces_no_output() {
    let input = input_file(b"");
    let output = run_cli(&[], &input);
    assert!(output.is_empty());
}

#[test]
fn test_short_row_fails() {
    let input = input_file(b"a,b,c\n1,2\n");
    let mut cmd = Command::cargo_bin("mapped-csv").unwrap();
    cmd.args(["--line-ending", "unix"])
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 2 has 2 fields, expected 3"));
}

#[test]
fn test_truncated_field_fails() {
    let input = input_file(b"a,\"unterminated\n");
    let mut cmd = Command::cargo_bin("mapped-csv").unwrap();
    cmd.args(["--line-ending", "unix"])
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("truncated quoted field"));
}

#[test]
fn test_header_on_empty_file_fails() {
    let input = input_file(b"");
    let mut cmd = Command::cargo_bin("mapped-csv").unwrap();
    cmd.arg("--header")
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty input"));
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("mapped-csv").unwrap();
    cmd.arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input unavailable"));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("mapped-csv").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file"));
}

#[test]
fn test_unknown_line_ending_error() {
    let input = input_file(b"a\n");
    let mut cmd = Command::cargo_bin("mapped-csv").unwrap();
    cmd.args(["--line-ending", "vms"])
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown line ending 'vms'"));
}

#[test]
fn test_unknown_flag_error() {
    let input = input_file(b"a\n");
    let mut cmd = Command::cargo_bin("mapped-csv").unwrap();
    cmd.arg("--tabs")
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown flag '--tabs'"));
}
