use std::process::{Command, Output};

use test_support::TestDir;

fn binary_output(path: &str, args: &[&str]) -> Output {
    Command::new(path)
        .args(args)
        .env_remove("SPARSE_CP_LOG")
        .output()
        .unwrap_or_else(|error| panic!("failed to run {path}: {error}"))
}

#[test]
fn sparse_cp_help_lists_usage() {
    let output = binary_output(env!("CARGO_BIN_EXE_sparse-cp"), &["--help"]);
    assert!(output.status.success(), "--help should succeed");
    assert!(
        output.stderr.is_empty(),
        "help output should not write to stderr"
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    assert!(stdout.contains("Usage: sparse-cp"));
}

#[test]
fn sparse_cp_without_operands_exits_with_usage_status() {
    let output = binary_output(env!("CARGO_BIN_EXE_sparse-cp"), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("Usage:"));
}

#[test]
fn sparse_cp_with_one_operand_creates_nothing() {
    let dir = TestDir::new().expect("tempdir");
    let source = dir.write_file("source", b"data").expect("write source");

    let output = binary_output(
        env!("CARGO_BIN_EXE_sparse-cp"),
        &[source.to_str().expect("utf8 path")],
    );

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 1);
}

#[test]
fn sparse_cp_missing_source_exits_with_file_select_status() {
    let dir = TestDir::new().expect("tempdir");
    let missing = dir.join("missing");
    let destination = dir.join("destination");

    let output = binary_output(
        env!("CARGO_BIN_EXE_sparse-cp"),
        &[
            missing.to_str().expect("utf8 path"),
            destination.to_str().expect("utf8 path"),
        ],
    );

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.starts_with("sparse-cp: failed to open source file"));
    assert!(!destination.exists());
}

#[test]
fn sparse_cp_unwritable_destination_exits_with_file_select_status() {
    let dir = TestDir::new().expect("tempdir");
    let source = dir.write_file("source", b"data").expect("write source");
    let destination = dir.join("no-such-dir/destination");

    let output = binary_output(
        env!("CARGO_BIN_EXE_sparse-cp"),
        &[
            source.to_str().expect("utf8 path"),
            destination.to_str().expect("utf8 path"),
        ],
    );

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("failed to open destination file"));
}

#[test]
fn sparse_cp_copies_and_exits_zero() {
    let dir = TestDir::new().expect("tempdir");
    let source = dir.write_file("source", b"hello, holes").expect("write source");
    let destination = dir.join("destination");

    let output = binary_output(
        env!("CARGO_BIN_EXE_sparse-cp"),
        &[
            source.to_str().expect("utf8 path"),
            destination.to_str().expect("utf8 path"),
        ],
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
    assert_eq!(dir.read_file("destination").expect("read"), b"hello, holes");
}

#[test]
fn mkhole_help_lists_usage() {
    let output = binary_output(env!("CARGO_BIN_EXE_mkhole"), &["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    assert!(stdout.contains("Usage: mkhole"));
}

#[test]
fn mkhole_rejects_unknown_flag() {
    let output = binary_output(env!("CARGO_BIN_EXE_mkhole"), &["--definitely-not-a-flag"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("--definitely-not-a-flag"));
}
