//! End-to-end tests for the `avlbox` binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::NamedTempFile;

fn point_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_avlbox"))
        .args(args)
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The child may exit before reading, e.g. on a usage error
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().unwrap()
}

fn run_with_points(points: &str, stdin: &str) -> Output {
    let file = point_file(points);
    run(&[file.path().to_str().unwrap()], stdin)
}

#[test]
fn test_three_points() {
    let out = run_with_points("0 0\n3 4\n10 10\n", "0 0 5\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "2\n");
}

#[test]
fn test_empty_point_file() {
    let out = run_with_points("", "0 0 100\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "0\n");
}

#[test]
fn test_diagonal_points() {
    let out = run_with_points("1 1\n2 2\n3 3\n4 4\n5 5\n", "3 3 1\n");
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "1\n");
}

#[test]
fn test_blank_line_ends_queries() {
    let out = run_with_points("0 0\n3 4\n10 10\n", "0 0 5\n10 10 0\n\n0 0 100\n1 1 1\n");
    assert!(out.status.success(), "Early end of queries is a normal run");
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "2\n1\n");
}

#[test]
fn test_malformed_line_ends_queries() {
    let out = run_with_points("0 0\n", "0 0 1\n0 0 1 1\n0 0 1\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "1\n");
}

#[test]
fn test_no_queries() {
    let out = run_with_points("0 0\n", "");
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn test_missing_argument_fails() {
    let out = run(&[], "");
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn test_extra_argument_fails() {
    let file = point_file("0 0\n");
    let path = file.path().to_str().unwrap();
    let out = run(&[path, path], "0 0 1\n");
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn test_unreadable_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    let out = run(&[missing.to_str().unwrap()], "0 0 1\n");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(!out.stderr.is_empty(), "Operator should see an error message");
}
