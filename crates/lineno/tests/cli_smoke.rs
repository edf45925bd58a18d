use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn lineno() -> Command {
    Command::cargo_bin("lineno").expect("binary exists")
}

#[test]
fn help_displays_usage() {
    lineno()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn insert_prints_numbered_lines() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.txt");
    fs::write(&file, "alpha\nbeta\n").unwrap();

    lineno()
        .arg("insert")
        .arg(&file)
        .args(["--lines", "1-2"])
        .assert()
        .success()
        .stdout(predicate::eq("1: alpha\n2: beta\n"));
}

#[test]
fn insert_in_place_rewrites_the_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.txt");
    fs::write(&file, "alpha\nbeta\n").unwrap();

    lineno()
        .arg("insert")
        .arg(&file)
        .arg("--in-place")
        .assert()
        .success()
        .stdout(predicate::eq(""));

    assert_eq!(fs::read_to_string(&file).unwrap(), "1: alpha\n2: beta\n");
}

#[test]
fn insert_from_uses_the_given_start() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.txt");
    fs::write(&file, "a\nb\nc\n").unwrap();

    lineno()
        .arg("insert-from")
        .arg(&file)
        .args(["--start", "99"])
        .assert()
        .success()
        .stdout(predicate::eq("099: a\n100: b\n101: c\n"));
}

#[test]
fn copy_stdout_skips_blank_lines_and_keeps_labels() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.txt");
    fs::write(&file, "foo\nbar\n\nbaz\n").unwrap();

    lineno()
        .arg("copy")
        .arg(&file)
        .args(["--lines", "1-4", "--format", "delete-blank-line", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::eq("1: foo\n2: bar\n4: baz\n"));
}

#[test]
fn copy_with_filename_header() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.txt");
    fs::write(&file, "only\n").unwrap();

    lineno()
        .arg("copy")
        .arg(&file)
        .args(["--header", "filename", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::eq("sample.txt\n1: only\n"));
}

#[test]
fn strip_numbers_restores_plain_text() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.txt");
    fs::write(&file, "1: a\nplain\n2: b\n").unwrap();

    lineno()
        .arg("strip-numbers")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::eq("a\nplain\nb\n"));
}

#[test]
fn bad_line_spec_fails_with_a_message() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.txt");
    fs::write(&file, "a\n").unwrap();

    lineno()
        .arg("insert")
        .arg(&file)
        .args(["--lines", "9-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start exceeds end"));
}

#[test]
fn missing_file_fails_with_a_message() {
    lineno()
        .arg("insert")
        .arg("does-not-exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
