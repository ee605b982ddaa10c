// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests running the `awki` binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

fn awki(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_awki"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start awki");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn runs_program_over_stdin() {
    let out = awki(&["{ s += $2 } END { print s, NR }"], "a 1\nb 2\nc 3\n");
    assert_eq!(stdout(&out), "6 3\n");
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn field_separator_and_assignments() {
    let out = awki(
        &["-F:", "-v", "greeting=hi", "{ print greeting, $2 }"],
        "x:y:z\n",
    );
    assert_eq!(stdout(&out), "hi y\n");
}

#[test]
fn program_file_and_operands() {
    let dir = tempfile::tempdir().unwrap();
    let program = dir.path().join("count.awk");
    let input = dir.path().join("input.txt");
    std::fs::write(&program, "END { print NR, n }").unwrap();
    std::fs::write(&input, "1\n2\n").unwrap();

    let out = awki(
        &[
            "-f",
            program.to_str().unwrap(),
            "n=7",
            input.to_str().unwrap(),
        ],
        "",
    );
    assert_eq!(stdout(&out), "2 7\n");
}

#[test]
fn exit_status_is_propagated() {
    let out = awki(&["BEGIN { exit 3 }"], "");
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn syntax_error_is_rendered_and_exits_two() {
    let out = awki(&["BEGIN { print 1 +* 2 }"], "");
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(stdout(&out), "");
    assert!(stderr(&out).contains("<program>"), "{}", stderr(&out));
}

#[test]
fn usage_error_exits_two() {
    let out = awki(&[], "");
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("usage: awki"));
}

#[test]
fn runtime_errors_go_to_stderr() {
    let out = awki(&["BEGIN { nope(); print \"after\" }"], "");
    assert_eq!(stdout(&out), "after\n");
    assert!(stderr(&out).contains("nope"), "{}", stderr(&out));
}

#[test]
fn debug_dumps_the_program() {
    let out = awki(&["--debug", "BEGIN { print 1 }"], "");
    assert_eq!(stdout(&out), "1\n");
    assert!(stderr(&out).contains("BEGIN"), "{}", stderr(&out));
}

#[test]
fn assignment_values_process_escapes() {
    let out = awki(&["-v", "x=a\\tb", "BEGIN { print x }"], "");
    assert_eq!(stdout(&out), "a\tb\n");
}
