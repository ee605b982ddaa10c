//! Redirection, `getline` and input operands.

use std::fs;
use std::path::Path;

use awk_value::EvalErrorKind;
use pretty_assertions::assert_eq;

use super::{output, run, run_with};

fn write_file(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.display().to_string()
}

#[test]
fn print_to_file_then_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("out.txt").display().to_string();
    let source = format!(
        "BEGIN {{ print \"one\" > \"{file}\"; print \"two\" > \"{file}\"; close(\"{file}\"); \
         while ((getline line < \"{file}\") > 0) n++; print n, line }}"
    );
    assert_eq!(output(&source, ""), "2 two\n");
    assert_eq!(fs::read_to_string(&file).unwrap(), "one\ntwo\n");
}

#[test]
fn write_truncates_and_append_appends() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "log.txt", "old\n");
    let source = format!(
        "BEGIN {{ print \"a\" > \"{file}\"; close(\"{file}\"); print \"b\" >> \"{file}\"; printf \"%s\\n\", \"c\" >> \"{file}\" }}"
    );
    output(&source, "");
    assert_eq!(fs::read_to_string(&file).unwrap(), "a\nb\nc\n");
}

#[test]
fn getline_from_file_replaces_the_record() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "in.txt", "x y\nz\n");
    let source = format!(
        "BEGIN {{ while ((getline < \"{file}\") > 0) print NF \":\" $1; print NR }}"
    );
    assert_eq!(output(&source, ""), "2:x\n1:z\n0\n");
}

#[test]
fn getline_var_reads_the_next_main_record() {
    assert_eq!(
        output("NR == 1 { getline following; print $0 \"+\" following, NR }", "a\nb\nc\n"),
        "a+b 2\n"
    );
}

#[test]
fn plain_getline_replaces_the_record() {
    assert_eq!(
        output("{ print \"before\", $0; r = getline; print \"after\", $0, NF, r }", "x\ny z\n"),
        "before x\nafter y z 2 1\n"
    );
}

#[test]
fn getline_at_end_of_input_returns_zero() {
    assert_eq!(
        output("{ r = getline; print r, $0 }", "only\n"),
        "0 only\n"
    );
}

#[test]
fn getline_from_missing_file_fails() {
    let run = run("BEGIN { r = (getline line < \"/nonexistent/awki/input\"); print r }", "");
    assert_eq!(run.output, "-1\n");
    assert!(matches!(run.error_kinds().as_slice(), [EvalErrorKind::Io { .. }]));
}

#[cfg(unix)]
#[test]
fn command_getline() {
    let source = "BEGIN { \"echo hi there\" | getline; print $2, NR; \"echo a b\" | getline v; print v, NR }";
    assert_eq!(output(source, ""), "there 1\na b 2\n");
}

#[cfg(unix)]
#[test]
fn print_to_pipe() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("sorted.txt").display().to_string();
    let source = format!(
        "BEGIN {{ cmd = \"sort > {file}\"; print \"b\" | cmd; print \"a\" | cmd; close(cmd) }}"
    );
    output(&source, "");
    assert_eq!(fs::read_to_string(&file).unwrap(), "a\nb\n");
}

#[test]
fn file_operands_set_filename_and_fnr() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_file(dir.path(), "first", "a\nb\n");
    let second = write_file(dir.path(), "second", "c\n");
    let run = run_with(
        "{ print FILENAME == ARGV[ARGC - 1], FNR, NR, $0 }",
        "",
        &[&first, &second],
    );
    assert_eq!(run.output, "0 1 1 a\n0 2 2 b\n1 1 3 c\n");
}

#[test]
fn assignment_operands_apply_between_files() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_file(dir.path(), "first", "a\n");
    let second = write_file(dir.path(), "second", "b\n");
    let run = run_with("{ print x $0 }", "", &[&first, "x=5", &second]);
    assert_eq!(run.output, "a\n5b\n");
}

#[test]
fn missing_operand_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let present = write_file(dir.path(), "present", "ok\n");
    let run = run_with("{ print } END { print NR }", "", &["/nonexistent/awki/file", &present]);
    assert_eq!(run.output, "ok\n1\n");
    assert_eq!(run.status, 2);
    assert!(matches!(run.error_kinds().as_slice(), [EvalErrorKind::Io { .. }]));
}

#[test]
fn dash_operand_reads_stdin() {
    let run = run_with("{ print FILENAME, $0 }", "s\n", &["-"]);
    assert_eq!(run.output, "- s\n");
}

#[test]
fn stdin_has_empty_filename() {
    assert_eq!(output("{ print \"[\" FILENAME \"]\" }", "s\n"), "[]\n");
}

#[test]
fn cleared_operands_fall_back_to_stdin() {
    let run = run_with("BEGIN { ARGV[1] = \"\" } { print }", "from stdin\n", &["/nonexistent/awki/file"]);
    assert_eq!(run.output, "from stdin\n");
    assert!(run.errors.is_empty());
}

#[test]
fn argv_and_argc() {
    let run = run_with("BEGIN { for (i = 0; i < ARGC; i++) print i, ARGV[i] }", "", &["x=1", "y"]);
    assert_eq!(run.output, "0 awki\n1 x=1\n2 y\n");
}

#[test]
fn assignment_operands_process_escapes() {
    let run = run_with("{ print \"[\" sep \"]\" }", "r\n", &["sep=a\\tb\\n", "-"]);
    assert_eq!(run.output, "[a\tb\n]\n");
}

#[test]
fn preassigned_values_process_escapes() {
    let program = awk_parse::parse("BEGIN { print \"[\" x \"]\", length(y) }").unwrap();
    let handler = crate::buffer_handler();
    let mut interpreter = crate::InterpreterBuilder::new(&program)
        .print_handler(handler.clone())
        .assign("x", "a\\tb")
        .assign("y", "\\101\\\\")
        .environment(false)
        .echo_errors(false)
        .build();
    assert_eq!(interpreter.run(), 0);
    assert_eq!(handler.get_output(), "[a\tb] 2\n");
}
