//! The builtin function library.

use awk_value::EvalErrorKind;
use pretty_assertions::assert_eq;

use super::{output, run};

#[test]
fn length_forms() {
    assert_eq!(
        output("{ a[1]; a[2]; print length, length($2), length(a), length(\"héllo\") }", "ab cde\n"),
        "6 3 2 5\n"
    );
}

#[test]
fn substr_and_index() {
    let source = "BEGIN { s = \"hello world\"; print substr(s, 7), substr(s, 1, 5), substr(s, 0, 2), index(s, \"o\"), index(s, \"z\") }";
    assert_eq!(output(source, ""), "world hello h 5 0\n");
}

#[test]
fn split_fills_the_array() {
    let source = "BEGIN { n = split(\"a:b:c\", parts, \":\"); print n, parts[1], parts[3]; m = split(\"x1y22z\", more, /[0-9]+/); print m, more[2], more[3] }";
    assert_eq!(output(source, ""), "3 a c\n3 y z\n");
}

#[test]
fn split_clears_previous_elements() {
    let source = "BEGIN { split(\"a b c d\", arr); split(\"x y\", arr); p = 3 in arr; print length(arr), arr[1], p }";
    assert_eq!(output(source, ""), "2 x 0\n");
}

#[test]
fn split_uses_fs_by_default() {
    assert_eq!(
        output("BEGIN { FS = \",\" } { n = split($0, f); print n, f[2] }", "p,q,r\n"),
        "3 q\n"
    );
}

#[test]
fn sub_and_gsub() {
    let source = "{ n = gsub(/o/, \"0\"); print n, $0; s = \"aaa\"; sub(\"a\", \"b\", s); print s }";
    assert_eq!(output(source, "foo boo\n"), "4 f00 b00\nbaa\n");
}

#[test]
fn gsub_replacement_ampersand() {
    let source = "BEGIN { s = \"cat hat\"; gsub(/[ch]at/, \"<&>\", s); print s; t = \"x\"; gsub(/x/, \"\\\\&\", t); print t }";
    assert_eq!(output(source, ""), "<cat> <hat>\n&\n");
}

#[test]
fn gsub_on_a_field_rebuilds_the_record() {
    assert_eq!(output("{ gsub(/a/, \"A\", $2); print }", "a a a\n"), "a A a\n");
}

#[test]
fn sub_without_match_leaves_target_alone() {
    assert_eq!(
        output("BEGIN { s = \"abc\"; n = sub(/z/, \"y\", s); print n, s }", ""),
        "0 abc\n"
    );
}

#[test]
fn match_sets_rstart_and_rlength() {
    let source = "BEGIN { print match(\"foobar\", /o+b/), RSTART, RLENGTH; print match(\"abc\", /z/), RSTART, RLENGTH }";
    assert_eq!(output(source, ""), "2 2 3\n0 0 -1\n");
}

#[test]
fn case_conversion() {
    assert_eq!(
        output("BEGIN { print toupper(\"MiXed 1\"), tolower(\"MiXed 1\") }", ""),
        "MIXED 1 mixed 1\n"
    );
}

#[test]
fn arithmetic_functions() {
    let source = "BEGIN { print int(3.9), int(-3.9), int(\"42abc\"), sqrt(16), exp(0), log(1), sin(0), cos(0), atan2(0, 1) }";
    assert_eq!(output(source, ""), "3 -3 0 4 1 0 0 1 0\n");
}

#[test]
fn rand_is_reproducible_after_srand() {
    let source = "BEGIN { srand(7); a = rand(); srand(7); b = rand(); same = a == b; unit = a >= 0 && a < 1; print same, unit }";
    assert_eq!(output(source, ""), "1 1\n");
}

#[test]
fn srand_returns_the_previous_seed() {
    assert_eq!(output("BEGIN { x = srand(5); y = srand(9); print x, y }", ""), "0 5\n");
}

#[test]
fn sprintf_formats() {
    let source = "BEGIN { s = sprintf(\"%5.2f|%-4d|%x|%c|%s\", 3.14159, 42, 255, 65, \"str\"); print s }";
    assert_eq!(output(source, ""), " 3.14|42  |ff|A|str\n");
}

#[test]
fn printf_statement() {
    assert_eq!(
        output("{ printf \"%s=%03d\\n\", $1, $2 }", "a 7\nb 12\n"),
        "a=007\nb=012\n"
    );
    assert_eq!(output("BEGIN { printf(\"%d%%\\n\", 50) }", ""), "50%\n");
}

#[test]
fn wrong_argument_count_is_reported() {
    let run = run("BEGIN { x = substr(\"abc\"); print \"[\" x \"]\" }", "");
    assert_eq!(run.output, "[]\n");
    assert_eq!(
        run.error_kinds(),
        [EvalErrorKind::InvalidArgCount { name: "substr".into() }]
    );
}

#[test]
fn system_returns_exit_status() {
    let run = run("BEGIN { print system(\"exit 3\") }", "");
    assert_eq!(run.output, "3\n");
}

#[test]
fn close_of_unopened_stream() {
    assert_eq!(output("BEGIN { print close(\"never-opened\") }", ""), "-1\n");
}

#[test]
fn printf_with_oversized_width_and_precision() {
    let text = output("BEGIN { printf \"%.70000f|\\n\", 1; printf \"%*d|\\n\", 2^62, 1 }", "");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1.000") && lines[0].ends_with('|'));
    assert_eq!(lines[1].len(), crate::format::MAX_WIDTH + 1);
    assert!(lines[1].ends_with("1|"));
}
