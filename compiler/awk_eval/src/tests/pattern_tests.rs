//! Pattern selection over whole inputs.

use pretty_assertions::assert_eq;

use super::output;

const LINES: &str = "alpha\nbeta\ngamma\ndelta\nepsilon\n";

#[test]
fn regex_and_expression_patterns() {
    assert_eq!(output("/^[bg]/", LINES), "beta\ngamma\n");
    assert_eq!(output("NR % 2 == 0 { print NR, $0 }", LINES), "2 beta\n4 delta\n");
    assert_eq!(output("length > 5", LINES), "epsilon\n");
}

#[test]
fn negated_and_combined_patterns() {
    assert_eq!(output("!/a/", LINES), "epsilon\n");
    assert_eq!(output("/l/ && !/p/", LINES), "delta\n");
    assert_eq!(output("/^a/ || /^e/", LINES), "alpha\nepsilon\n");
}

#[test]
fn expression_ranges() {
    assert_eq!(output("NR == 2, NR == 4", LINES), "beta\ngamma\ndelta\n");
}

#[test]
fn regex_range_reopens() {
    assert_eq!(
        output("/start/, /stop/ { print NR }", "x\nstart\ny\nstop\nz\nstart\nw\n"),
        "2\n3\n4\n6\n7\n"
    );
}

#[test]
fn range_ending_on_its_first_record() {
    assert_eq!(output("/a/, /a/ { print NR }", "a\nb\na\n"), "1\n3\n");
}

#[test]
fn every_matching_item_runs_in_order() {
    assert_eq!(
        output("/a/ { print \"1:\" $0 } /l/ { print \"2:\" $0 }", "al\nb\n"),
        "1:al\n2:al\n"
    );
}

#[test]
fn begin_and_end_run_once() {
    assert_eq!(
        output("BEGIN { print \"start\" } END { print \"end\", NR } BEGIN { print \"again\" }", "x\ny\n"),
        "start\nagain\nend 2\n"
    );
}

#[test]
fn end_sees_the_last_record() {
    assert_eq!(output("END { print $0, NF }", "a b\nc d e\n"), "c d e 3\n");
}

#[test]
fn begin_only_programs_do_not_read_input() {
    assert_eq!(output("BEGIN { print \"only\" }", "ignored\n"), "only\n");
}
