#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use awk_ir::{Action, ListKind, Pattern, RedirectKind};
use pretty_assertions::assert_eq;

use crate::parse;

fn first_action(source: &str) -> Action {
    let program = parse(source).unwrap();
    program.items[0].actions.actions[0].clone()
}

#[test]
fn begin_body_end() {
    let program = parse("BEGIN { x = 1 }\n$1 > 2 { print }\nEND { print x }").unwrap();
    assert_eq!(program.items.len(), 3);
    assert!(program.items[0].pattern.is_begin());
    assert!(matches!(program.items[1].pattern, Pattern::Expr(_)));
    assert!(program.items[2].pattern.is_end());
    assert_eq!(program.items[1].actions.kind, ListKind::Program);
    assert_eq!(program.main_items().count(), 1);
}

#[test]
fn bare_pattern_prints() {
    let program = parse("NR % 2").unwrap();
    assert!(matches!(
        &program.items[0].actions.actions[..],
        [Action::Print { args, output: None }] if args.is_empty()
    ));
}

#[test]
fn pattern_composites() {
    let program = parse("/a/ && !/b/ { n++ }").unwrap();
    let Pattern::And(left, right) = &program.items[0].pattern else {
        panic!("expected And, got {:?}", program.items[0].pattern);
    };
    assert_eq!(**left, Pattern::Regex("a".into()));
    assert_eq!(**right, Pattern::Not(Box::new(Pattern::Regex("b".into()))));
}

#[test]
fn negated_comparison_stays_an_expression() {
    let program = parse("!x == 1 { n++ }").unwrap();
    assert!(matches!(program.items[0].pattern, Pattern::Expr(_)));
}

#[test]
fn range_patterns_get_ids() {
    let program = parse("NR==1, NR==3\n/x/,/y/ { print }").unwrap();
    assert_eq!(program.ranges, 2);
    assert!(matches!(program.items[1].pattern, Pattern::Range { id: 1, .. }));
}

#[test]
fn print_redirection() {
    let Action::Print { args, output } = first_action(r#"{ print $1, $2 > "out" }"#) else {
        panic!("expected print");
    };
    assert_eq!(args.len(), 2);
    let output = output.unwrap();
    assert_eq!(output.kind, RedirectKind::Write);
    assert_eq!(output.target.to_string(), r#""out""#);

    let Action::Print { output, .. } = first_action(r#"{ print >> "log" }"#) else {
        panic!("expected print");
    };
    assert_eq!(output.unwrap().kind, RedirectKind::Append);

    let Action::Printf { args, output } = first_action(r#"{ printf "%s\n", $1 | "sort" }"#)
    else {
        panic!("expected printf");
    };
    assert_eq!(args.len(), 2);
    assert_eq!(output.unwrap().kind, RedirectKind::Pipe);
}

#[test]
fn print_grouping() {
    let Action::Print { args, output } = first_action(r#"{ print (1, 2) > "f" }"#) else {
        panic!("expected print");
    };
    assert_eq!(args.len(), 2);
    assert!(output.is_some());

    let Action::Print { args, .. } = first_action("{ print (1)(2) }") else {
        panic!("expected print");
    };
    assert_eq!(args.len(), 1);

    let Action::Print { args, .. } = first_action("{ print (a > b) }") else {
        panic!("expected print");
    };
    assert_eq!(args[0].to_string(), "a > b");
}

#[test]
fn if_else_across_semicolon() {
    let Action::If { then, otherwise, .. } =
        first_action(r#"{ if (x) print "a"; else print "b" }"#)
    else {
        panic!("expected if");
    };
    assert_eq!(then.kind, ListKind::Simple);
    assert_eq!(otherwise.map(|list| list.actions.len()), Some(1));
}

#[test]
fn loops() {
    let Action::ForIn { var, array, body } = first_action("{ for (k in a) delete a[k] }") else {
        panic!("expected for-in");
    };
    assert_eq!((var.as_str(), array.as_str()), ("k", "a"));
    assert_eq!(body.kind, ListKind::Iteration);
    assert!(matches!(body.actions[0], Action::Delete { subscript: Some(_), .. }));

    let Action::For { init, cond, step, .. } = first_action("{ for (;;) break }") else {
        panic!("expected for");
    };
    assert!(init.is_none() && cond.is_none() && step.is_none());

    let Action::DoWhile { body, .. } = first_action("{ do { i++ } while (i < 3) }") else {
        panic!("expected do-while");
    };
    assert_eq!(body.kind, ListKind::Iteration);

    let Action::While { body, .. } = first_action("{ while (x-- > 0)\n ; }") else {
        panic!("expected while");
    };
    assert!(body.is_empty());
}

#[test]
fn functions() {
    let program = parse("function add(a, b,\n  tmp) { tmp = a + b; return tmp }\nBEGIN { print add(1, 2) }")
        .unwrap();
    let function = program.function("add").unwrap();
    assert_eq!(function.params.len(), 3);
    assert_eq!(function.body.kind, ListKind::Routine);
    assert!(matches!(function.body.actions[1], Action::Return(Some(_))));
}

#[test]
fn errors() {
    let err = parse("{ print ( }").unwrap_err();
    assert!(err.message.contains("unexpected"), "{}", err.message);

    let err = parse("BEGIN print").unwrap_err();
    assert_eq!(err.message, "expected `{`, found `print`");

    let err = parse("function f() {}\nfunction f() {}").unwrap_err();
    assert!(err.message.contains("redefined"));

    let err = parse("{ x = \"abc }").unwrap_err();
    assert_eq!(err.message, "unterminated string");

    let err = parse("{ printf }").unwrap_err();
    assert_eq!(err.message, "printf: no format");
}
