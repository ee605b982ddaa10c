//! User-defined functions.

use awk_value::EvalErrorKind;
use pretty_assertions::assert_eq;

use super::{output, run};

#[test]
fn return_values() {
    let source = "function add(a, b) { return a + b }\nBEGIN { print add(2, 3), add(\"x\") + 0 }";
    assert_eq!(output(source, ""), "5 0\n");
}

#[test]
fn falling_off_the_end_returns_empty() {
    assert_eq!(
        output("function f() { x = 1 }\nBEGIN { v = f(); print \"[\" v \"]\" }", ""),
        "[]\n"
    );
}

#[test]
fn recursion() {
    let source = "function fact(n) { return n <= 1 ? 1 : n * fact(n - 1) }\nBEGIN { print fact(10) }";
    assert_eq!(output(source, ""), "3628800\n");

    let fib = "function fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2) }\nBEGIN { print fib(15) }";
    assert_eq!(output(fib, ""), "610\n");
}

#[test]
fn deep_recursion_does_not_overflow() {
    let source = "function depth(n) { return n == 0 ? 0 : 1 + depth(n - 1) }\nBEGIN { print depth(5000) }";
    assert_eq!(output(source, ""), "5000\n");
}

#[test]
fn scalars_are_passed_by_value() {
    let source = "function bump(v) { v++; return v }\nBEGIN { x = 1; y = bump(x); print x, y }";
    assert_eq!(output(source, ""), "1 2\n");
}

#[test]
fn arrays_are_passed_by_reference() {
    let source = "function fill(arr, n) { for (i = 1; i <= n; i++) arr[i] = i * i }
        BEGIN { fill(sq, 3); print length(sq), sq[2], sq[3] }";
    assert_eq!(output(source, ""), "3 4 9\n");
}

#[test]
fn extra_parameters_are_locals() {
    let source = "function f(a,   tmp) { tmp = a * 2; return tmp }\nBEGIN { tmp = \"outer\"; print f(4), tmp }";
    assert_eq!(output(source, ""), "8 outer\n");
}

#[test]
fn undeclared_names_are_globals() {
    let source = "function inc() { counter++ }\nBEGIN { inc(); inc(); inc(); print counter }";
    assert_eq!(output(source, ""), "3\n");
}

#[test]
fn parameters_shadow_globals_inside_callees() {
    let source = "function outer(x) { return inner() }
        function inner() { return x }
        BEGIN { x = \"global\"; print outer(\"param\") }";
    assert_eq!(output(source, ""), "param\n");
}

#[test]
fn return_inside_loop() {
    let source = "function first_even(arr, n,   i) { for (i = 1; i <= n; i++) if (arr[i] % 2 == 0) return arr[i]; return -1 }
        BEGIN { a[1] = 3; a[2] = 8; a[3] = 10; print first_even(a, 3) }";
    assert_eq!(output(source, ""), "8\n");
}

#[test]
fn function_called_from_pattern() {
    let source = "function long(s) { return length(s) > 3 }\nlong($0) { print }";
    assert_eq!(output(source, "ab\nabcd\n"), "abcd\n");
}

#[test]
fn call_errors_are_reported() {
    let unknown = run("BEGIN { x = nope(1); print \"[\" x \"]\" }", "");
    assert_eq!(unknown.output, "[]\n");
    assert_eq!(
        unknown.error_kinds(),
        [EvalErrorKind::UnknownFunction { name: "nope".into() }]
    );

    let extra = run("function f(a) { return a }\nBEGIN { print f(1, 2) \"|\" }", "");
    assert_eq!(extra.output, "|\n");
    assert_eq!(
        extra.error_kinds(),
        [EvalErrorKind::TooManyArgs { name: "f".into() }]
    );
}
