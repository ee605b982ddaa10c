//! Whole-program scenarios: parse, run against in-memory input, inspect
//! output, exit status and reported errors.
//!
//! - `expr_tests`: values, operators, precedence, laziness
//! - `record_tests`: fields, `NF`, separators, `RS`
//! - `control_tests`: loops and the control-flow flag
//! - `function_tests`: user-defined functions and scoping
//! - `builtin_tests`: the builtin library and `printf`
//! - `pattern_tests`: pattern selection and ranges
//! - `io_tests`: redirection, `getline`, operands

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

mod builtin_tests;
mod function_tests;
mod io_tests;
mod pattern_tests;

use awk_value::{EvalError, EvalErrorKind};

use crate::{buffer_handler, InterpreterBuilder};

/// Result of one program run.
pub(crate) struct Run {
    pub(crate) output: String,
    pub(crate) status: i32,
    pub(crate) errors: Vec<EvalError>,
}

impl Run {
    pub(crate) fn error_kinds(&self) -> Vec<EvalErrorKind> {
        self.errors.iter().map(|err| err.kind.clone()).collect()
    }
}

/// Run `source` with `stdin` as standard input and `args` as operands.
pub(crate) fn run_with(source: &str, stdin: &str, args: &[&str]) -> Run {
    let program = awk_parse::parse(source).unwrap();
    let handler = buffer_handler();
    let mut interpreter = InterpreterBuilder::new(&program)
        .print_handler(handler.clone())
        .stdin_text(stdin)
        .args(args.iter().copied())
        .environment(false)
        .echo_errors(false)
        .build();
    let status = interpreter.run();
    Run {
        output: handler.get_output(),
        status,
        errors: interpreter.diagnostics().to_vec(),
    }
}

pub(crate) fn run(source: &str, stdin: &str) -> Run {
    run_with(source, stdin, &[])
}

/// Output of a run that must not report anything.
pub(crate) fn output(source: &str, stdin: &str) -> String {
    let run = run(source, stdin);
    assert!(run.errors.is_empty(), "unexpected errors: {:?}", run.errors);
    run.output
}
