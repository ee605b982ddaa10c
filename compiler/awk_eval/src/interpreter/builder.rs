//! `InterpreterBuilder` for creating an `Interpreter` for one program run.

use std::io::Cursor;

use rand::rngs::StdRng;
use rand::SeedableRng;

use awk_ir::{Name, Program};
use awk_lexer::unescape_string;
use awk_value::{Flag, Value};

use super::{Interpreter, SpecialNames};
use crate::driver::MainInput;
use crate::io::RecordReader;
use crate::record::Record;
use crate::stack_machine::ExecuteStack;
use crate::{stdout_handler, Environment, RegexCache, SharedPrintHandler, Streams};

/// Builder for an [`Interpreter`].
///
/// Defaults: no operands (standard input is read), `FS` of `" "`, output to
/// the process's stdout, runtime errors echoed to stderr.
pub struct InterpreterBuilder<'p> {
    program: &'p Program,
    program_name: String,
    args: Vec<String>,
    assignments: Vec<(String, String)>,
    field_separator: Option<String>,
    print_handler: Option<SharedPrintHandler>,
    stdin_text: Option<String>,
    environment: bool,
    echo_errors: bool,
}

impl<'p> InterpreterBuilder<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            program_name: "awki".to_string(),
            args: Vec::new(),
            assignments: Vec::new(),
            field_separator: None,
            print_handler: None,
            stdin_text: None,
            environment: true,
            echo_errors: true,
        }
    }

    /// `ARGV[0]`.
    #[must_use]
    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = name.into();
        self
    }

    /// Operands after the program: `ARGV[1]` onwards.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// A `-v name=value` assignment, applied before `BEGIN`.
    #[must_use]
    pub fn assign(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.assignments.push((name.into(), value.into()));
        self
    }

    /// Initial `FS` (`-F`).
    #[must_use]
    pub fn field_separator(mut self, fs: impl Into<String>) -> Self {
        self.field_separator = Some(fs.into());
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Read standard input from `text` instead of the process's stdin.
    #[must_use]
    pub fn stdin_text(mut self, text: impl Into<String>) -> Self {
        self.stdin_text = Some(text.into());
        self
    }

    /// Whether `ENVIRON` is filled from the process environment.
    #[must_use]
    pub fn environment(mut self, enabled: bool) -> Self {
        self.environment = enabled;
        self
    }

    /// Whether reported runtime errors are also written to stderr.
    #[must_use]
    pub fn echo_errors(mut self, enabled: bool) -> Self {
        self.echo_errors = enabled;
        self
    }

    pub fn build(self) -> Interpreter<'p> {
        let names = SpecialNames::new();
        let mut env = Environment::new();

        let defaults = [
            (&names.fs, " "),
            (&names.ofs, " "),
            (&names.ors, "\n"),
            (&names.rs, "\n"),
            (&names.nr, "0"),
            (&names.nf, "0"),
            (&names.fnr, "0"),
            (&names.filename, ""),
            (&names.subsep, "\u{1c}"),
            (&names.rstart, "0"),
            (&names.rlength, "-1"),
            (&names.ofmt, "%.6g"),
        ];
        for (name, value) in defaults {
            env.global_mut(name).set_value(Value::from(value));
        }
        if let Some(fs) = &self.field_separator {
            env.global_mut(&names.fs).set_value(Value::from(fs.as_str()));
        }

        let argv = env.global_mut(&names.argv);
        argv.set_element("0", Value::from(self.program_name.as_str()));
        for (index, arg) in self.args.iter().enumerate() {
            argv.set_element(&(index + 1).to_string(), Value::from(arg.as_str()));
        }
        env.global_mut(&names.argc)
            .set_value(Value::from(self.args.len() + 1));

        let environ = env.global_mut(&names.environ);
        if self.environment {
            for (key, value) in std::env::vars() {
                environ.set_element(&key, Value::from(value));
            }
        }

        for (name, value) in &self.assignments {
            env.global_mut(&Name::new(name))
                .set_value(Value::from(unescape_string(value)));
        }

        let print_handler = self.print_handler.unwrap_or_else(stdout_handler);
        let stdin = self
            .stdin_text
            .map(|text| RecordReader::new(Cursor::new(text.into_bytes())));

        tracing::debug!(
            args = self.args.len(),
            functions = self.program.functions.len(),
            "interpreter built"
        );

        Interpreter {
            program: self.program,
            env,
            stack: ExecuteStack::default(),
            flag: Flag::None,
            record: Record::new(),
            regexes: RegexCache::new(),
            streams: Streams::new(print_handler),
            input: MainInput::new(stdin),
            ranges: vec![false; self.program.ranges],
            rng: StdRng::seed_from_u64(0),
            seed: Value::integer(0),
            exit_status: 0,
            names,
            diagnostics: Vec::new(),
            echo_errors: self.echo_errors,
        }
    }
}
