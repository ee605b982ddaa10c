//! awki - command-line driver.
//!
//! Parses the command line, loads and parses the program, then hands it to
//! the interpreter. The process exit status is the program's `exit` status,
//! or 2 for usage, program-loading and syntax errors.

mod options;
mod reporting;

use std::io::{self, IsTerminal};
use std::sync::Once;

use awk_eval::InterpreterBuilder;
use thiserror::Error;

pub use options::{parse_args, Command, Options, ProgramSource, UsageError, USAGE};
pub use reporting::render_parse_error;

/// Exit status for errors detected before the program runs.
pub const EXIT_USAGE: i32 = 2;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing.
///
/// Without `debug`, a subscriber is only installed when `RUST_LOG` is set
/// (for example `RUST_LOG=awk_eval=trace`). With `debug`, spans are drawn
/// as a tree at debug level unless `RUST_LOG` says otherwise. Output goes
/// to stderr. Safe to call multiple times.
pub fn init_tracing(debug: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if debug {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
            let _ = tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .try_init();
        } else if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .try_init();
        }
    });
}

#[derive(Debug, Error)]
#[error("can't open program file `{path}`: {source}")]
pub struct ProgramLoadError {
    path: String,
    source: io::Error,
}

/// Program text plus the name it is reported under.
fn load_program(program: &ProgramSource) -> Result<(String, String), ProgramLoadError> {
    match program {
        ProgramSource::Text(text) => Ok(("<program>".to_string(), text.clone())),
        ProgramSource::Files(paths) => {
            let mut parts = Vec::with_capacity(paths.len());
            for path in paths {
                let text = std::fs::read_to_string(path).map_err(|source| ProgramLoadError {
                    path: path.clone(),
                    source,
                })?;
                parts.push(text);
            }
            let name = match paths.as_slice() {
                [only] => only.clone(),
                _ => "<program>".to_string(),
            };
            Ok((name, parts.join("\n")))
        }
    }
}

/// Run a parsed command line and return the exit status.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run(options: &Options) -> i32 {
    let (name, source) = match load_program(&options.program) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("awki: {err}");
            return EXIT_USAGE;
        }
    };

    let program = match awk_parse::parse(&source) {
        Ok(program) => program,
        Err(err) => {
            tracing::debug!(error = %err, "parse failed");
            let color = io::stderr().is_terminal();
            eprint!("{}", render_parse_error(&name, &source, &err, color));
            return EXIT_USAGE;
        }
    };

    if options.debug {
        eprintln!("{program}");
    }

    let mut builder = InterpreterBuilder::new(&program)
        .program_name("awki")
        .args(options.operands.iter().cloned());
    if let Some(fs) = &options.field_separator {
        builder = builder.field_separator(fs.clone());
    }
    for (name, value) in &options.assignments {
        builder = builder.assign(name.clone(), value.clone());
    }
    let mut interpreter = builder.build();
    interpreter.run()
}

/// Entry point for the binary: `args` excludes the executable name.
pub fn main_with_args(args: &[String]) -> i32 {
    match parse_args(args) {
        Ok(Command::Help) => {
            println!("{USAGE}");
            0
        }
        Ok(Command::Version) => {
            println!("awki {}", env!("CARGO_PKG_VERSION"));
            0
        }
        Ok(Command::Run(options)) => {
            init_tracing(options.debug);
            run(&options)
        }
        Err(err) => {
            eprintln!("awki: {err}");
            eprintln!("{USAGE}");
            EXIT_USAGE
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn program_files_are_joined() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.awk");
        let second = dir.path().join("b.awk");
        std::fs::write(&first, "BEGIN { x = 1 }").unwrap();
        std::fs::write(&second, "END { print x }").unwrap();
        let paths = vec![first.display().to_string(), second.display().to_string()];

        let (name, source) = load_program(&ProgramSource::Files(paths)).unwrap();
        assert_eq!(name, "<program>");
        assert_eq!(source, "BEGIN { x = 1 }\nEND { print x }");
    }

    #[test]
    fn single_program_file_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prog.awk").display().to_string();
        std::fs::write(&path, "1").unwrap();
        let (name, _) = load_program(&ProgramSource::Files(vec![path.clone()])).unwrap();
        assert_eq!(name, path);
    }

    #[test]
    fn missing_program_file() {
        let err = load_program(&ProgramSource::Files(vec!["/nonexistent/awki.awk".into()]))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/awki.awk"));
    }

    #[test]
    fn usage_errors_exit_with_two() {
        assert_eq!(main_with_args(&["-q".to_string()]), EXIT_USAGE);
        assert_eq!(main_with_args(&[]), EXIT_USAGE);
    }
}
