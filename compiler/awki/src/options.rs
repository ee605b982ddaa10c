//! Command-line option parsing.
//!
//! ```text
//! awki [-F fs] [-v var=value]... [--debug] 'program' [operand...]
//! awki [-F fs] [-v var=value]... [--debug] -f progfile [-f progfile]... [operand...]
//! ```
//!
//! Option values may be attached (`-F:`) or separate (`-F :`). Parsing stops
//! at the first argument that is not an option, or after `--`.

use thiserror::Error;

pub const USAGE: &str = "\
usage: awki [-F fs] [-v var=value] [--debug] 'program' [file ...]
       awki [-F fs] [-v var=value] [--debug] -f progfile [file ...]";

/// Where the program text comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgramSource {
    Text(String),
    Files(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub field_separator: Option<String>,
    pub assignments: Vec<(String, String)>,
    pub program: ProgramSource,
    pub operands: Vec<String>,
    /// Dump the parsed program and trace execution to stderr.
    pub debug: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("option `{0}` requires an argument")]
    MissingValue(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("`{0}` is not a valid assignment (expected var=value)")]
    InvalidAssignment(String),
    #[error("no program text given")]
    MissingProgram,
}

/// Parse the arguments that follow the executable name.
pub fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let mut field_separator = None;
    let mut assignments = Vec::new();
    let mut program_files = Vec::new();
    let mut debug = false;

    let mut rest = args.iter();
    let mut positional = Vec::new();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--" => break,
            "--help" | "-h" => return Ok(Command::Help),
            "--version" => return Ok(Command::Version),
            "--debug" => debug = true,
            "-" => {
                positional.push(arg.clone());
                break;
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                let (name, attached) = flag.split_at(2);
                let value = |rest: &mut std::slice::Iter<'_, String>| {
                    if attached.is_empty() {
                        rest.next()
                            .cloned()
                            .ok_or_else(|| UsageError::MissingValue(name.to_string()))
                    } else {
                        Ok(attached.to_string())
                    }
                };
                match name {
                    "-F" => field_separator = Some(separator_option(&value(&mut rest)?)),
                    "-v" => {
                        let text = value(&mut rest)?;
                        let (var, val) = split_assignment(&text)
                            .ok_or_else(|| UsageError::InvalidAssignment(text.clone()))?;
                        assignments.push((var.to_string(), val.to_string()));
                    }
                    "-f" => program_files.push(value(&mut rest)?),
                    _ => return Err(UsageError::UnknownOption(flag.to_string())),
                }
            }
            _ => {
                positional.push(arg.clone());
                break;
            }
        }
    }
    positional.extend(rest.cloned());

    let mut positional = positional.into_iter();
    let program = if program_files.is_empty() {
        ProgramSource::Text(positional.next().ok_or(UsageError::MissingProgram)?)
    } else {
        ProgramSource::Files(program_files)
    };

    Ok(Command::Run(Options {
        field_separator,
        assignments,
        program,
        operands: positional.collect(),
        debug,
    }))
}

/// `-F t` means a tab, as does a literal `\t`.
fn separator_option(value: &str) -> String {
    match value {
        "t" | "\\t" => "\t".to_string(),
        other => other.to_string(),
    }
}

fn split_assignment(text: &str) -> Option<(&str, &str)> {
    let (name, value) = text.split_once('=')?;
    let mut chars = name.chars();
    let head = chars.next()?;
    let valid = (head.is_ascii_alphabetic() || head == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some((name, value))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn options(list: &[&str]) -> Options {
        match parse_args(&args(list)).unwrap() {
            Command::Run(options) => options,
            other => panic!("expected a run, got {other:?}"),
        }
    }

    #[test]
    fn program_text_and_operands() {
        let parsed = options(&["{ print }", "a.txt", "x=1"]);
        assert_eq!(parsed.program, ProgramSource::Text("{ print }".into()));
        assert_eq!(parsed.operands, ["a.txt", "x=1"]);
        assert_eq!(parsed.field_separator, None);
        assert!(!parsed.debug);
    }

    #[test]
    fn attached_and_separate_values() {
        let parsed = options(&["-F:", "-v", "n=3", "-vname=awk", "--debug", "1"]);
        assert_eq!(parsed.field_separator.as_deref(), Some(":"));
        assert_eq!(
            parsed.assignments,
            [("n".to_string(), "3".to_string()), ("name".to_string(), "awk".to_string())]
        );
        assert!(parsed.debug);
        assert_eq!(parsed.program, ProgramSource::Text("1".into()));
    }

    #[test]
    fn tab_separator() {
        assert_eq!(options(&["-F", "t", "1"]).field_separator.as_deref(), Some("\t"));
        assert_eq!(options(&["-F\\t", "1"]).field_separator.as_deref(), Some("\t"));
    }

    #[test]
    fn program_files_leave_all_positionals_as_operands() {
        let parsed = options(&["-f", "a.awk", "-fb.awk", "in.txt"]);
        assert_eq!(
            parsed.program,
            ProgramSource::Files(vec!["a.awk".into(), "b.awk".into()])
        );
        assert_eq!(parsed.operands, ["in.txt"]);
    }

    #[test]
    fn options_stop_at_the_program() {
        let parsed = options(&["--", "-v", "file"]);
        assert_eq!(parsed.program, ProgramSource::Text("-v".into()));
        assert_eq!(parsed.operands, ["file"]);

        let parsed = options(&["{ print }", "-F", "x"]);
        assert_eq!(parsed.operands, ["-F", "x"]);
    }

    #[test]
    fn usage_errors() {
        assert_eq!(parse_args(&args(&[])), Err(UsageError::MissingProgram));
        assert_eq!(
            parse_args(&args(&["-F"])),
            Err(UsageError::MissingValue("-F".into()))
        );
        assert_eq!(
            parse_args(&args(&["-q", "1"])),
            Err(UsageError::UnknownOption("-q".into()))
        );
        assert_eq!(
            parse_args(&args(&["-v", "1x=2", "1"])),
            Err(UsageError::InvalidAssignment("1x=2".into()))
        );
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse_args(&args(&["--help"])), Ok(Command::Help));
        assert_eq!(parse_args(&args(&["-v", "a=1", "--version"])), Ok(Command::Version));
    }
}
