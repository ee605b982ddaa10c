//! Redirected output and secondary input.
//!
//! Streams are opened on first use and stay open, keyed by the file name or
//! command text, until `close` or the end of the run. Commands run under
//! `sh -c`.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};

use rustc_hash::FxHashMap;

use awk_ir::RedirectKind;
use awk_value::{io_error, EvalError};

use crate::SharedPrintHandler;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("can't open `{name}`: {source}")]
    Open {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("can't run `{name}`: {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("error writing `{name}`: {source}")]
    Write {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("error reading `{name}`: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl IoError {
    /// File name or command the failure concerns.
    pub fn name(&self) -> &str {
        match self {
            IoError::Open { name, .. }
            | IoError::Spawn { name, .. }
            | IoError::Write { name, .. }
            | IoError::Read { name, .. } => name,
        }
    }
}

impl From<IoError> for EvalError {
    fn from(err: IoError) -> Self {
        let reason = match &err {
            IoError::Open { source, .. }
            | IoError::Spawn { source, .. }
            | IoError::Write { source, .. }
            | IoError::Read { source, .. } => source.to_string(),
        };
        io_error(err.name(), reason)
    }
}

/// Splits a byte stream into records according to `RS`.
pub struct RecordReader {
    reader: Box<dyn BufRead>,
}

impl RecordReader {
    pub fn new(reader: impl BufRead + 'static) -> Self {
        RecordReader {
            reader: Box::new(reader),
        }
    }

    pub fn stdin() -> Self {
        RecordReader::new(io::stdin().lock())
    }

    /// Next record, without its terminator. `rs` is `"\n"`, any other
    /// literal separator, or `""` for blank-line-separated paragraphs.
    pub fn read_record(&mut self, rs: &str) -> io::Result<Option<String>> {
        let Some((&last, _)) = rs.as_bytes().split_last() else {
            return self.read_paragraph();
        };
        let separator = rs.as_bytes();
        let mut buf = Vec::new();
        loop {
            let read = self.reader.read_until(last, &mut buf)?;
            if read == 0 {
                return Ok((!buf.is_empty()).then(|| lossy(buf)));
            }
            if buf.ends_with(separator) {
                buf.truncate(buf.len() - separator.len());
                return Ok(Some(lossy(buf)));
            }
            if buf.last() != Some(&last) {
                return Ok(Some(lossy(buf)));
            }
        }
    }

    fn read_paragraph(&mut self) -> io::Result<Option<String>> {
        let mut lines: Vec<String> = Vec::new();
        let mut line = Vec::new();
        loop {
            line.clear();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            if line.is_empty() {
                if lines.is_empty() {
                    continue;
                }
                break;
            }
            lines.push(lossy(line.clone()));
        }
        Ok((!lines.is_empty()).then(|| lines.join("\n")))
    }
}

fn lossy(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

fn exit_code(status: ExitStatus) -> i64 {
    status.code().map_or(-1, i64::from)
}

enum Output {
    File(BufWriter<File>),
    Pipe {
        child: Child,
        stdin: Option<BufWriter<ChildStdin>>,
    },
    Stderr,
}

impl Output {
    fn writer(&mut self) -> Option<&mut dyn Write> {
        match self {
            Output::File(file) => Some(file as &mut dyn Write),
            Output::Pipe { stdin, .. } => stdin.as_mut().map(|s| s as &mut dyn Write),
            Output::Stderr => None,
        }
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        match self.writer() {
            Some(writer) => writer.write_all(text.as_bytes()),
            None => io::stderr().lock().write_all(text.as_bytes()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer() {
            Some(writer) => writer.flush(),
            None => io::stderr().lock().flush(),
        }
    }

    fn close(self) -> io::Result<i64> {
        match self {
            Output::File(mut file) => file.flush().map(|()| 0),
            Output::Pipe { mut child, stdin } => {
                if let Some(mut stdin) = stdin {
                    stdin.flush()?;
                }
                child.wait().map(exit_code)
            }
            Output::Stderr => io::stderr().lock().flush().map(|()| 0),
        }
    }
}

enum Input {
    File(RecordReader),
    Command { child: Child, reader: RecordReader },
}

impl Input {
    fn reader(&mut self) -> &mut RecordReader {
        match self {
            Input::File(reader) | Input::Command { reader, .. } => reader,
        }
    }

    fn close(self) -> io::Result<i64> {
        match self {
            Input::File(_) => Ok(0),
            Input::Command { mut child, reader } => {
                drop(reader);
                child.wait().map(exit_code)
            }
        }
    }
}

/// Where a secondary `getline` reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    File,
    Command,
}

/// Open output and input streams plus standard output.
pub struct Streams {
    stdout: SharedPrintHandler,
    outputs: FxHashMap<String, Output>,
    inputs: FxHashMap<String, Input>,
}

impl Streams {
    pub fn new(stdout: SharedPrintHandler) -> Self {
        Streams {
            stdout,
            outputs: FxHashMap::default(),
            inputs: FxHashMap::default(),
        }
    }

    pub fn stdout(&self) -> &SharedPrintHandler {
        &self.stdout
    }

    /// Write to standard output, or to `target` opened as `kind`.
    pub fn write(&mut self, target: Option<(RedirectKind, &str)>, text: &str) -> Result<(), IoError> {
        let Some((kind, name)) = target else {
            return self.write_stdout(text);
        };
        if kind != RedirectKind::Pipe && (name == "-" || name == "/dev/stdout") {
            return self.write_stdout(text);
        }
        if !self.outputs.contains_key(name) {
            let output = self.open_output(kind, name)?;
            self.outputs.insert(name.to_string(), output);
        }
        let Some(output) = self.outputs.get_mut(name) else {
            return Ok(());
        };
        output.write(text).map_err(|source| IoError::Write {
            name: name.to_string(),
            source,
        })
    }

    fn write_stdout(&self, text: &str) -> Result<(), IoError> {
        self.stdout.print(text).map_err(|source| IoError::Write {
            name: "/dev/stdout".to_string(),
            source,
        })
    }

    fn open_output(&mut self, kind: RedirectKind, name: &str) -> Result<Output, IoError> {
        tracing::debug!(name, ?kind, "open output");
        let open_err = |source| IoError::Open {
            name: name.to_string(),
            source,
        };
        match kind {
            _ if kind != RedirectKind::Pipe && name == "/dev/stderr" => Ok(Output::Stderr),
            RedirectKind::Write => File::create(name)
                .map(|file| Output::File(BufWriter::new(file)))
                .map_err(open_err),
            RedirectKind::Append => OpenOptions::new()
                .create(true)
                .append(true)
                .open(name)
                .map(|file| Output::File(BufWriter::new(file)))
                .map_err(open_err),
            RedirectKind::Pipe => {
                self.flush_all();
                let mut child = shell(name)
                    .stdin(Stdio::piped())
                    .spawn()
                    .map_err(|source| IoError::Spawn {
                        name: name.to_string(),
                        source,
                    })?;
                let stdin = child.stdin.take().map(BufWriter::new);
                Ok(Output::Pipe { child, stdin })
            }
        }
    }

    /// Next record from the file or command `name`, opening it on first use.
    pub fn read_record(&mut self, kind: InputKind, name: &str, rs: &str) -> Result<Option<String>, IoError> {
        if !self.inputs.contains_key(name) {
            let input = self.open_input(kind, name)?;
            self.inputs.insert(name.to_string(), input);
        }
        let Some(input) = self.inputs.get_mut(name) else {
            return Ok(None);
        };
        input
            .reader()
            .read_record(rs)
            .map_err(|source| IoError::Read {
                name: name.to_string(),
                source,
            })
    }

    fn open_input(&mut self, kind: InputKind, name: &str) -> Result<Input, IoError> {
        tracing::debug!(name, ?kind, "open input");
        match kind {
            InputKind::File if name == "-" || name == "/dev/stdin" => {
                Ok(Input::File(RecordReader::stdin()))
            }
            InputKind::File => File::open(name)
                .map(|file| Input::File(RecordReader::new(BufReader::new(file))))
                .map_err(|source| IoError::Open {
                    name: name.to_string(),
                    source,
                }),
            InputKind::Command => {
                self.flush_all();
                let spawn_err = |source| IoError::Spawn {
                    name: name.to_string(),
                    source,
                };
                let mut child = shell(name).stdout(Stdio::piped()).spawn().map_err(spawn_err)?;
                let Some(stdout) = child.stdout.take() else {
                    return Err(spawn_err(io::Error::other("no stdout pipe")));
                };
                Ok(Input::Command {
                    child,
                    reader: RecordReader::new(BufReader::new(stdout)),
                })
            }
        }
    }

    /// Close every stream named `name`. Returns the last exit status, or
    /// `-1` when nothing by that name was open.
    pub fn close(&mut self, name: &str) -> Result<i64, IoError> {
        let mut status = None;
        let to_io = |source| IoError::Write {
            name: name.to_string(),
            source,
        };
        if let Some(output) = self.outputs.remove(name) {
            status = Some(output.close().map_err(to_io)?);
        }
        if let Some(input) = self.inputs.remove(name) {
            status = Some(input.close().map_err(to_io)?);
        }
        Ok(status.unwrap_or(-1))
    }

    /// Flush one output stream, or all of them and stdout.
    pub fn flush(&mut self, name: Option<&str>) -> Result<(), IoError> {
        let Some(name) = name else {
            self.flush_all();
            return Ok(());
        };
        let Some(output) = self.outputs.get_mut(name) else {
            return Ok(());
        };
        output.flush().map_err(|source| IoError::Write {
            name: name.to_string(),
            source,
        })
    }

    /// Best-effort flush before handing a terminal or file to a child.
    fn flush_all(&mut self) {
        // Failures resurface on the next write or on close.
        let _ = self.stdout.flush();
        for output in self.outputs.values_mut() {
            let _ = output.flush();
        }
    }

    /// Run `command` to completion; its exit status, or `-1`.
    pub fn system(&mut self, command: &str) -> Result<i64, IoError> {
        self.flush_all();
        shell(command)
            .status()
            .map(exit_code)
            .map_err(|source| IoError::Spawn {
                name: command.to_string(),
                source,
            })
    }

    /// Close everything, collecting failures.
    pub fn close_all(&mut self) -> Vec<IoError> {
        let mut names: Vec<String> = self.outputs.keys().cloned().collect();
        names.extend(self.inputs.keys().cloned());
        let mut errors: Vec<IoError> = names
            .into_iter()
            .filter_map(|name| self.close(&name).err())
            .collect();
        if let Err(source) = self.stdout.flush() {
            errors.push(IoError::Write {
                name: "/dev/stdout".to_string(),
                source,
            });
        }
        errors
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::buffer_handler;

    fn records(text: &str, rs: &str) -> Vec<String> {
        let mut reader = RecordReader::new(Cursor::new(text.as_bytes().to_vec()));
        let mut out = Vec::new();
        while let Some(record) = reader.read_record(rs).unwrap() {
            out.push(record);
        }
        out
    }

    #[test]
    fn newline_records() {
        assert_eq!(records("a\nb\n", "\n"), vec!["a", "b"]);
        assert_eq!(records("a\nb", "\n"), vec!["a", "b"]);
        assert_eq!(records("\n\n", "\n"), vec!["", ""]);
        assert!(records("", "\n").is_empty());
    }

    #[test]
    fn single_character_separator() {
        assert_eq!(records("a;b;c\n", ";"), vec!["a", "b", "c\n"]);
    }

    #[test]
    fn multibyte_separator() {
        assert_eq!(records("xéyéz", "é"), vec!["x", "y", "z"]);
    }

    #[test]
    fn paragraph_mode() {
        let text = "\n\na b\nc\n\n\nd\n";
        assert_eq!(records(text, ""), vec!["a b\nc", "d"]);
    }

    #[test]
    fn stdout_redirects_go_to_handler() {
        let handler = buffer_handler();
        let mut streams = Streams::new(handler.clone());
        streams.write(None, "one\n").unwrap();
        streams.write(Some((RedirectKind::Write, "-")), "two\n").unwrap();
        streams
            .write(Some((RedirectKind::Append, "/dev/stdout")), "three\n")
            .unwrap();
        assert_eq!(handler.get_output(), "one\ntwo\nthree\n");
    }

    #[test]
    fn file_write_append_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let name = path.to_str().unwrap();

        let mut streams = Streams::new(buffer_handler());
        streams.write(Some((RedirectKind::Write, name)), "a\n").unwrap();
        streams.write(Some((RedirectKind::Write, name)), "b\n").unwrap();
        assert_eq!(streams.close(name).unwrap(), 0);
        streams.write(Some((RedirectKind::Append, name)), "c\n").unwrap();
        streams.close(name).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\nc\n");

        let first = streams.read_record(InputKind::File, name, "\n").unwrap();
        assert_eq!(first.as_deref(), Some("a"));
        streams.close(name).unwrap();
        let again = streams.read_record(InputKind::File, name, "\n").unwrap();
        assert_eq!(again.as_deref(), Some("a"));
    }

    #[test]
    fn closing_nothing_is_minus_one() {
        let mut streams = Streams::new(buffer_handler());
        assert_eq!(streams.close("never-opened").unwrap(), -1);
    }

    #[test]
    fn missing_file_fails_to_open() {
        let mut streams = Streams::new(buffer_handler());
        let err = streams
            .read_record(InputKind::File, "/nonexistent/awki/input", "\n")
            .unwrap_err();
        assert!(matches!(err, IoError::Open { .. }));
        let eval: EvalError = err.into();
        assert!(eval.message.starts_with("/nonexistent/awki/input:"));
    }

    #[cfg(unix)]
    #[test]
    fn command_input_and_status() {
        let mut streams = Streams::new(buffer_handler());
        let line = streams
            .read_record(InputKind::Command, "echo hi; exit 3", "\n")
            .unwrap();
        assert_eq!(line.as_deref(), Some("hi"));
        assert_eq!(streams.close("echo hi; exit 3").unwrap(), 3);
        assert_eq!(streams.system("exit 5").unwrap(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn pipe_output_reaches_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sorted.txt");
        let command = format!("sort > '{}'", path.display());

        let mut streams = Streams::new(buffer_handler());
        streams.write(Some((RedirectKind::Pipe, command.as_str())), "b\na\n").unwrap();
        assert_eq!(streams.close(&command).unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\n");
    }
}
