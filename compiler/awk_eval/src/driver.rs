//! Running a whole program: `BEGIN`, the main input, `END`.
//!
//! The main input is the `ARGV` operands in order, read lazily one record
//! at a time so that `BEGIN` may still rewrite `ARGV`/`ARGC` and operands
//! of the form `var=value` take effect between files. With no file
//! operands, standard input is read instead.

use std::fs::File;
use std::io::BufReader;

use smallvec::SmallVec;

use awk_ir::PatternAction;
use awk_lexer::unescape_string;
use awk_value::{Flag, Value};

use crate::io::{IoError, RecordReader};
use crate::Interpreter;

/// Progress through the main input.
pub(crate) struct MainInput {
    current: Option<RecordReader>,
    /// Stands in for the process's stdin when set.
    stdin: Option<RecordReader>,
    next_arg: usize,
    used_operand: bool,
    exhausted: bool,
}

impl MainInput {
    pub(crate) fn new(stdin: Option<RecordReader>) -> Self {
        MainInput {
            current: None,
            stdin,
            next_arg: 1,
            used_operand: false,
            exhausted: false,
        }
    }

    fn take_stdin(&mut self) -> RecordReader {
        self.stdin.take().unwrap_or_else(RecordReader::stdin)
    }
}

impl<'p> Interpreter<'p> {
    /// Run the program to completion and return its exit status.
    ///
    /// `exit` in `BEGIN` or in a main action skips to `END`; `exit` in
    /// `END` stops there.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self) -> i32 {
        let program = self.program;
        self.run_items(program.begin_items());
        if self.flag != Flag::Exit && program.reads_input() {
            self.process_input();
        }
        self.clear_flag();
        self.run_items(program.end_items());
        self.clear_flag();

        for err in self.streams.close_all() {
            self.report(err.into());
        }
        tracing::debug!(status = self.exit_status, "finished");
        self.exit_status
    }

    fn run_items(&mut self, items: impl Iterator<Item = &'p PatternAction>) {
        for item in items {
            self.exec_list(&item.actions);
            if self.flag == Flag::Exit {
                return;
            }
        }
    }

    fn process_input(&mut self) {
        let items: SmallVec<[&'p PatternAction; 8]> = self.program.main_items().collect();
        while let Some(record) = self.next_main_record() {
            self.set_record(record);
            for item in items.iter().copied() {
                let selected = self.pattern_matches(&item.pattern);
                match self.flag {
                    Flag::Exit => return,
                    Flag::Next => {
                        self.clear_flag();
                        break;
                    }
                    _ => {}
                }
                if !selected {
                    continue;
                }
                let absorbed = self.exec_list(&item.actions);
                if self.flag == Flag::Exit {
                    return;
                }
                if absorbed == Flag::Next {
                    break;
                }
            }
        }
    }

    /// Next record of the main input, advancing `NR` and `FNR`.
    pub(crate) fn next_main_record(&mut self) -> Option<String> {
        loop {
            if self.input.current.is_none() && !self.open_next_input() {
                return None;
            }
            let rs = self.env.value_of(&self.names.rs);
            let reader = self.input.current.as_mut()?;
            match reader.read_record(rs.as_str()) {
                Ok(Some(record)) => {
                    let (nr, fnr) = (self.names.nr.clone(), self.names.fnr.clone());
                    self.advance_counter(&nr);
                    self.advance_counter(&fnr);
                    return Some(record);
                }
                Ok(None) => self.input.current = None,
                Err(source) => {
                    self.input.current = None;
                    let name = self.env.value_of(&self.names.filename).into_string();
                    self.report(IoError::Read { name, source }.into());
                    self.exit_status = 2;
                }
            }
        }
    }

    /// Open the next `ARGV` operand, applying assignment operands on the
    /// way. Falls back to stdin once if no operand named a file.
    fn open_next_input(&mut self) -> bool {
        if self.input.exhausted {
            return false;
        }
        let argc = self.env.value_of(&self.names.argc).to_integer();
        while i64::try_from(self.input.next_arg).is_ok_and(|index| index < argc) {
            let key = self.input.next_arg.to_string();
            self.input.next_arg += 1;
            let Some(operand) = self.element(&self.names.argv, &key) else {
                continue;
            };
            let operand = operand.into_string();
            if operand.is_empty() {
                continue;
            }
            if let Some((name, value)) = operand_assignment(&operand) {
                self.set_var(name, Value::from(unescape_string(value)));
                continue;
            }

            self.input.used_operand = true;
            if operand == "-" || operand == "/dev/stdin" {
                let reader = self.input.take_stdin();
                self.start_input(reader, operand);
                return true;
            }
            match File::open(&operand) {
                Ok(file) => {
                    self.start_input(RecordReader::new(BufReader::new(file)), operand);
                    return true;
                }
                Err(source) => {
                    self.report(
                        IoError::Open {
                            name: operand,
                            source,
                        }
                        .into(),
                    );
                    self.exit_status = 2;
                }
            }
        }

        self.input.exhausted = true;
        if self.input.used_operand {
            return false;
        }
        self.input.used_operand = true;
        let reader = self.input.take_stdin();
        self.start_input(reader, String::new());
        true
    }

    fn start_input(&mut self, reader: RecordReader, name: String) {
        tracing::debug!(file = %name, "next input");
        self.input.current = Some(reader);
        let (filename, fnr) = (self.names.filename.clone(), self.names.fnr.clone());
        self.env.lookup_or_create(&filename).set_value(Value::from(name));
        self.env.lookup_or_create(&fnr).set_value(Value::integer(0));
    }
}

/// Split a `name=value` operand whose left side is an identifier.
fn operand_assignment(operand: &str) -> Option<(&str, &str)> {
    let (name, value) = operand.split_once('=')?;
    let mut chars = name.chars();
    let head = chars.next()?;
    let is_identifier = (head.is_ascii_alphabetic() || head == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_identifier.then_some((name, value))
}
