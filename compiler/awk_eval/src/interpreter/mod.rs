//! The interpreter context.
//!
//! Everything a running program can observe lives in one [`Interpreter`]
//! value: variables, the current record, the pending control-flow flag,
//! open streams and the execute stack. Evaluation code is split across
//! `crate::exec` (expressions, actions, patterns, calls, getline),
//! `crate::builtins` and `crate::driver`; they all extend this type.

mod builder;
mod scope_guard;
mod special_names;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use rand::rngs::StdRng;

use awk_ir::{Name, Program};
use awk_value::{field_index_too_large, EvalError, Flag, Value};

use crate::driver::MainInput;
use crate::record::{simple_separator, FieldSeparator, Record, MAX_FIELDS};
use crate::stack_machine::ExecuteStack;
use crate::{Environment, Place, RegexCache, Streams};
use special_names::SpecialNames;

pub struct Interpreter<'p> {
    pub(crate) program: &'p Program,
    pub(crate) env: Environment,
    pub(crate) stack: ExecuteStack<'p>,
    pub(crate) flag: Flag,
    pub(crate) record: Record,
    pub(crate) regexes: RegexCache,
    pub(crate) streams: Streams,
    pub(crate) input: MainInput,
    /// Active flag per range pattern, indexed by range id.
    pub(crate) ranges: Vec<bool>,
    pub(crate) rng: StdRng,
    /// Seed given to the last `srand`.
    pub(crate) seed: Value,
    pub(crate) exit_status: i32,
    pub(crate) names: SpecialNames,
    diagnostics: Vec<EvalError>,
    echo_errors: bool,
}

impl<'p> Interpreter<'p> {
    pub fn program(&self) -> &'p Program {
        self.program
    }

    #[inline]
    pub fn flag(&self) -> Flag {
        self.flag
    }

    /// Replace the pending flag.
    #[inline]
    pub fn set_flag(&mut self, flag: Flag) {
        self.flag = flag;
    }

    #[inline]
    pub fn clear_flag(&mut self) {
        self.flag = Flag::None;
    }

    pub fn exit_status(&self) -> i32 {
        self.exit_status
    }

    /// Report a runtime error and keep going.
    #[cold]
    pub fn report(&mut self, err: EvalError) {
        tracing::warn!(error = %err, "runtime error");
        if self.echo_errors {
            eprintln!("awki: {err}");
        }
        self.diagnostics.push(err);
    }

    /// Every error reported so far, oldest first.
    pub fn diagnostics(&self) -> &[EvalError] {
        &self.diagnostics
    }

    /// Scalar value of the visible variable `name`, `""` if there is none.
    pub fn var(&self, name: &str) -> Value {
        self.env.value_of(name)
    }

    /// Assign the visible variable `name`, creating a global if needed.
    pub fn set_var(&mut self, name: &str, value: Value) {
        self.assign(&Place::Scalar(Name::new(name)), value);
    }

    /// `name[key]` without creating it.
    pub fn element(&self, name: &str, key: &str) -> Option<Value> {
        let variable = self.env.lookup(name)?;
        variable
            .has_element(key)
            .then(|| variable.get_element(key))
    }

    pub fn record(&self) -> &str {
        self.record.text()
    }

    /// Replace `$0`, resplitting with the current `FS` and updating `NF`.
    pub fn set_record(&mut self, text: String) {
        let fs = self.env.value_of(&self.names.fs);
        let fields = self.split_text(&text, fs.as_str());
        self.record.replace(text, fields);
        self.sync_field_count();
    }

    pub fn field(&self, index: usize) -> Value {
        Value::from(self.record.field(index))
    }

    /// Assign `$index`; `$0` resplits, any other field rebuilds `$0`.
    ///
    /// An index past [`MAX_FIELDS`] is reported and leaves the record alone.
    pub fn set_field(&mut self, index: usize, value: Value) {
        if index == 0 {
            self.set_record(value.into_string());
            return;
        }
        if index > MAX_FIELDS {
            self.report(field_index_too_large(index));
            return;
        }
        let ofs = self.env.value_of(&self.names.ofs);
        self.record.set_field(index, value.into_string(), ofs.as_str());
        self.sync_field_count();
    }

    fn sync_field_count(&mut self) {
        let count = Value::from(self.record.field_count());
        let nf = self.names.nf.clone();
        self.env.lookup_or_create(&nf).set_value(count);
    }

    pub(crate) fn get_place(&mut self, place: &Place) -> Value {
        match place {
            Place::Scalar(name) => self.env.value_of(name),
            Place::Element(name, key) => self.env.lookup_or_create(name).get_element(key),
            Place::Field(index) => self.field(*index),
        }
    }

    pub(crate) fn assign(&mut self, place: &Place, value: Value) {
        match place {
            Place::Scalar(name) => {
                let count = (*name == self.names.nf).then(|| value.to_integer());
                self.env.lookup_or_create(name).set_value(value);
                if let Some(count) = count {
                    let count = usize::try_from(count).unwrap_or(0);
                    if count > MAX_FIELDS {
                        self.report(field_index_too_large(count));
                    } else {
                        let ofs = self.env.value_of(&self.names.ofs);
                        self.record.set_field_count(count, ofs.as_str());
                    }
                    self.sync_field_count();
                }
            }
            Place::Element(name, key) => self.env.lookup_or_create(name).set_element(key, value),
            Place::Field(index) => self.set_field(*index, value),
        }
    }

    /// Split `text` the way `FS` (or `split`'s separator) `fs` says.
    pub(crate) fn split_text(&mut self, text: &str, fs: &str) -> Vec<String> {
        if let Some(separator) = simple_separator(fs) {
            return separator.split(text);
        }
        match self.regexes.get(fs) {
            Ok(regex) => FieldSeparator::Regex(regex).split(text),
            Err(err) => {
                self.report(err);
                vec![text.to_string()]
            }
        }
    }

    /// Join subscript values with `SUBSEP`.
    pub(crate) fn join_subscript(&self, parts: &[Value]) -> String {
        match parts {
            [single] => single.as_str().to_string(),
            _ => {
                let subsep = self.env.value_of(&self.names.subsep);
                parts
                    .iter()
                    .map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(subsep.as_str())
            }
        }
    }
}
