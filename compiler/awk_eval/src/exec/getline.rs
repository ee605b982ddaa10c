//! `getline` in its six forms.
//!
//! | form                 | sets         | advances   |
//! |----------------------|--------------|------------|
//! | `getline`            | `$0`, `NF`   | `NR` `FNR` |
//! | `getline var`        | `var`        | `NR` `FNR` |
//! | `getline < file`     | `$0`, `NF`   |            |
//! | `getline var < file` | `var`        |            |
//! | `cmd \| getline`     | `$0`, `NF`   | `NR`       |
//! | `cmd \| getline var` | `var`        | `NR`       |

use awk_ir::{Expr, Getline, GetlineSource, LValue, Name};
use awk_value::Value;

use crate::io::InputKind;
use crate::operators::step;
use crate::{Interpreter, Place};

enum Fetched {
    Record(String),
    End,
    Failed,
}

impl<'p> Interpreter<'p> {
    /// Run a `getline` term: `1` on a record, `0` at end of input, `-1` on
    /// failure.
    pub(crate) fn getline(&mut self, getline: &'p Getline) -> Value {
        let fetched = match &getline.source {
            GetlineSource::Main => match self.next_main_record() {
                Some(record) => Fetched::Record(record),
                None => Fetched::End,
            },
            GetlineSource::File(name) => self.fetch(InputKind::File, name),
            GetlineSource::Command(command) => {
                let fetched = self.fetch(InputKind::Command, command);
                if matches!(fetched, Fetched::Record(_)) {
                    let nr = self.names.nr.clone();
                    self.advance_counter(&nr);
                }
                fetched
            }
        };
        let record = match fetched {
            Fetched::Record(record) => record,
            Fetched::End => return Value::integer(0),
            Fetched::Failed => return Value::integer(-1),
        };
        match &getline.target {
            Some(target) => {
                let place = self.resolve_lvalue(target);
                self.assign(&place, Value::from(record));
            }
            None => self.set_record(record),
        }
        Value::integer(1)
    }

    fn fetch(&mut self, kind: InputKind, source: &'p Expr) -> Fetched {
        let name = self.eval(source).into_string();
        let rs = self.env.value_of(&self.names.rs);
        match self.streams.read_record(kind, &name, rs.as_str()) {
            Ok(Some(record)) => Fetched::Record(record),
            Ok(None) => Fetched::End,
            Err(err) => {
                self.report(err.into());
                Fetched::Failed
            }
        }
    }

    /// Add one to the counter variable `name`.
    pub(crate) fn advance_counter(&mut self, name: &Name) {
        let variable = self.env.lookup_or_create(name);
        let next = step(variable.value(), 1);
        variable.set_value(next);
    }

    pub(crate) fn resolve_lvalue(&mut self, target: &'p LValue) -> Place {
        match target {
            LValue::Var(name) => Place::Scalar(name.clone()),
            LValue::Element { name, subscript } => {
                Place::Element(name.clone(), self.subscript_key(subscript))
            }
            LValue::Field(index) => {
                let index = self.eval(index);
                Place::Field(self.field_index(&index))
            }
        }
    }
}
