//! What sits on the evaluation stack.

use std::fmt;

use awk_ir::{Expr, Name};
use awk_value::Value;

/// An assignable location, resolved when its term is pushed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Place {
    /// A variable's scalar.
    Scalar(Name),
    /// `name[key]` with the subscript already joined by `SUBSEP`.
    Element(Name, String),
    /// `$n`
    Field(usize),
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Scalar(name) => write!(f, "{name}"),
            Place::Element(name, key) => write!(f, "{name}[{key:?}]"),
            Place::Field(index) => write!(f, "${index}"),
        }
    }
}

/// A pending operand.
///
/// Places and groups stay unforced until an operator needs their value,
/// which is what lets `&&`, `||` and `?:` skip work and lets assignments
/// see their target.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand<'p> {
    Value(Value),
    /// Result of a false `?`; `:` replaces it with its right side.
    Null,
    Place(Place),
    /// A nested expression, evaluated at most once when forced.
    Group(&'p Expr),
    /// A regex literal; as a plain value it matches against `$0`.
    Regex(&'p str),
}

impl Operand<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Null)
    }
}

impl From<Value> for Operand<'_> {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}
