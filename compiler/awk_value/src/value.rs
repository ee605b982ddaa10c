//! The dynamically-typed scalar.
//!
//! A `Value` is one canonical string. Whether it behaves as a number, a
//! boolean or text is decided from its lexical form every time it is asked,
//! which is what gives the language its "numeric string" semantics.

use std::cmp::Ordering;
use std::fmt;

use crate::number::{format_number, parse_integer, parse_real};

/// Numeric reading of a value, used by arithmetic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

/// A dynamically-typed scalar with a canonical string form.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Value {
    text: String,
}

impl Value {
    /// The empty string.
    pub fn empty() -> Self {
        Value::default()
    }

    /// Build from a number, storing its canonical text.
    pub fn real(number: f64) -> Self {
        Value {
            text: format_number(number),
        }
    }

    pub fn integer(number: i64) -> Self {
        Value {
            text: number.to_string(),
        }
    }

    /// `"1"` for true, `"0"` for false.
    pub fn boolean(flag: bool) -> Self {
        Value::from(if flag { "1" } else { "0" })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Looks like a decimal real (integers included).
    pub fn is_real(&self) -> bool {
        parse_real(&self.text).is_some()
    }

    /// Looks like an optionally signed run of digits.
    pub fn is_integer(&self) -> bool {
        parse_integer(&self.text).is_some()
    }

    /// Exactly `"0"` or `"1"`.
    pub fn is_bool(&self) -> bool {
        self.text == "0" || self.text == "1"
    }

    /// Real reading: the real if real-like, else the integer, else `0.0`.
    #[expect(
        clippy::cast_precision_loss,
        reason = "integers beyond 2^53 already lose precision as reals"
    )]
    pub fn to_real(&self) -> f64 {
        if let Some(real) = parse_real(&self.text) {
            real
        } else if let Some(integer) = parse_integer(&self.text) {
            integer as f64
        } else {
            0.0
        }
    }

    /// Integer reading: the integer if integer-like, else the truncated
    /// real, else `0`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "truncation toward zero is the conversion rule; `as` saturates"
    )]
    pub fn to_integer(&self) -> i64 {
        if let Some(integer) = parse_integer(&self.text) {
            integer
        } else if let Some(real) = parse_real(&self.text) {
            real as i64
        } else {
            0
        }
    }

    /// True unless the value is `""` or `"0"`.
    pub fn to_bool(&self) -> bool {
        !self.text.is_empty() && self.text != "0"
    }

    /// Integer when integer-like, real when real-like, `None` otherwise.
    pub fn as_number(&self) -> Option<Number> {
        if let Some(integer) = parse_integer(&self.text) {
            Some(Number::Integer(integer))
        } else {
            parse_real(&self.text).map(Number::Real)
        }
    }

    /// Replace this value with a copy of `other`.
    pub fn set(&mut self, other: &Value) {
        self.text.clone_from(&other.text);
    }

    /// Three-way comparison.
    ///
    /// Priority: real against real-or-integer compares as `f64`; two
    /// integers compare as `i64`; two boolean-likes compare as booleans;
    /// anything else compares bytewise as strings.
    pub fn compare(&self, other: &Value) -> Ordering {
        let (left_real, left_int) = (self.is_real(), self.is_integer());
        let (right_real, right_int) = (other.is_real(), other.is_integer());

        if (left_real && (right_real || right_int)) || (right_real && (left_real || left_int)) {
            return self
                .to_real()
                .partial_cmp(&other.to_real())
                .unwrap_or(Ordering::Equal);
        }
        if left_int && right_int {
            return self.to_integer().cmp(&other.to_integer());
        }
        if self.is_bool() && other.is_bool() {
            return self.to_bool().cmp(&other.to_bool());
        }
        self.text.as_bytes().cmp(other.text.as_bytes())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value {
            text: text.to_string(),
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value { text }
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::real(number)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::integer(number)
    }
}

impl From<usize> for Value {
    fn from(number: usize) -> Self {
        Value {
            text: number.to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::boolean(flag)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.text)
    }
}
