//! Arithmetic and comparison on values.
//!
//! Integer-like operands use checked `i64` arithmetic and fall back to
//! `f64` on overflow; a real-like operand on either side makes the whole
//! operation `f64`; operands that are neither yield `"0"`.

use std::cmp::Ordering;

use awk_ir::Op;
use awk_value::{division_by_zero, EvalError, Number, Value};

/// Result of a binary arithmetic operator.
pub type ArithResult = Result<Value, EvalError>;

#[derive(Clone, Copy)]
enum Kind {
    Integer(i64, i64),
    Real(f64, f64),
    Neither,
}

#[expect(
    clippy::cast_precision_loss,
    reason = "mixing with a real already means f64 precision"
)]
fn classify(left: &Value, right: &Value) -> Kind {
    match (left.as_number(), right.as_number()) {
        (Some(Number::Integer(a)), Some(Number::Integer(b))) => Kind::Integer(a, b),
        (None, None) => Kind::Neither,
        (a, b) => {
            let real = |n: Option<Number>| match n {
                Some(Number::Integer(i)) => i as f64,
                Some(Number::Real(r)) => r,
                None => 0.0,
            };
            Kind::Real(real(a), real(b))
        }
    }
}

/// Apply `+ - * / % ^` (or the operator behind a compound assignment).
#[expect(
    clippy::cast_precision_loss,
    reason = "integer overflow falls back to f64"
)]
pub fn arithmetic(op: Op, left: &Value, right: &Value) -> ArithResult {
    let kind = classify(left, right);
    let value = match (op, kind) {
        (_, Kind::Neither) => Value::integer(0),

        (Op::Add | Op::AddAssign, Kind::Integer(a, b)) => {
            a.checked_add(b).map_or_else(|| Value::real(a as f64 + b as f64), Value::integer)
        }
        (Op::Add | Op::AddAssign, Kind::Real(a, b)) => Value::real(a + b),

        (Op::Sub | Op::SubAssign, Kind::Integer(a, b)) => {
            a.checked_sub(b).map_or_else(|| Value::real(a as f64 - b as f64), Value::integer)
        }
        (Op::Sub | Op::SubAssign, Kind::Real(a, b)) => Value::real(a - b),

        (Op::Mul | Op::MulAssign, Kind::Integer(a, b)) => {
            a.checked_mul(b).map_or_else(|| Value::real(a as f64 * b as f64), Value::integer)
        }
        (Op::Mul | Op::MulAssign, Kind::Real(a, b)) => Value::real(a * b),

        (Op::Div | Op::DivAssign, Kind::Integer(a, b)) => divide(a as f64, b as f64)?,
        (Op::Div | Op::DivAssign, Kind::Real(a, b)) => divide(a, b)?,

        (Op::Mod | Op::ModAssign, Kind::Integer(a, b)) => {
            if b == 0 {
                return Err(division_by_zero());
            }
            a.checked_rem(b)
                .map_or_else(|| Value::real(a as f64 % b as f64), Value::integer)
        }
        (Op::Mod | Op::ModAssign, Kind::Real(a, b)) => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Value::real(a % b)
        }

        (Op::Pow | Op::PowAssign, Kind::Integer(a, b)) => integer_power(a, b),
        (Op::Pow | Op::PowAssign, Kind::Real(a, b)) => Value::real(a.powf(b)),

        _ => Value::integer(0),
    };
    Ok(value)
}

fn divide(a: f64, b: f64) -> ArithResult {
    if b == 0.0 {
        return Err(division_by_zero());
    }
    Ok(Value::real(a / b))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "negative or huge exponents take the f64 path"
)]
fn integer_power(base: i64, exponent: i64) -> Value {
    if let Some(power) = u32::try_from(exponent)
        .ok()
        .and_then(|exp| base.checked_pow(exp))
    {
        return Value::integer(power);
    }
    Value::real((base as f64).powf(exponent as f64))
}

/// Unary `-`.
#[expect(
    clippy::cast_precision_loss,
    reason = "negating i64::MIN falls back to f64"
)]
pub fn negate(value: &Value) -> Value {
    match value.as_number() {
        Some(Number::Integer(i)) => i
            .checked_neg()
            .map_or_else(|| Value::real(-(i as f64)), Value::integer),
        Some(Number::Real(r)) => Value::real(-r),
        None => Value::integer(0),
    }
}

/// Unary `+`: the numeric reading.
pub fn numeric(value: &Value) -> Value {
    match value.as_number() {
        Some(Number::Integer(i)) => Value::integer(i),
        Some(Number::Real(r)) => Value::real(r),
        None => Value::integer(0),
    }
}

/// `value + delta` for `++`/`--`.
pub fn step(value: &Value, delta: i64) -> Value {
    // `Add` never fails.
    arithmetic(Op::Add, &numeric(value), &Value::integer(delta)).unwrap_or_default()
}

/// Relational operators.
pub fn compare(op: Op, left: &Value, right: &Value) -> Value {
    let ordering = left.compare(right);
    let result = match op {
        Op::Less => ordering == Ordering::Less,
        Op::LessEq => ordering != Ordering::Greater,
        Op::Equal => ordering == Ordering::Equal,
        Op::NotEqual => ordering != Ordering::Equal,
        Op::GreaterEq => ordering != Ordering::Less,
        Op::Greater => ordering == Ordering::Greater,
        _ => false,
    };
    Value::boolean(result)
}

/// The arithmetic operator a compound assignment applies.
pub fn compound_base(op: Op) -> Option<Op> {
    match op {
        Op::AddAssign => Some(Op::Add),
        Op::SubAssign => Some(Op::Sub),
        Op::MulAssign => Some(Op::Mul),
        Op::DivAssign => Some(Op::Div),
        Op::ModAssign => Some(Op::Mod),
        Op::PowAssign => Some(Op::Pow),
        _ => None,
    }
}
