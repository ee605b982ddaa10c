//! Value model for awki.
//!
//! - `Value`: the canonical-string scalar with numeric/boolean readings
//! - `number`: lexical number rules and canonical number text
//! - `Flag`: the single pending control-flow signal
//! - `EvalError`/`EvalErrorKind`: locally-recovered runtime errors

mod errors;
pub mod number;
mod value;

pub use errors::{
    break_outside_loop, continue_outside_loop, division_by_zero, field_index_too_large,
    invalid_arg_count,
    invalid_regex, io_error, lhs_not_a_variable, malformed_expression, negative_field_index,
    not_a_variable, too_many_args, unknown_function, EvalError, EvalErrorKind, Flag,
};
pub use value::{Number, Value};
