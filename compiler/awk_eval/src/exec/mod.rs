//! Evaluation of the program representation.
//!
//! - `expr`: flat expressions on the execute stack
//! - `action`: statements, statement lists and the control-flow flag
//! - `control`: loops
//! - `call`: user-defined function calls
//! - `pattern`: pattern matching, including range state
//! - `getline`: the `getline` forms

mod action;
mod call;
mod control;
mod expr;
mod getline;
mod pattern;
