//! awk_eval - stack-machine interpreter for awki programs.
//!
//! # Architecture
//!
//! - `Interpreter`: the explicit context every evaluation step receives
//! - `Environment`: globals plus a stack of function-call blocks
//! - `ExecuteStack`: one sub-stack per expression being reduced; flat
//!   expressions are reduced by operator precedence as terms arrive
//! - `exec`: expressions, statements, loops, calls, patterns, getline
//! - `builtins`: the builtin function library
//! - `record`: `$0` and its fields
//! - `io`: output and input streams keyed by name
//! - `format`: the `printf` formatter
//! - `driver`: `BEGIN`, the main input loop and `END`
//!
//! Runtime errors never abort a run. They are reported through
//! [`Interpreter::report`] and evaluation continues with a default value.

mod builtins;
mod driver;
mod environment;
mod exec;
pub mod format;
pub mod interpreter;
pub mod io;
mod operand;
pub mod operators;
mod print_handler;
pub mod record;
mod regex_cache;
mod stack_machine;

pub use environment::{ActionBlock, Elements, Environment, LocalScope, Scope, Variable};
pub use format::sprintf;
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use io::{InputKind, IoError, RecordReader, Streams};
pub use operand::{Operand, Place};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use regex_cache::RegexCache;

#[cfg(test)]
mod tests;
