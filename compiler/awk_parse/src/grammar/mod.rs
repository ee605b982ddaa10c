//! Grammar productions.

mod expr;
mod item;
mod stmt;
