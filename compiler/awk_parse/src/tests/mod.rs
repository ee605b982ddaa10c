//! Parser tests.
//!
//! - `expr_tests`: flat term lists, laziness of `&&`/`||`/`?:`, getline forms
//! - `item_tests`: patterns, pattern-actions, functions, statements, errors

mod item_tests;
