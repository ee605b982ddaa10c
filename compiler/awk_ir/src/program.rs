//! A parsed program.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{ActionList, Name, PatternAction, Span};

/// A user-defined function.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Name>,
    /// Always a `Routine` list.
    pub body: ActionList,
    pub span: Span,
}

/// Pattern-actions in source order plus the function table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub items: Vec<PatternAction>,
    pub functions: FxHashMap<Name, FunctionDef>,
    /// Number of range patterns; ids run `0..ranges`.
    pub ranges: usize,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    pub fn begin_items(&self) -> impl Iterator<Item = &PatternAction> {
        self.items.iter().filter(|item| item.pattern.is_begin())
    }

    pub fn main_items(&self) -> impl Iterator<Item = &PatternAction> {
        self.items
            .iter()
            .filter(|item| !item.pattern.is_begin() && !item.pattern.is_end())
    }

    pub fn end_items(&self) -> impl Iterator<Item = &PatternAction> {
        self.items.iter().filter(|item| item.pattern.is_end())
    }

    /// Whether any input has to be read.
    pub fn reads_input(&self) -> bool {
        self.items.iter().any(|item| !item.pattern.is_begin())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut functions: Vec<_> = self.functions.values().collect();
        functions.sort_by_key(|function| function.span.start);
        for function in functions {
            writeln!(f, "function {}({})", function.name, function.params.join(", "))?;
            function.body.dump(f, 0)?;
        }
        for item in &self.items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}
