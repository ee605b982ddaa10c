//! Statements and statement lists.

use std::fmt;

use crate::{Expr, Name};

/// How a statement list reacts to a pending control-flow flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// Body of a pattern-action.
    Program,
    /// Body of a user function.
    Routine,
    /// Body of a loop.
    Iteration,
    /// Any other block.
    Simple,
}

/// Output redirection mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RedirectKind {
    /// `>`: truncate on first open.
    Write,
    /// `>>`
    Append,
    /// `|`: pipe into a shell command.
    Pipe,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Redirect {
    pub kind: RedirectKind,
    pub target: Expr,
}

/// A statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Empty `args` prints `$0`.
    Print {
        args: Vec<Expr>,
        output: Option<Redirect>,
    },
    Printf {
        args: Vec<Expr>,
        output: Option<Redirect>,
    },
    Expr(Expr),
    If {
        cond: Expr,
        then: ActionList,
        otherwise: Option<ActionList>,
    },
    While {
        cond: Expr,
        body: ActionList,
    },
    DoWhile {
        body: ActionList,
        cond: Expr,
    },
    For {
        init: Option<Expr>,
        cond: Option<Expr>,
        step: Option<Expr>,
        body: ActionList,
    },
    ForIn {
        var: Name,
        array: Name,
        body: ActionList,
    },
    Block(ActionList),
    Break,
    Continue,
    Next,
    Return(Option<Expr>),
    Exit(Option<Expr>),
    /// `delete name[subscript]`, or the whole array when `subscript` is `None`.
    Delete {
        array: Name,
        subscript: Option<Vec<Expr>>,
    },
}

/// An ordered list of statements.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionList {
    pub kind: ListKind,
    pub actions: Vec<Action>,
}

impl ActionList {
    pub fn new(kind: ListKind) -> Self {
        ActionList {
            kind,
            actions: Vec::new(),
        }
    }

    pub fn with_actions(kind: ListKind, actions: Vec<Action>) -> Self {
        ActionList { kind, actions }
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

// Dumps

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    write!(f, "{:width$}", "", width = depth * 2)
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Expr]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        f.write_str(if i == 0 { " " } else { ", " })?;
        write!(f, "{arg}")?;
    }
    Ok(())
}

fn write_redirect(f: &mut fmt::Formatter<'_>, output: Option<&Redirect>) -> fmt::Result {
    if let Some(redirect) = output {
        let symbol = match redirect.kind {
            RedirectKind::Write => ">",
            RedirectKind::Append => ">>",
            RedirectKind::Pipe => "|",
        };
        write!(f, " {symbol} {}", redirect.target)?;
    }
    Ok(())
}

impl ActionList {
    /// Write the list as an indented block.
    pub fn dump(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        indent(f, depth)?;
        writeln!(f, "{{ # {:?}", self.kind)?;
        for action in &self.actions {
            action.dump(f, depth + 1)?;
        }
        indent(f, depth)?;
        writeln!(f, "}}")
    }
}

impl Action {
    pub fn dump(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        indent(f, depth)?;
        match self {
            Action::Print { args, output } => {
                f.write_str("print")?;
                write_args(f, args)?;
                write_redirect(f, output.as_ref())?;
                writeln!(f)
            }
            Action::Printf { args, output } => {
                f.write_str("printf")?;
                write_args(f, args)?;
                write_redirect(f, output.as_ref())?;
                writeln!(f)
            }
            Action::Expr(expr) => writeln!(f, "{expr}"),
            Action::If {
                cond,
                then,
                otherwise,
            } => {
                writeln!(f, "if {cond}")?;
                then.dump(f, depth)?;
                if let Some(otherwise) = otherwise {
                    indent(f, depth)?;
                    writeln!(f, "else")?;
                    otherwise.dump(f, depth)?;
                }
                Ok(())
            }
            Action::While { cond, body } => {
                writeln!(f, "while {cond}")?;
                body.dump(f, depth)
            }
            Action::DoWhile { body, cond } => {
                writeln!(f, "do")?;
                body.dump(f, depth)?;
                indent(f, depth)?;
                writeln!(f, "while {cond}")
            }
            Action::For {
                init,
                cond,
                step,
                body,
            } => {
                let show = |expr: &Option<Expr>| expr.as_ref().map(ToString::to_string).unwrap_or_default();
                writeln!(f, "for ({}; {}; {})", show(init), show(cond), show(step))?;
                body.dump(f, depth)
            }
            Action::ForIn { var, array, body } => {
                writeln!(f, "for ({var} in {array})")?;
                body.dump(f, depth)
            }
            Action::Block(list) => list.dump(f, depth),
            Action::Break => writeln!(f, "break"),
            Action::Continue => writeln!(f, "continue"),
            Action::Next => writeln!(f, "next"),
            Action::Return(None) => writeln!(f, "return"),
            Action::Return(Some(expr)) => writeln!(f, "return {expr}"),
            Action::Exit(None) => writeln!(f, "exit"),
            Action::Exit(Some(expr)) => writeln!(f, "exit {expr}"),
            Action::Delete { array, subscript } => {
                write!(f, "delete {array}")?;
                if let Some(subscript) = subscript {
                    f.write_str("[")?;
                    for (i, expr) in subscript.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{expr}")?;
                    }
                    f.write_str("]")?;
                }
                writeln!(f)
            }
        }
    }
}

impl fmt::Display for ActionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f, 0)
    }
}
