//! Statements and statement lists.
//!
//! A statement list checks the pending flag before each statement and once
//! at the end. Depending on its kind it stops, and either absorbs the flag
//! (returning it so the owner can act) or leaves it set for an enclosing
//! list:
//!
//! | kind      | break          | continue       | next         | return       | exit  |
//! |-----------|----------------|----------------|--------------|--------------|-------|
//! | Program   | report, clear  | report, clear  | absorb       | absorb       | leave |
//! | Routine   | report, clear  | report, clear  | leave        | absorb       | leave |
//! | Iteration | absorb         | absorb         | leave        | leave        | leave |
//! | Simple    | leave          | leave          | leave        | leave        | leave |

use smallvec::SmallVec;

use awk_ir::{Action, ActionList, Expr, ListKind, Redirect};
use awk_value::{break_outside_loop, continue_outside_loop, Flag, Value};

use crate::format::sprintf;
use crate::Interpreter;

impl<'p> Interpreter<'p> {
    /// Run `list`. Returns the flag it absorbed, or `Flag::None`.
    pub(crate) fn exec_list(&mut self, list: &'p ActionList) -> Flag {
        for action in &list.actions {
            if self.flag.is_set() {
                return self.settle_flag(list.kind);
            }
            self.exec_action(action);
        }
        if self.flag.is_set() {
            self.settle_flag(list.kind)
        } else {
            Flag::None
        }
    }

    fn settle_flag(&mut self, kind: ListKind) -> Flag {
        let flag = self.flag;
        match (kind, flag) {
            (ListKind::Program | ListKind::Routine, Flag::Break) => {
                self.clear_flag();
                self.report(break_outside_loop());
                Flag::None
            }
            (ListKind::Program | ListKind::Routine, Flag::Continue) => {
                self.clear_flag();
                self.report(continue_outside_loop());
                Flag::None
            }
            (ListKind::Program, Flag::Next | Flag::Return)
            | (ListKind::Routine, Flag::Return)
            | (ListKind::Iteration, Flag::Break | Flag::Continue) => {
                self.clear_flag();
                flag
            }
            _ => Flag::None,
        }
    }

    pub(crate) fn exec_action(&mut self, action: &'p Action) {
        match action {
            Action::Print { args, output } => self.exec_print(args, output.as_ref()),
            Action::Printf { args, output } => self.exec_printf(args, output.as_ref()),
            Action::Expr(expr) => {
                self.eval(expr);
            }
            Action::If {
                cond,
                then,
                otherwise,
            } => {
                if self.eval(cond).to_bool() {
                    self.exec_list(then);
                } else if let Some(otherwise) = otherwise {
                    self.exec_list(otherwise);
                }
            }
            Action::While { cond, body } => self.exec_while(cond, body),
            Action::DoWhile { body, cond } => self.exec_do_while(body, cond),
            Action::For {
                init,
                cond,
                step,
                body,
            } => self.exec_for(init.as_ref(), cond.as_ref(), step.as_ref(), body),
            Action::ForIn { var, array, body } => self.exec_for_in(var, array, body),
            Action::Block(list) => {
                self.exec_list(list);
            }
            Action::Break => self.set_flag(Flag::Break),
            Action::Continue => self.set_flag(Flag::Continue),
            Action::Next => self.set_flag(Flag::Next),
            Action::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval(expr),
                    None => Value::empty(),
                };
                self.env.set_return_value(value);
                self.set_flag(Flag::Return);
            }
            Action::Exit(status) => {
                if let Some(expr) = status {
                    let code = self.eval(expr).to_integer() & 0xff;
                    self.exit_status = i32::try_from(code).unwrap_or_default();
                }
                self.set_flag(Flag::Exit);
            }
            Action::Delete { array, subscript } => match subscript {
                Some(parts) => {
                    let key = self.subscript_key(parts);
                    self.env.lookup_or_create(array).remove_element(&key);
                }
                None => self.env.lookup_or_create(array).clear_elements(),
            },
        }
    }

    fn exec_print(&mut self, args: &'p [Expr], output: Option<&'p Redirect>) {
        let mut text = if args.is_empty() {
            self.record.text().to_string()
        } else {
            let ofs = self.env.value_of(&self.names.ofs);
            let mut text = String::new();
            for (index, arg) in args.iter().enumerate() {
                if index > 0 {
                    text.push_str(ofs.as_str());
                }
                text.push_str(self.eval(arg).as_str());
            }
            text
        };
        text.push_str(self.env.value_of(&self.names.ors).as_str());
        self.write_output(output, &text);
    }

    fn exec_printf(&mut self, args: &'p [Expr], output: Option<&'p Redirect>) {
        let Some((format, rest)) = args.split_first() else {
            return;
        };
        let format = self.eval(format);
        let values: SmallVec<[Value; 8]> = rest.iter().map(|arg| self.eval(arg)).collect();
        let text = sprintf(format.as_str(), &values);
        self.write_output(output, &text);
    }

    fn write_output(&mut self, output: Option<&'p Redirect>, text: &str) {
        let target = output.map(|redirect| (redirect.kind, self.eval(&redirect.target).into_string()));
        let target = target.as_ref().map(|(kind, name)| (*kind, name.as_str()));
        if let Err(err) = self.streams.write(target, text) {
            self.report(err.into());
        }
    }
}
