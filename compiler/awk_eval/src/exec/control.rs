//! Loops.
//!
//! Loop bodies are `Iteration` lists: an absorbed `break` ends the loop, an
//! absorbed `continue` moves on to the next pass, and any flag still set
//! afterwards (`next`, `return`, `exit`) ends the loop with the flag intact.

use awk_ir::{ActionList, Expr, Name};
use awk_value::{Flag, Value};

use crate::{Interpreter, Place};

impl<'p> Interpreter<'p> {
    /// One pass of a loop body; false when the loop has to end.
    fn run_pass(&mut self, body: &'p ActionList) -> bool {
        let absorbed = self.exec_list(body);
        absorbed != Flag::Break && !self.flag.is_set()
    }

    fn loop_condition(&mut self, cond: &'p Expr) -> bool {
        self.eval(cond).to_bool() && !self.flag.is_set()
    }

    pub(crate) fn exec_while(&mut self, cond: &'p Expr, body: &'p ActionList) {
        while self.loop_condition(cond) {
            if !self.run_pass(body) {
                return;
            }
        }
    }

    pub(crate) fn exec_do_while(&mut self, body: &'p ActionList, cond: &'p Expr) {
        while self.run_pass(body) {
            if !self.loop_condition(cond) {
                return;
            }
        }
    }

    pub(crate) fn exec_for(
        &mut self,
        init: Option<&'p Expr>,
        cond: Option<&'p Expr>,
        step: Option<&'p Expr>,
        body: &'p ActionList,
    ) {
        if let Some(init) = init {
            self.eval_operand(init);
        }
        loop {
            if let Some(cond) = cond {
                if !self.loop_condition(cond) {
                    return;
                }
            }
            if !self.run_pass(body) {
                return;
            }
            if let Some(step) = step {
                self.eval_operand(step);
            }
        }
    }

    /// Iterate a snapshot of `array`'s keys, in key order.
    pub(crate) fn exec_for_in(&mut self, var: &'p Name, array: &'p Name, body: &'p ActionList) {
        let keys = self
            .env
            .lookup(array)
            .map(crate::Variable::element_keys)
            .unwrap_or_default();
        tracing::trace!(%array, keys = keys.len(), "for-in");
        let place = Place::Scalar(var.clone());
        for key in keys {
            self.assign(&place, Value::from(key));
            if !self.run_pass(body) {
                return;
            }
        }
    }
}
