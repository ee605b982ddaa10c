//! RAII guard for function-call blocks.
//!
//! [`ScopedInterpreter`] pushes an [`ActionBlock`] on creation and pops it
//! on drop, so a block never outlives its call, even during unwinding. The
//! guard derefs to the interpreter, so the body runs through it unchanged.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::ActionBlock;

pub struct ScopedInterpreter<'guard, 'p> {
    interpreter: &'guard mut Interpreter<'p>,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_block();
    }
}

impl<'p> Deref for ScopedInterpreter<'_, 'p> {
    type Target = Interpreter<'p>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'p> Interpreter<'p> {
    /// Make `block` the innermost scope until the guard drops.
    pub fn scoped(&mut self, block: ActionBlock) -> ScopedInterpreter<'_, 'p> {
        self.env.push_block(block);
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` with `block` as the innermost scope.
    pub fn with_block<T, F>(&mut self, block: ActionBlock, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'p>) -> T,
    {
        let mut scoped = self.scoped(block);
        f(&mut scoped)
    }
}

#[cfg(test)]
mod tests {
    use awk_ir::{Name, Program};
    use awk_value::Value;

    use crate::{InterpreterBuilder, Variable};

    use super::*;

    #[test]
    fn block_is_popped_after_closure() {
        let program = Program::new();
        let mut interp = InterpreterBuilder::new(&program).build();
        let mut block = ActionBlock::new();
        block.define(Variable::with_value(Name::new("p"), Value::from("1")));

        let seen = interp.with_block(block, |scoped| {
            assert_eq!(scoped.env.depth(), 1);
            scoped.var("p")
        });
        assert_eq!(seen.as_str(), "1");
        assert_eq!(interp.env.depth(), 0);
        assert_eq!(interp.var("p").as_str(), "");
    }

    #[test]
    fn block_is_popped_on_panic() {
        let program = Program::new();
        let mut interp = InterpreterBuilder::new(&program).build();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scoped = interp.scoped(ActionBlock::new());
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(interp.env.depth(), 0);
    }
}
