//! Variables and their scopes.
//!
//! Every variable is a scalar and an associative array at once. Globals live
//! in one scope; each active user-function call pushes an [`ActionBlock`]
//! holding its parameters. Lookup walks the blocks innermost first, then
//! the globals.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use awk_ir::Name;
use awk_value::Value;

/// Single-threaded shared, mutable storage.
///
/// Array arguments are passed by reference: the callee's parameter and the
/// caller's variable hold clones of the same `LocalScope`.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

/// Array elements, iterated in key order.
pub type Elements = BTreeMap<String, Value>;

/// A named scalar plus its element map.
#[derive(Clone, Debug)]
pub struct Variable {
    name: Name,
    value: Value,
    elements: LocalScope<Elements>,
}

impl Variable {
    pub fn new(name: Name) -> Self {
        Variable::with_value(name, Value::empty())
    }

    pub fn with_value(name: Name, value: Value) -> Self {
        Variable {
            name,
            value,
            elements: LocalScope::default(),
        }
    }

    /// A variable whose elements alias `elements`.
    pub fn sharing(name: Name, value: Value, elements: LocalScope<Elements>) -> Self {
        Variable {
            name,
            value,
            elements,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Handle to the element map, for aliasing.
    pub fn elements(&self) -> LocalScope<Elements> {
        self.elements.clone()
    }

    /// Read an element, creating it as `""` if absent.
    pub fn get_element(&self, key: &str) -> Value {
        self.elements
            .borrow_mut()
            .entry(key.to_string())
            .or_default()
            .clone()
    }

    pub fn set_element(&self, key: &str, value: Value) {
        self.elements.borrow_mut().insert(key.to_string(), value);
    }

    pub fn has_element(&self, key: &str) -> bool {
        self.elements.borrow().contains_key(key)
    }

    pub fn remove_element(&self, key: &str) {
        self.elements.borrow_mut().remove(key);
    }

    pub fn clear_elements(&self) {
        self.elements.borrow_mut().clear();
    }

    /// Snapshot of the keys, so the map can change during iteration.
    pub fn element_keys(&self) -> Vec<String> {
        self.elements.borrow().keys().cloned().collect()
    }

    pub fn element_count(&self) -> usize {
        self.elements.borrow().len()
    }
}

/// A name-to-variable map.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    variables: FxHashMap<Name, Variable>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.get_mut(name)
    }

    /// Insert, replacing any variable of the same name.
    pub fn define(&mut self, variable: Variable) {
        self.variables.insert(variable.name.clone(), variable);
    }

    /// Get `name`, creating an empty variable if absent.
    pub fn get_or_create(&mut self, name: &Name) -> &mut Variable {
        self.variables
            .entry(name.clone())
            .or_insert_with(|| Variable::new(name.clone()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }
}

/// Locals and return slot of one active function call.
#[derive(Clone, Debug, Default)]
pub struct ActionBlock {
    locals: Scope,
    return_value: Value,
}

impl ActionBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, variable: Variable) {
        self.locals.define(variable);
    }

    pub fn return_value(&self) -> &Value {
        &self.return_value
    }
}

#[derive(Clone, Copy)]
enum Location {
    Block(usize),
    Global,
}

/// Globals, the stack of active blocks, and the top-level return slot.
#[derive(Debug, Default)]
pub struct Environment {
    globals: Scope,
    blocks: Vec<ActionBlock>,
    return_value: Value,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    fn locate(&self, name: &str) -> Option<Location> {
        self.blocks
            .iter()
            .rposition(|block| block.locals.contains(name))
            .map(Location::Block)
            .or_else(|| self.globals.contains(name).then_some(Location::Global))
    }

    /// Innermost visible variable named `name`.
    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        match self.locate(name)? {
            Location::Block(index) => self.blocks[index].locals.get(name),
            Location::Global => self.globals.get(name),
        }
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Variable> {
        match self.locate(name)? {
            Location::Block(index) => self.blocks[index].locals.get_mut(name),
            Location::Global => self.globals.get_mut(name),
        }
    }

    /// Innermost visible variable named `name`; a name nobody declared is
    /// created as a global.
    pub fn lookup_or_create(&mut self, name: &Name) -> &mut Variable {
        match self.locate(name) {
            Some(Location::Block(index)) => self.blocks[index].locals.get_or_create(name),
            Some(Location::Global) | None => self.globals.get_or_create(name),
        }
    }

    /// Scalar value of `name`, `""` when it does not exist. Never creates.
    pub fn value_of(&self, name: &str) -> Value {
        self.lookup(name)
            .map(|variable| variable.value().clone())
            .unwrap_or_default()
    }

    pub fn global_mut(&mut self, name: &Name) -> &mut Variable {
        self.globals.get_or_create(name)
    }

    pub fn set_global(&mut self, name: &str, value: Value) {
        self.globals.get_or_create(&Name::new(name)).set_value(value);
    }

    pub fn push_block(&mut self, block: ActionBlock) {
        self.blocks.push(block);
    }

    pub fn pop_block(&mut self) -> Option<ActionBlock> {
        self.blocks.pop()
    }

    /// Number of active function calls.
    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    /// Store into the innermost block's slot, or the top-level one.
    pub fn set_return_value(&mut self, value: Value) {
        match self.blocks.last_mut() {
            Some(block) => block.return_value = value,
            None => self.return_value = value,
        }
    }

    pub fn return_value(&self) -> &Value {
        self.blocks
            .last()
            .map_or(&self.return_value, ActionBlock::return_value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn name(text: &str) -> Name {
        Name::new(text)
    }

    #[test]
    fn missing_element_is_created_on_read() {
        let variable = Variable::new(name("a"));
        assert!(!variable.has_element("k"));
        assert_eq!(variable.get_element("k"), Value::empty());
        assert!(variable.has_element("k"));
        assert_eq!(variable.element_count(), 1);
    }

    #[test]
    fn keys_come_back_sorted() {
        let variable = Variable::new(name("a"));
        for key in ["b", "a", "c"] {
            variable.set_element(key, Value::from(key));
        }
        variable.remove_element("b");
        assert_eq!(variable.element_keys(), vec!["a", "c"]);
        variable.clear_elements();
        assert_eq!(variable.element_count(), 0);
    }

    #[test]
    fn sharing_aliases_elements() {
        let caller = Variable::new(name("arr"));
        let param = Variable::sharing(name("a"), Value::empty(), caller.elements());
        param.set_element("x", Value::from("1"));
        assert_eq!(caller.get_element("x"), Value::from("1"));
        assert!(param.elements().ptr_eq(&caller.elements()));
    }

    #[test]
    fn blocks_shadow_globals() {
        let mut env = Environment::new();
        env.set_global("x", Value::from("global"));

        let mut block = ActionBlock::new();
        block.define(Variable::with_value(name("x"), Value::from("local")));
        env.push_block(block);
        assert_eq!(env.value_of("x"), Value::from("local"));

        env.lookup_or_create(&name("y")).set_value(Value::from("new"));
        env.pop_block();

        assert_eq!(env.value_of("x"), Value::from("global"));
        assert_eq!(env.value_of("y"), Value::from("new"));
    }

    #[test]
    fn suspended_blocks_stay_visible() {
        let mut env = Environment::new();
        let mut outer = ActionBlock::new();
        outer.define(Variable::with_value(name("p"), Value::from("outer")));
        env.push_block(outer);
        env.push_block(ActionBlock::new());
        assert_eq!(env.value_of("p"), Value::from("outer"));
        assert_eq!(env.depth(), 2);
    }

    #[test]
    fn return_slot_follows_innermost_block() {
        let mut env = Environment::new();
        env.set_return_value(Value::from("top"));
        env.push_block(ActionBlock::new());
        env.set_return_value(Value::from("inner"));
        assert_eq!(env.return_value(), &Value::from("inner"));
        env.pop_block();
        assert_eq!(env.return_value(), &Value::from("top"));
    }

    #[test]
    fn value_of_does_not_create() {
        let env = Environment::new();
        assert_eq!(env.value_of("nothing"), Value::empty());
        assert!(env.lookup("nothing").is_none());
    }
}
