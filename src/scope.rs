//! Runtime scope chain.
//!
//! Each `Scope` is one link: a flat map of bindings plus an optional
//! pointer to its parent. Function closures simply hold onto the `Scope`
//! that was active at their declaration site, keeping it alive via `Rc`
//! for as long as the function value itself is alive.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::value::Value;

pub type ScopeRef = Rc<RefCell<Scope>>;

pub struct Scope {
    bindings: HashMap<String, Option<Value>>,
    parent: Option<ScopeRef>,
}

impl Scope {
    pub fn new_global() -> ScopeRef {
        Rc::new(RefCell::new(Scope {
            bindings: HashMap::new(),
            parent: None,
        }))
    }

    pub fn nested(parent: &ScopeRef) -> ScopeRef {
        Rc::new(RefCell::new(Scope {
            bindings: HashMap::new(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    /// Binds `name` in this scope. `None` represents `var x;` with no
    /// initializer — reading it back before an assignment is a runtime
    /// error, it is not implicitly `null`.
    pub fn define(&mut self, name: impl Into<String>, value: Option<Value>) {
        self.bindings.insert(name.into(), value);
    }

    fn ancestor(this: &ScopeRef, depth: usize) -> ScopeRef {
        let mut scope = Rc::clone(this);
        for _ in 0..depth {
            let parent = scope
                .borrow()
                .parent
                .clone()
                .expect("resolver-computed scope depth exceeds the live scope chain");
            scope = parent;
        }
        scope
    }

    /// Reads a variable known to live exactly `depth` scopes out, per the
    /// resolver's side table.
    pub fn get_at(this: &ScopeRef, depth: usize, name: &str, line: usize) -> Result<Value, RuntimeError> {
        let target = Self::ancestor(this, depth);
        let scope = target.borrow();
        match scope.bindings.get(name) {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(RuntimeError::new(line, format!("Variable '{name}' used before being initialized."))),
            None => Err(RuntimeError::new(line, format!("Undefined variable '{name}'."))),
        }
    }

    /// Falls back to a name-based search up the whole chain, for globals
    /// and other bindings the resolver left unresolved (depth `None`).
    pub fn get_global(this: &ScopeRef, name: &str, line: usize) -> Result<Value, RuntimeError> {
        let mut scope = Some(Rc::clone(this));
        while let Some(current) = scope {
            let borrowed = current.borrow();
            match borrowed.bindings.get(name) {
                Some(Some(value)) => return Ok(value.clone()),
                Some(None) => {
                    return Err(RuntimeError::new(line, format!("Variable '{name}' used before being initialized.")))
                }
                None => {
                    let parent = borrowed.parent.clone();
                    drop(borrowed);
                    scope = parent;
                }
            }
        }
        Err(RuntimeError::new(line, format!("Undefined variable '{name}'.")))
    }

    pub fn assign_at(this: &ScopeRef, depth: usize, name: &str, value: Value, line: usize) -> Result<(), RuntimeError> {
        let target = Self::ancestor(this, depth);
        let mut scope = target.borrow_mut();
        if !scope.bindings.contains_key(name) {
            return Err(RuntimeError::new(line, format!("Undefined variable '{name}'.")));
        }
        scope.bindings.insert(name.to_owned(), Some(value));
        Ok(())
    }

    pub fn assign_global(this: &ScopeRef, name: &str, value: Value, line: usize) -> Result<(), RuntimeError> {
        let mut scope = Some(Rc::clone(this));
        while let Some(current) = scope {
            let mut borrowed = current.borrow_mut();
            if borrowed.bindings.contains_key(name) {
                borrowed.bindings.insert(name.to_owned(), Some(value));
                return Ok(());
            }
            let parent = borrowed.parent.clone();
            drop(borrowed);
            scope = parent;
        }
        Err(RuntimeError::new(line, format!("Undefined variable '{name}'.")))
    }

    /// Looks up an existing binding by name without going through the
    /// resolver's side table, used when merging function overloads
    /// declared under the same name in the same scope.
    pub fn get_own(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).and_then(|v| v.clone())
    }
}
