use std::rc::Rc;

use crate::ast::Function;
use crate::error::RuntimeError;
use crate::scope::ScopeRef;
use crate::value::Value;

/// One user-declared body, paired with the scope it closes over.
#[derive(Clone)]
pub struct FunctionValue {
    pub declaration: Rc<Function>,
    pub closure: ScopeRef,
}

impl FunctionValue {
    pub fn is_variadic(&self) -> bool {
        self.declaration.params.last().is_some_and(|p| p.is_vararg)
    }

    /// The smallest number of arguments a call must supply. Equal to the
    /// parameter count for a fixed-arity function, or one less than it
    /// for a variadic one (the trailing parameter can bind zero values).
    pub fn min_arity(&self) -> usize {
        let n = self.declaration.params.len();
        if self.is_variadic() {
            n - 1
        } else {
            n
        }
    }
}

pub type NativeFn = Rc<dyn Fn(&[Value], usize) -> Result<Value, RuntimeError>>;

/// A built-in implemented in Rust rather than as parsed source.
#[derive(Clone)]
pub struct NativeValue {
    pub name: String,
    pub min_arity: usize,
    pub variadic: bool,
    pub func: NativeFn,
}

#[derive(Clone)]
pub enum Callable {
    User(FunctionValue),
    Native(NativeValue),
}

impl Callable {
    pub fn is_variadic(&self) -> bool {
        match self {
            Callable::User(f) => f.is_variadic(),
            Callable::Native(n) => n.variadic,
        }
    }

    pub fn min_arity(&self) -> usize {
        match self {
            Callable::User(f) => f.min_arity(),
            Callable::Native(n) => n.min_arity,
        }
    }

    /// The parameter count new declarations under the same name are
    /// keyed against when merging into an `Overloads` set.
    fn arity_key(&self) -> usize {
        match self {
            Callable::User(f) => f.declaration.params.len(),
            Callable::Native(n) => n.min_arity,
        }
    }
}

/// The set of bodies declared under one name in one scope, keyed by
/// parameter count. Declaring a second function with a parameter count
/// already in the set replaces that entry; a new parameter count is
/// appended, preserving declaration order for display purposes.
#[derive(Clone, Default)]
pub struct Overloads {
    name: String,
    entries: Vec<Callable>,
}

impl Overloads {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&mut self, callable: Callable) {
        let key = callable.arity_key();
        if let Some(slot) = self.entries.iter_mut().find(|e| e.arity_key() == key) {
            *slot = callable;
        } else {
            self.entries.push(callable);
        }
    }

    /// Picks the overload that accepts `argc` arguments: an exact
    /// fixed-arity match first, falling back to a variadic overload whose
    /// minimum arity `argc` satisfies.
    pub fn resolve(&self, argc: usize) -> Option<&Callable> {
        self.entries
            .iter()
            .find(|e| !e.is_variadic() && e.arity_key() == argc)
            .or_else(|| self.entries.iter().filter(|e| e.is_variadic()).find(|e| argc >= e.min_arity()))
    }

    pub fn arities(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.arity_key()).collect()
    }
}
