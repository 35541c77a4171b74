//! Native functions bound into the global scope before a program runs.
//!
//! `print` and `println` are the only built-ins the language strictly
//! needs; `type`, `length`, `push`, `pop`, and `keys` round out the
//! composite value types (`Array`/`Map`) with the handful of operations
//! a program can't otherwise express without them.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::scope::ScopeRef;
use crate::value::{Callable, NativeValue, Overloads, Value};

fn native(name: &str, min_arity: usize, variadic: bool, func: impl Fn(&[Value], usize) -> Result<Value, RuntimeError> + 'static) -> Value {
    let mut overloads = Overloads::new(name);
    overloads.insert(Callable::Native(NativeValue {
        name: name.to_owned(),
        min_arity,
        variadic,
        func: Rc::new(func),
    }));
    Value::Callable(Rc::new(RefCell::new(overloads)))
}

/// Installs every native function as a global binding.
pub fn install(globals: &ScopeRef) {
    let mut scope = globals.borrow_mut();

    scope.define("print", Some(native("print", 0, true, |args, _line| {
        for arg in args {
            print!("{arg}");
        }
        Ok(Value::Null)
    })));

    scope.define("println", Some(native("println", 0, true, |args, _line| {
        for arg in args {
            print!("{arg}");
        }
        println!();
        Ok(Value::Null)
    })));

    scope.define("length", Some(native("length", 1, false, |args, line| {
        match &args[0] {
            Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
            Value::Array(items) => Ok(Value::Int(items.borrow().len() as i64)),
            Value::Map(entries) => Ok(Value::Int(entries.borrow().len() as i64)),
            other => Err(RuntimeError::new(
                line,
                format!("length() expects a string, array, or map, got {}.", other.type_name()),
            )),
        }
    })));

    scope.define("type", Some(native("type", 1, false, |args, _line| {
        Ok(Value::Str(args[0].type_name().to_owned()))
    })));

    scope.define("push", Some(native("push", 2, false, |args, line| {
        match &args[0] {
            Value::Array(items) => {
                items.borrow_mut().push(args[1].clone());
                Ok(Value::Int(items.borrow().len() as i64))
            }
            other => Err(RuntimeError::new(line, format!("push() expects an array, got {}.", other.type_name()))),
        }
    })));

    scope.define("pop", Some(native("pop", 1, false, |args, line| {
        match &args[0] {
            Value::Array(items) => items
                .borrow_mut()
                .pop()
                .ok_or_else(|| RuntimeError::new(line, "pop() called on an empty array.")),
            other => Err(RuntimeError::new(line, format!("pop() expects an array, got {}.", other.type_name()))),
        }
    })));

    scope.define("keys", Some(native("keys", 1, false, |args, line| {
        match &args[0] {
            Value::Map(entries) => Ok(Value::new_array(entries.borrow().keys().cloned().collect())),
            other => Err(RuntimeError::new(line, format!("keys() expects a map, got {}.", other.type_name()))),
        }
    })));
}
