//! Runtime value representation.

mod overloads;

pub use overloads::{Callable, FunctionValue, NativeValue, Overloads};

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;

pub type ArrayRef = Rc<RefCell<Vec<Value>>>;
pub type MapRef = Rc<RefCell<IndexMap<Value, Value>>>;
pub type CallableRef = Rc<RefCell<Overloads>>;

/// A value that can flow through the interpreter.
///
/// `Array`, `Map`, and `Callable` are reference types: cloning a `Value`
/// that holds one of these bumps a reference count rather than copying
/// the underlying data, so two variables bound to the same array see
/// each other's mutations, matching the aliasing model of the language
/// this was ported from.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    Array(ArrayRef),
    Map(MapRef),
    Callable(CallableRef),
}

impl Value {
    /// `null`, `false`, and the integer `0` are falsy; everything else,
    /// including the float `0.0`, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(0) => false,
            _ => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Callable(_) => "function",
        }
    }

    pub fn new_array(elements: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(elements)))
    }

    pub fn new_map(entries: IndexMap<Value, Value>) -> Value {
        Value::Map(Rc::new(RefCell::new(entries)))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Value::Callable(overloads) => write!(f, "<fn {}>", overloads.borrow().name()),
        }
    }
}

/// Structural equality for scalars and strings, reference identity for
/// the three reference types. Used both for Rust-level map keying and
/// as the backbone of the language's `==` operator — the evaluator
/// layers numeric int/double promotion on top of this for `==`/`!=`,
/// since that promotion would otherwise break the reflexivity `Hash`
/// requires of `Eq`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Callable(a), Value::Callable(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Double(d) => d.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
            Value::Array(a) => (Rc::as_ptr(a) as usize).hash(state),
            Value::Map(m) => (Rc::as_ptr(m) as usize).hash(state),
            Value::Callable(c) => (Rc::as_ptr(c) as usize).hash(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_and_double_do_not_compare_equal_as_rust_values() {
        // The `==` operator promotes across the two at the language
        // level; Value's PartialEq deliberately doesn't, since it also
        // backs Hash.
        assert_ne!(Value::Int(1), Value::Double(1.0));
    }

    #[test]
    fn arrays_compare_by_identity_not_contents() {
        let a = Value::new_array(vec![Value::Int(1)]);
        let b = Value::new_array(vec![Value::Int(1)]);
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn truthiness_matches_the_documented_rules() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::Double(0.0).is_truthy());
        assert!(Value::Str(String::new()).is_truthy());
    }
}
