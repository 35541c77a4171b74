//! Tree-walking evaluator.
//!
//! Executes the AST directly against a chain of `Scope`s. Variable reads
//! and writes that the resolver managed to pin down take the fast path
//! through `Scope::get_at`/`assign_at` (a fixed number of hops up the
//! chain); anything the resolver left unresolved — globals declared
//! after the reference that reads them, for instance — falls back to a
//! name search from the current scope outward.

mod flow;

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;

pub use flow::Flow;

use crate::ast::{Binary, Expr, NodeId, Stmt, Unary};
use crate::builtins;
use crate::error::RuntimeError;
use crate::lexer::{Token, TokenKind};
use crate::scope::{Scope, ScopeRef};
use crate::value::{Callable, FunctionValue, Overloads, Value};

pub struct Interpreter {
    globals: ScopeRef,
    depths: HashMap<NodeId, usize>,
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Scope::new_global();
        builtins::install(&globals);
        Self {
            globals,
            depths: HashMap::new(),
        }
    }

    /// Runs one program's statements against this interpreter's global
    /// scope, so that a REPL session can keep accumulating bindings
    /// across successive calls.
    pub fn run(&mut self, statements: &[Stmt], depths: HashMap<NodeId, usize>) -> Result<(), RuntimeError> {
        self.depths = depths;
        let globals = Rc::clone(&self.globals);
        for stmt in statements {
            self.exec_stmt(stmt, &globals)?;
        }
        Ok(())
    }

    fn exec_block_in(&self, statements: &[Stmt], scope: &ScopeRef) -> Result<Flow, RuntimeError> {
        for stmt in statements {
            match self.exec_stmt(stmt, scope)? {
                Flow::Normal => {}
                ret @ Flow::Return(_) => return Ok(ret),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&self, stmt: &Stmt, scope: &ScopeRef) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::Expr(expr) => {
                self.eval_expr(expr, scope)?;
                Ok(Flow::Normal)
            }
            Stmt::VarDecl(decl) => {
                let value = match &decl.initializer {
                    Some(init) => Some(self.eval_expr(init, scope)?),
                    None => None,
                };
                scope.borrow_mut().define(decl.name.lexeme.clone(), value);
                Ok(Flow::Normal)
            }
            Stmt::Block(block) => {
                let nested = Scope::nested(scope);
                self.exec_block_in(&block.statements, &nested)
            }
            Stmt::If(stmt) => {
                if self.eval_expr(&stmt.condition, scope)?.is_truthy() {
                    self.exec_stmt(&stmt.then_branch, scope)
                } else if let Some(else_branch) = &stmt.else_branch {
                    self.exec_stmt(else_branch, scope)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While(stmt) => {
                while self.eval_expr(&stmt.condition, scope)?.is_truthy() {
                    match self.exec_stmt(&stmt.body, scope)? {
                        Flow::Normal => {}
                        ret @ Flow::Return(_) => return Ok(ret),
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::Function(func) => {
                let existing = scope.borrow().get_own(&func.name.lexeme);
                let overloads = match existing {
                    Some(Value::Callable(o)) => o,
                    _ => Rc::new(RefCell::new(Overloads::new(func.name.lexeme.clone()))),
                };
                overloads.borrow_mut().insert(Callable::User(FunctionValue {
                    declaration: Rc::new(func.clone()),
                    closure: Rc::clone(scope),
                }));
                scope.borrow_mut().define(func.name.lexeme.clone(), Some(Value::Callable(overloads)));
                Ok(Flow::Normal)
            }
            Stmt::Return(stmt) => {
                let value = match &stmt.value {
                    Some(expr) => self.eval_expr(expr, scope)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            }
        }
    }

    fn call_user_function(&self, function: &FunctionValue, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let call_scope = Scope::nested(&function.closure);
        {
            let mut scope = call_scope.borrow_mut();
            for (i, param) in function.declaration.params.iter().enumerate() {
                if param.is_vararg {
                    let rest: Vec<Value> = args[i..].to_vec();
                    scope.define(param.name.lexeme.clone(), Some(Value::new_array(rest)));
                } else {
                    scope.define(param.name.lexeme.clone(), Some(args[i].clone()));
                }
            }
        }
        match self.exec_block_in(&function.declaration.body.statements, &call_scope)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Null),
        }
    }

    fn eval_expr(&self, expr: &Expr, scope: &ScopeRef) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(lit) => eval_literal(&lit.token),
            Expr::Variable(v) => match self.depths.get(&v.id) {
                Some(&depth) => Scope::get_at(scope, depth, &v.name.lexeme, v.name.line),
                None => Scope::get_global(scope, &v.name.lexeme, v.name.line),
            },
            Expr::Assign(a) => {
                let value = self.eval_expr(&a.right, scope)?;
                match self.depths.get(&a.id) {
                    Some(&depth) => Scope::assign_at(scope, depth, &a.name.lexeme, value.clone(), a.name.line)?,
                    None => Scope::assign_global(scope, &a.name.lexeme, value.clone(), a.name.line)?,
                }
                Ok(value)
            }
            Expr::Grouping(g) => self.eval_expr(&g.inner, scope),
            Expr::Unary(u) => self.eval_unary(u, scope),
            Expr::Binary(b) => self.eval_binary(b, scope),
            Expr::Logical(l) => {
                let left = self.eval_expr(&l.left, scope)?;
                let short_circuits = if l.operator.kind == TokenKind::Or {
                    left.is_truthy()
                } else {
                    !left.is_truthy()
                };
                if short_circuits {
                    Ok(left)
                } else {
                    self.eval_expr(&l.right, scope)
                }
            }
            // Only the taken branch is evaluated: the interpreter this was
            // ported from evaluated both unconditionally, which meant a
            // side effect in the untaken branch ran anyway.
            Expr::Ternary(t) => {
                if self.eval_expr(&t.condition, scope)?.is_truthy() {
                    self.eval_expr(&t.then_branch, scope)
                } else {
                    self.eval_expr(&t.else_branch, scope)
                }
            }
            Expr::Call(c) => {
                let callee = self.eval_expr(&c.callee, scope)?;
                let mut args = Vec::with_capacity(c.arguments.len());
                for arg in &c.arguments {
                    args.push(self.eval_expr(arg, scope)?);
                }
                let line = c.paren.line;
                let overloads = match callee {
                    Value::Callable(o) => o,
                    other => return Err(RuntimeError::new(line, format!("'{}' is not callable.", other.type_name()))),
                };
                let chosen = {
                    let borrowed = overloads.borrow();
                    borrowed.resolve(args.len()).cloned()
                };
                let chosen = chosen.ok_or_else(|| {
                    let borrowed = overloads.borrow();
                    RuntimeError::new(
                        line,
                        format!(
                            "'{}' has no overload accepting {} argument(s) (accepts: {:?}).",
                            borrowed.name(),
                            args.len(),
                            borrowed.arities()
                        ),
                    )
                })?;
                match chosen {
                    Callable::Native(native) => (native.func)(&args, line),
                    Callable::User(function) => self.call_user_function(&function, args),
                }
            }
            Expr::Array(a) => {
                let mut elements = Vec::with_capacity(a.elements.len());
                for element in &a.elements {
                    elements.push(self.eval_expr(element, scope)?);
                }
                Ok(Value::new_array(elements))
            }
            Expr::Map(m) => {
                let mut entries = IndexMap::new();
                for (key_expr, value_expr) in &m.entries {
                    let key = self.eval_expr(key_expr, scope)?;
                    if matches!(key, Value::Map(_)) {
                        return Err(RuntimeError::new(m.brace.line, "A map cannot itself be used as a map key."));
                    }
                    let value = self.eval_expr(value_expr, scope)?;
                    entries.insert(key, value);
                }
                Ok(Value::new_map(entries))
            }
            Expr::Index(i) => {
                let target = self.eval_expr(&i.callee, scope)?;
                let index = self.eval_expr(&i.index, scope)?;
                index_get(&target, &index, i.bracket.line)
            }
            Expr::IndexAssign(ia) => {
                let target = self.eval_expr(&ia.target, scope)?;
                let index = self.eval_expr(&ia.index, scope)?;
                let value = self.eval_expr(&ia.value, scope)?;
                index_set(&target, index, value.clone(), ia.bracket.line)?;
                Ok(value)
            }
        }
    }

    fn eval_unary(&self, u: &Unary, scope: &ScopeRef) -> Result<Value, RuntimeError> {
        let right = self.eval_expr(&u.right, scope)?;
        let line = u.operator.line;
        match u.operator.kind {
            TokenKind::Bang => Ok(Value::Bool(!right.is_truthy())),
            TokenKind::Minus => match right {
                Value::Int(i) => Ok(Value::Int(-i)),
                Value::Double(d) => Ok(Value::Double(-d)),
                other => Err(RuntimeError::new(line, format!("Cannot negate a {}.", other.type_name()))),
            },
            TokenKind::Plus => match right {
                Value::Int(_) | Value::Double(_) => Ok(right),
                other => Err(RuntimeError::new(line, format!("Unary '+' requires a number, got {}.", other.type_name()))),
            },
            _ => unreachable!("parser only produces !, -, + as unary operators"),
        }
    }

    fn eval_binary(&self, b: &Binary, scope: &ScopeRef) -> Result<Value, RuntimeError> {
        let left = self.eval_expr(&b.left, scope)?;
        let right = self.eval_expr(&b.right, scope)?;
        let line = b.operator.line;
        match b.operator.kind {
            TokenKind::Plus => add(left, right, line),
            TokenKind::Minus => numeric_op(left, right, line, "-", |a, b| a - b, |a, b| a - b),
            TokenKind::Star => numeric_op(left, right, line, "*", |a, b| a * b, |a, b| a * b),
            TokenKind::Slash => divide(left, right, line),
            TokenKind::Greater => compare(left, right, line, |o| o == Ordering::Greater),
            TokenKind::GreaterEqual => compare(left, right, line, |o| o != Ordering::Less),
            TokenKind::Less => compare(left, right, line, |o| o == Ordering::Less),
            TokenKind::LessEqual => compare(left, right, line, |o| o != Ordering::Greater),
            TokenKind::EqualEqual => Ok(Value::Bool(values_equal(&left, &right))),
            TokenKind::BangEqual => Ok(Value::Bool(!values_equal(&left, &right))),
            _ => unreachable!("parser only produces arithmetic/comparison/equality tokens as binary operators"),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn eval_literal(token: &Token) -> Result<Value, RuntimeError> {
    match token.kind {
        TokenKind::Int => parse_int(&token.lexeme)
            .map(Value::Int)
            .map_err(|e| RuntimeError::new(token.line, e)),
        TokenKind::Double => token
            .lexeme
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|_| RuntimeError::new(token.line, format!("Invalid number literal '{}'.", token.lexeme))),
        TokenKind::String => Ok(Value::Str(token.lexeme.clone())),
        TokenKind::True => Ok(Value::Bool(true)),
        TokenKind::False => Ok(Value::Bool(false)),
        TokenKind::Null => Ok(Value::Null),
        _ => unreachable!("parser only wraps literal-kind tokens in Literal nodes"),
    }
}

/// Parses an integer literal base-aware from its raw lexeme. The
/// original interpreter ran every integer lexeme, `0x`/`0b` prefix
/// included, through a decimal-only conversion, which silently truncated
/// hex and binary literals to whatever decimal digits happened to lead
/// them (`0x1F` read back as `0`). Stripping the prefix and picking the
/// matching radix here is the fix.
fn parse_int(lexeme: &str) -> Result<i64, String> {
    if let Some(rest) = lexeme.strip_prefix("0x") {
        i64::from_str_radix(rest, 16).map_err(|_| format!("Invalid hexadecimal literal '{lexeme}'."))
    } else if let Some(rest) = lexeme.strip_prefix("0b") {
        i64::from_str_radix(rest, 2).map_err(|_| format!("Invalid binary literal '{lexeme}'."))
    } else if lexeme.len() > 1 && lexeme.starts_with('0') {
        i64::from_str_radix(&lexeme[1..], 8).map_err(|_| format!("Invalid octal literal '{lexeme}'."))
    } else {
        lexeme.parse::<i64>().map_err(|_| format!("Invalid integer literal '{lexeme}'."))
    }
}

fn add(left: Value, right: Value, line: usize) -> Result<Value, RuntimeError> {
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        return Ok(Value::Str(format!("{left}{right}")));
    }
    numeric_op(left, right, line, "+", |a, b| a + b, |a, b| a + b)
}

fn divide(left: Value, right: Value, line: usize) -> Result<Value, RuntimeError> {
    if let (Value::Int(a), Value::Int(b)) = (&left, &right) {
        if *b == 0 {
            return Err(RuntimeError::new(line, "Division by zero."));
        }
        return Ok(Value::Int(a / b));
    }
    numeric_op(left, right, line, "/", |_, _| unreachable!(), |a, b| a / b)
}

fn numeric_op(
    left: Value,
    right: Value,
    line: usize,
    symbol: &str,
    int_op: impl Fn(i64, i64) -> i64,
    float_op: impl Fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(int_op(a, b))),
        (Value::Int(a), Value::Double(b)) => Ok(Value::Double(float_op(a as f64, b))),
        (Value::Double(a), Value::Int(b)) => Ok(Value::Double(float_op(a, b as f64))),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(float_op(a, b))),
        (a, b) => Err(RuntimeError::new(
            line,
            format!("Operator '{symbol}' requires numbers, got {} and {}.", a.type_name(), b.type_name()),
        )),
    }
}

fn compare(left: Value, right: Value, line: usize, pred: impl Fn(Ordering) -> bool) -> Result<Value, RuntimeError> {
    let (a, b) = match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => (*a as f64, *b as f64),
        (Value::Int(a), Value::Double(b)) => (*a as f64, *b),
        (Value::Double(a), Value::Int(b)) => (*a, *b as f64),
        (Value::Double(a), Value::Double(b)) => (*a, *b),
        _ => {
            return Err(RuntimeError::new(
                line,
                format!("Comparison requires numbers, got {} and {}.", left.type_name(), right.type_name()),
            ))
        }
    };
    match a.partial_cmp(&b) {
        Some(ordering) => Ok(Value::Bool(pred(ordering))),
        None => Ok(Value::Bool(false)),
    }
}

/// `==`/`!=` promote across `Int`/`Double` the same way arithmetic does.
/// Kept separate from `Value`'s `PartialEq` impl, which backs `Hash` and
/// must not consider `Int(1)` and `Double(1.0)` equal without also
/// hashing them the same way.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Double(y)) | (Value::Double(y), Value::Int(x)) => (*x as f64) == *y,
        _ => a == b,
    }
}

fn expect_index(value: &Value, line: usize) -> Result<i64, RuntimeError> {
    match value {
        Value::Int(i) => Ok(*i),
        other => Err(RuntimeError::new(line, format!("Index must be an int, got {}.", other.type_name()))),
    }
}

/// Negative indices count back from the end, as in `arr[-1]` for the
/// last element.
fn resolve_index(idx: i64, len: usize, line: usize, what: &str) -> Result<usize, RuntimeError> {
    let len = len as i64;
    let resolved = if idx < 0 { idx + len } else { idx };
    if resolved < 0 || resolved >= len {
        return Err(RuntimeError::new(line, format!("{what} index {idx} out of range for length {len}.")));
    }
    Ok(resolved as usize)
}

fn index_get(target: &Value, index: &Value, line: usize) -> Result<Value, RuntimeError> {
    match target {
        Value::Array(items) => {
            let idx = expect_index(index, line)?;
            let items = items.borrow();
            let resolved = resolve_index(idx, items.len(), line, "Array")?;
            Ok(items[resolved].clone())
        }
        Value::Str(s) => {
            let idx = expect_index(index, line)?;
            let chars: Vec<char> = s.chars().collect();
            let resolved = resolve_index(idx, chars.len(), line, "String")?;
            Ok(Value::Str(chars[resolved].to_string()))
        }
        Value::Map(entries) => entries
            .borrow()
            .get(index)
            .cloned()
            .ok_or_else(|| RuntimeError::new(line, format!("Map has no key {index}."))),
        other => Err(RuntimeError::new(line, format!("Cannot index into a {}.", other.type_name()))),
    }
}

fn index_set(target: &Value, index: Value, value: Value, line: usize) -> Result<(), RuntimeError> {
    match target {
        Value::Array(items) => {
            let idx = expect_index(&index, line)?;
            let mut items = items.borrow_mut();
            let resolved = resolve_index(idx, items.len(), line, "Array")?;
            items[resolved] = value;
            Ok(())
        }
        Value::Map(entries) => {
            if matches!(index, Value::Map(_)) {
                return Err(RuntimeError::new(line, "A map cannot itself be used as a map key."));
            }
            entries.borrow_mut().insert(index, value);
            Ok(())
        }
        other => Err(RuntimeError::new(line, format!("Cannot assign into a {}.", other.type_name()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{run, PipelineError};

    fn run_ok(src: &str) {
        let mut interp = Interpreter::new();
        if let Err(err) = run(src, &mut interp) {
            panic!("expected '{src}' to run successfully, got {err:?}");
        }
    }

    fn run_err_message(src: &str) -> String {
        let mut interp = Interpreter::new();
        match run(src, &mut interp) {
            Ok(()) => panic!("expected '{src}' to fail"),
            Err(PipelineError::Runtime(e)) => e.to_string(),
            Err(other) => panic!("expected a runtime error, got {other:?}"),
        }
    }

    #[test]
    fn integer_division_by_zero_is_a_runtime_error() {
        let message = run_err_message("1 / 0;");
        assert!(message.contains("Division by zero"), "{message}");
    }

    #[test]
    fn calling_a_non_function_is_a_runtime_error() {
        let message = run_err_message("var x = 1;\nx();\n");
        assert!(message.contains("is not callable"), "{message}");
    }

    #[test]
    fn integer_plus_double_promotes_to_double() {
        run_ok("var x = 1 + 2.5;\n");
    }

    #[test]
    fn recursive_function_calls_resolve_through_their_own_name() {
        run_ok("fun fact(n) { return n < 2 ? 1 : n * fact(n - 1); }\nvar x = fact(5);\n");
    }

    #[test]
    fn array_literal_out_of_range_index_is_a_runtime_error() {
        let message = run_err_message("var a = [1, 2];\nvar x = a[10];\n");
        assert!(message.contains("out of range"), "{message}");
    }
}
