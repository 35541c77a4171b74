//! Static lexical resolution.
//!
//! Walks the AST once after parsing and, for every variable read or
//! assignment, counts how many enclosing scopes separate it from its
//! declaration. The evaluator uses that hop count to jump straight to
//! the right link in the scope chain instead of searching outward scope
//! by scope at every lookup — the same trick the tree this interpreter
//! grew from uses, just keyed by `NodeId` here instead of node pointer
//! identity.

use std::collections::HashMap;

use crate::ast::{Expr, NodeId, Param, Stmt};
use crate::error::ResolveError;
use crate::lexer::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
}

/// `true` once a declared name has also been defined (its initializer,
/// if any, has been resolved) — lets `resolve_expr` catch `var x = x;`
/// referring to itself before it has a value.
type Scope = HashMap<String, bool>;

pub struct Resolver {
    scopes: Vec<Scope>,
    depths: HashMap<NodeId, usize>,
    current_function: FunctionType,
    errors: Vec<ResolveError>,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
            depths: HashMap::new(),
            current_function: FunctionType::None,
            errors: Vec::new(),
        }
    }

    /// Resolves a whole program, returning the `NodeId -> scope depth`
    /// side table the evaluator indexes into, plus any errors found.
    pub fn resolve(mut self, statements: &[Stmt]) -> (HashMap<NodeId, usize>, Vec<ResolveError>) {
        for stmt in statements {
            self.resolve_stmt(stmt);
        }
        (self.depths, self.errors)
    }

    fn error(&mut self, token: &Token, message: impl Into<String>) {
        self.errors.push(ResolveError::new(token.line, token.describe(), message.into()));
    }

    fn begin_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Marks `name` as declared-but-not-yet-defined in the innermost
    /// scope. Mutates that scope in place — the interpreter this was
    /// ported from cloned the top scope into a temporary and wrote the
    /// declaration there, so it never actually took effect; writing
    /// through the `Vec`'s last entry directly is the fix.
    fn declare(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(&name.lexeme) {
                self.error(name, format!("'{}' is already declared in this scope.", name.lexeme));
            }
            scope.insert(name.lexeme.clone(), false);
        }
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    /// Like `declare`, but silent on a same-scope collision: a second
    /// `fun f(...)` under a name already bound in this scope is a new
    /// overload, not a redeclaration, so it must not trip the
    /// already-declared check that ordinary `var`s get.
    fn declare_function(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), false);
        }
    }

    fn resolve_local(&mut self, id: NodeId, name: &str) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(name) {
                self.depths.insert(id, depth);
                return;
            }
        }
        // Not found in any tracked scope: treated as global, resolved by
        // name at call time instead of by hop count.
    }

    fn resolve_function(&mut self, params: &[Param], body: &[Stmt]) {
        let enclosing_function = self.current_function;
        self.current_function = FunctionType::Function;
        self.begin_scope();
        for param in params {
            self.declare(&param.name);
            self.define(&param.name);
        }
        for stmt in body {
            self.resolve_stmt(stmt);
        }
        self.end_scope();
        self.current_function = enclosing_function;
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(expr) => self.resolve_expr(expr),
            Stmt::VarDecl(decl) => {
                self.declare(&decl.name);
                if let Some(init) = &decl.initializer {
                    self.resolve_expr(init);
                }
                self.define(&decl.name);
            }
            Stmt::Block(block) => {
                self.begin_scope();
                for stmt in &block.statements {
                    self.resolve_stmt(stmt);
                }
                self.end_scope();
            }
            Stmt::If(stmt) => {
                self.resolve_expr(&stmt.condition);
                self.resolve_stmt(&stmt.then_branch);
                if let Some(else_branch) = &stmt.else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::While(stmt) => {
                self.resolve_expr(&stmt.condition);
                self.resolve_stmt(&stmt.body);
            }
            Stmt::Function(func) => {
                // Every overload under the same name shares one binding
                // slot: a second `fun f(...)` in the same scope is a new
                // arity, not a redeclaration, so it must not error the way
                // a repeated `var` would.
                self.declare_function(&func.name);
                self.define(&func.name);
                self.resolve_function(&func.params, &func.body.statements);
            }
            Stmt::Return(stmt) => {
                if self.current_function == FunctionType::None {
                    self.error(&stmt.keyword, "Can't return from top-level code.");
                }
                if let Some(value) = &stmt.value {
                    self.resolve_expr(value);
                }
            }
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {}
            Expr::Variable(v) => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(v.name.lexeme.as_str()) == Some(&false) {
                        self.error(&v.name, "Can't read local variable in its own initializer.");
                    }
                }
                self.resolve_local(v.id, &v.name.lexeme);
            }
            Expr::Assign(a) => {
                self.resolve_expr(&a.right);
                self.resolve_local(a.id, &a.name.lexeme);
            }
            Expr::Grouping(g) => self.resolve_expr(&g.inner),
            Expr::Unary(u) => self.resolve_expr(&u.right),
            Expr::Binary(b) => {
                self.resolve_expr(&b.left);
                self.resolve_expr(&b.right);
            }
            Expr::Logical(l) => {
                self.resolve_expr(&l.left);
                self.resolve_expr(&l.right);
            }
            Expr::Ternary(t) => {
                self.resolve_expr(&t.condition);
                self.resolve_expr(&t.then_branch);
                self.resolve_expr(&t.else_branch);
            }
            Expr::Call(c) => {
                self.resolve_expr(&c.callee);
                for arg in &c.arguments {
                    self.resolve_expr(arg);
                }
            }
            Expr::Array(a) => {
                for element in &a.elements {
                    self.resolve_expr(element);
                }
            }
            Expr::Map(m) => {
                for (key, value) in &m.entries {
                    self.resolve_expr(key);
                    self.resolve_expr(value);
                }
            }
            Expr::Index(i) => {
                self.resolve_expr(&i.callee);
                self.resolve_expr(&i.index);
            }
            Expr::IndexAssign(i) => {
                self.resolve_expr(&i.target);
                self.resolve_expr(&i.index);
                self.resolve_expr(&i.value);
            }
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn resolve_source(src: &str) -> (HashMap<NodeId, usize>, Vec<ResolveError>) {
        let (tokens, lex_errors) = Lexer::new(src).tokenize();
        assert!(lex_errors.is_empty(), "{lex_errors:?}");
        let (stmts, parse_errors, _next_id) = Parser::new(tokens).parse();
        assert!(parse_errors.is_empty(), "{parse_errors:?}");
        Resolver::new().resolve(&stmts)
    }

    #[test]
    fn variable_read_in_the_same_scope_it_was_declared_resolves_to_depth_zero() {
        let (depths, errors) = resolve_source("var x = 1; x;");
        assert!(errors.is_empty());
        assert_eq!(depths.values().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn reading_a_variable_in_its_own_initializer_is_an_error() {
        let (_depths, errors) = resolve_source("var x = x;");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn return_outside_a_function_is_an_error() {
        let (_depths, errors) = resolve_source("return 1;");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn redeclaring_a_function_with_a_different_arity_in_the_same_scope_is_not_an_error() {
        let (_depths, errors) = resolve_source("fun f(x) { return x; } fun f(x, y) { return x + y; }");
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn redeclaring_a_variable_in_the_same_scope_is_still_an_error() {
        let (_depths, errors) = resolve_source("var x = 1; var x = 2;");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn variable_read_inside_a_nested_block_sees_the_outer_declaration() {
        let (depths, errors) = resolve_source("var x = 1; { { x; } }");
        assert!(errors.is_empty());
        assert_eq!(depths.values().copied().collect::<Vec<_>>(), vec![2]);
    }
}
