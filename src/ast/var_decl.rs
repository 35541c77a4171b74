use crate::ast::Expr;
use crate::lexer::Token;

/// `var name;` or `var name = initializer;`. Without an initializer the
/// evaluator binds the uninitialized sentinel; reading it back is a
/// runtime error.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: Token,
    pub initializer: Option<Expr>,
}
