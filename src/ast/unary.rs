use crate::ast::Expr;
use crate::lexer::Token;

/// A prefix unary operation: `+`, `-`, or `!`.
#[derive(Debug, Clone)]
pub struct Unary {
    pub operator: Token,
    pub right: Box<Expr>,
}
