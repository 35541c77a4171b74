use crate::ast::Expr;
use crate::lexer::Token;

#[derive(Debug, Clone)]
pub struct Index {
    pub callee: Box<Expr>,
    pub index: Box<Expr>,
    pub bracket: Token,
}
