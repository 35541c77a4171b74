use crate::ast::Expr;
use crate::lexer::Token;

#[derive(Debug, Clone)]
pub struct Call {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub paren: Token,
}
