use crate::ast::Expr;
use crate::lexer::Token;

#[derive(Debug, Clone)]
pub struct IndexAssign {
    pub target: Box<Expr>,
    pub index: Box<Expr>,
    pub value: Box<Expr>,
    pub bracket: Token,
}
