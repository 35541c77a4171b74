use crate::ast::Expr;
use crate::lexer::Token;

#[derive(Debug, Clone)]
pub struct ArrayLit {
    pub bracket: Token,
    pub elements: Vec<Expr>,
}
