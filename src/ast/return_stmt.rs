use crate::ast::Expr;
use crate::lexer::Token;

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub keyword: Token,
    pub value: Option<Expr>,
}
