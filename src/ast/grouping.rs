use crate::ast::Expr;

#[derive(Debug, Clone)]
pub struct Grouping {
    pub inner: Box<Expr>,
}
