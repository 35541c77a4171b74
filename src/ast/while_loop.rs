use crate::ast::{Expr, Stmt};

#[derive(Debug, Clone)]
pub struct WhileLoop {
    pub condition: Expr,
    pub body: Box<Stmt>,
}
