use crate::ast::Stmt;

#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<Stmt>,
}
