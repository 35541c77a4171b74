use crate::ast::{Block, Expr, Function, If, ReturnStmt, VarDecl, WhileLoop};

/// Every statement in the language is one variant of this sum type.
#[derive(Debug, Clone)]
pub enum Stmt {
    Expr(Expr),
    VarDecl(VarDecl),
    Block(Block),
    If(If),
    While(WhileLoop),
    Function(Function),
    Return(ReturnStmt),
}
