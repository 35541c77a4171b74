use crate::ast::{Expr, NodeId};
use crate::lexer::Token;

/// Assignment to a plain variable name: `name = right`. `id` is this
/// node's identity in the resolver's scope-depth side table.
#[derive(Debug, Clone)]
pub struct Assign {
    pub id: NodeId,
    pub name: Token,
    pub right: Box<Expr>,
}
