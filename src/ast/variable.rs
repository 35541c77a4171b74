use crate::ast::NodeId;
use crate::lexer::Token;

/// A read of a variable. `id` is this node's identity in the resolver's
/// scope-depth side table.
#[derive(Debug, Clone)]
pub struct Variable {
    pub id: NodeId,
    pub name: Token,
}
