use crate::ast::Expr;
use crate::lexer::Token;

/// `{ key: value, ... }`. Entries keep their source order; later
/// duplicate keys overwrite earlier ones at evaluation time.
#[derive(Debug, Clone)]
pub struct MapLit {
    pub brace: Token,
    pub entries: Vec<(Expr, Expr)>,
}
