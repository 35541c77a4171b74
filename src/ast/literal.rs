use crate::lexer::Token;

/// A literal expression. `token.kind` is one of `INT`, `DOUBLE`, `STRING`,
/// `TRUE`, `FALSE`, or `NULL`; the actual value is parsed from the token
/// lazily, at evaluation time.
#[derive(Debug, Clone)]
pub struct Literal {
    pub token: Token,
}
