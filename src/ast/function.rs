use crate::ast::{Block, Param};
use crate::lexer::Token;

/// A function declaration. Declaring a second function under the same
/// name in the same scope does not replace the first — it is merged into
/// an overload set keyed by arity (see `value::Overloads`).
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Token,
    pub params: Vec<Param>,
    pub body: Block,
}
