use super::{
    ArrayLit, Assign, Binary, Call, Grouping, Index, IndexAssign, Literal, Logical, MapLit, Ternary, Unary, Variable,
};

/// Every expression in the language is one variant of this sum type.
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal),
    Variable(Variable),
    Assign(Assign),
    Grouping(Grouping),
    Unary(Unary),
    Binary(Binary),
    Logical(Logical),
    Ternary(Ternary),
    Call(Call),
    Array(ArrayLit),
    Map(MapLit),
    Index(Index),
    IndexAssign(IndexAssign),
}
