use crate::ast::Expr;

/// `condition ? then_branch : else_branch`. Only the selected branch is
/// evaluated — see the evaluator's note on why this diverges from the
/// language's original eager-both-branches implementation.
#[derive(Debug, Clone)]
pub struct Ternary {
    pub condition: Box<Expr>,
    pub then_branch: Box<Expr>,
    pub else_branch: Box<Expr>,
}
