//! Lowering of negation and subtraction into rational coefficients.
//!
//! The canonical form carries signs inside constants: `-e` becomes `(-1)·e` and `a - b` becomes
//! `a + (-1)·b`, so the addition rules see every term with an explicit coefficient.

use crate::{Expr, OpKind};

/// `-a = (-1)*a`
///
/// Constant operands are handled by folding before this rule runs.
pub fn lower_negate(expr: &Expr) -> Option<Expr> {
    if let Expr::Operator(OpKind::Negate, operands) = expr {
        let [operand] = operands.as_slice() else { return None };
        return Some(Expr::minus_one() * operand.clone());
    }

    None
}

/// `a - b = a + (-1)*b`
pub fn lower_subtract(expr: &Expr) -> Option<Expr> {
    if let Expr::Operator(OpKind::Subtract, operands) = expr {
        let [lhs, rhs] = operands.as_slice() else { return None };
        return Some(lhs.clone() + Expr::minus_one() * rhs.clone());
    }

    None
}

/// Applies all sign-lowering rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    lower_negate(expr).or_else(|| lower_subtract(expr))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn negate_becomes_coefficient() {
        let expr = -Expr::symbol("x");
        assert_eq!(
            lower_negate(&expr),
            Some(Expr::minus_one() * Expr::symbol("x")),
        );
    }

    #[test]
    fn subtract_becomes_signed_add() {
        let expr = Expr::symbol("a") - Expr::symbol("b");
        assert_eq!(
            lower_subtract(&expr),
            Some(Expr::symbol("a") + Expr::minus_one() * Expr::symbol("b")),
        );
    }
}
