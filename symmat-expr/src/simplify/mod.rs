//! Module to normalize expressions.
//!
//! This module provides the [`simplify()`] function, which rewrites an expression into the
//! crate's canonical form. It does this by repeatedly applying rewriting rules to the expression
//! in multiple passes, until no more rules apply.
//!
//! Every rule either strictly shrinks the expression or moves it toward the expanded, ordered
//! sum-of-products shape, so the passes reach a fixpoint; [`MAX_PASSES`] caps the iteration as a
//! termination guard regardless.

pub mod fraction;
pub mod rules;

use crate::{Expr, Result};

/// Upper bound on rewrite passes over a single node.
///
/// The rule set terminates on its own; the cap exists so that a misbehaving rule combination can
/// never hang a caller.
const MAX_PASSES: usize = 1_000;

/// Base implementation of the simplification algorithm.
fn inner_simplify(expr: &Expr) -> Result<(Expr, bool)> {
    let mut expr = expr.clone();
    let mut changed_at_least_once = false;

    for _ in 0..MAX_PASSES {
        let mut changed_in_this_pass = false;

        // try to rewrite this expression using all rules
        if let Some(new_expr) = rules::all(&expr)? {
            expr = new_expr;
            changed_in_this_pass = true;
            changed_at_least_once = true;
        }

        // then begin recursing into the expression's children
        match expr {
            Expr::Constant(_) | Expr::Symbol(_) => return Ok((expr, changed_at_least_once)),
            Expr::Operator(_, ref mut operands) => {
                for operand in operands.iter_mut() {
                    let (new_operand, changed) = inner_simplify(operand)?;
                    *operand = new_operand;
                    changed_in_this_pass |= changed;
                    changed_at_least_once |= changed;
                }
            },
        }

        if !changed_in_this_pass {
            return Ok((expr, changed_at_least_once));
        }
    }

    log::debug!("simplification pass cap reached for: {}", expr);
    Ok((expr, changed_at_least_once))
}

/// Normalizes the given expression into the crate's canonical form.
///
/// Fails with [`ExprError::DivisionByZero`](crate::ExprError::DivisionByZero) if a division by
/// the zero constant is encountered while folding.
pub fn simplify(expr: &Expr) -> Result<Expr> {
    Ok(inner_simplify(expr)?.0)
}

/// Normalizes the given expression, then applies a narrower second pass that merges fractions
/// sharing a denominator.
///
/// Dividing every entry of an adjugate matrix by a symbolic determinant leaves redundant
/// nested-fraction shapes that the general rules do not reach from the outside in; this entry
/// point re-runs the consolidation until it settles. Used by matrix inversion.
pub fn simplify_inversion(expr: &Expr) -> Result<Expr> {
    let mut expr = simplify(expr)?;

    for _ in 0..MAX_PASSES {
        match fraction::consolidate(&expr) {
            Some(merged) => expr = simplify(&merged)?,
            None => break,
        }
    }

    Ok(expr)
}

#[cfg(test)]
mod tests {
    use crate::Expr;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn add_rules() {
        // also tests multiply_zero
        let expr = Expr::zero()
            + Expr::zero() * (Expr::int(3) * Expr::symbol("x") + Expr::int(5) * Expr::symbol("b"))
            + Expr::zero()
            + Expr::int(3) * Expr::symbol("a");
        assert_eq!(
            simplify(&expr).unwrap(),
            Expr::int(3) * Expr::symbol("a"),
        );
    }

    #[test]
    fn multiply_rules() {
        let expr = Expr::zero()
            * (Expr::int(3) * Expr::symbol("x") + Expr::int(5) * Expr::symbol("b"))
            * Expr::one()
            * (Expr::int(3) * Expr::symbol("a"));
        assert_eq!(simplify(&expr).unwrap(), Expr::zero());
    }

    #[test]
    fn multiply_rules_2() {
        // also tests add_zero
        let inner = Expr::symbol("x").pow(Expr::int(2)) + Expr::int(5) * Expr::symbol("x") + Expr::int(6);
        let expr = Expr::one() * Expr::int(3) * (Expr::one() + inner * Expr::zero()) * Expr::one();
        assert_eq!(simplify(&expr).unwrap(), Expr::int(3));
    }

    #[test]
    fn constant_folding_is_exact() {
        // 1/3 + 1/6 = 1/2
        let expr = Expr::rational(1, 3) + Expr::rational(1, 6);
        assert_eq!(simplify(&expr).unwrap(), Expr::rational(1, 2));

        // (2/3)^3 = 8/27
        let expr = Expr::rational(2, 3).pow(Expr::int(3));
        assert_eq!(simplify(&expr).unwrap(), Expr::rational(8, 27));
    }

    #[test]
    fn combine_like_terms() {
        // x + x + x = 3x
        let x = || Expr::symbol("x");
        let expr = x() + x() + x();
        assert_eq!(simplify(&expr).unwrap(), simplify(&(Expr::int(3) * x())).unwrap());

        // 2a + 3a - 5a = 0
        let a = || Expr::symbol("a");
        let expr = Expr::int(2) * a() + Expr::int(3) * a() - Expr::int(5) * a();
        assert_eq!(simplify(&expr).unwrap(), Expr::zero());
    }

    #[test]
    fn combine_like_factors() {
        // a * a^2 = a^3
        let a = || Expr::symbol("a");
        let expr = a() * a().pow(Expr::int(2));
        assert_eq!(simplify(&expr).unwrap(), a().pow(Expr::int(3)));
    }

    #[test]
    fn distribution() {
        // (a + b) * c = a*c + b*c
        let expr = (Expr::symbol("a") + Expr::symbol("b")) * Expr::symbol("c");
        let expected = Expr::symbol("a") * Expr::symbol("c") + Expr::symbol("b") * Expr::symbol("c");
        assert_eq!(simplify(&expr).unwrap(), simplify(&expected).unwrap());
    }

    #[test]
    fn subtraction_lowering() {
        // a - b + b = a
        let expr = Expr::symbol("a") - Expr::symbol("b") + Expr::symbol("b");
        assert_eq!(simplify(&expr).unwrap(), Expr::symbol("a"));
    }

    #[test]
    fn negation_hoisting() {
        // -(x + 1) + x = -1
        let expr = -(Expr::symbol("x") + Expr::one()) + Expr::symbol("x");
        assert_eq!(simplify(&expr).unwrap(), Expr::int(-1));
    }

    #[test]
    fn canonical_ordering() {
        // term and factor order does not affect the normalized tree
        let lhs = Expr::symbol("b") * Expr::symbol("a") + Expr::one();
        let rhs = Expr::one() + Expr::symbol("a") * Expr::symbol("b");
        assert_eq!(simplify(&lhs).unwrap(), simplify(&rhs).unwrap());
    }

    #[test]
    fn fraction_consolidation() {
        // a/d + b/d = (a + b)/d
        let d = || Expr::symbol("d");
        let expr = Expr::symbol("a") / d() + Expr::symbol("b") / d();
        let expected = (Expr::symbol("a") + Expr::symbol("b")) / d();
        assert_eq!(simplify(&expr).unwrap(), simplify(&expected).unwrap());
    }

    #[test]
    fn division_by_symbolic_self() {
        let expr = (Expr::symbol("a") + Expr::symbol("b")) / (Expr::symbol("b") + Expr::symbol("a"));
        assert_eq!(simplify(&expr).unwrap(), Expr::one());
    }

    #[test]
    fn division_by_zero_constant() {
        let expr = Expr::symbol("a") / Expr::zero();
        assert_eq!(simplify(&expr), Err(crate::ExprError::DivisionByZero));
    }

    #[test]
    fn constant_denominator_folds() {
        // x / 2 = 1/2 * x
        let expr = Expr::symbol("x") / Expr::int(2);
        assert_eq!(
            simplify(&expr).unwrap(),
            simplify(&(Expr::rational(1, 2) * Expr::symbol("x"))).unwrap(),
        );
    }

    #[test]
    fn power_rules() {
        let x = || Expr::symbol("x");
        assert_eq!(simplify(&x().pow(Expr::zero())).unwrap(), Expr::one());
        assert_eq!(simplify(&x().pow(Expr::one())).unwrap(), x());
        assert_eq!(simplify(&Expr::one().pow(x())).unwrap(), Expr::one());
        // (x^2)^3 = x^6
        assert_eq!(
            simplify(&x().pow(Expr::int(2)).pow(Expr::int(3))).unwrap(),
            x().pow(Expr::int(6)),
        );
    }

    #[test]
    fn negative_exponent_becomes_fraction() {
        // x^-2 = 1/x^2
        let expr = Expr::symbol("x").pow(Expr::int(-2));
        let expected = Expr::one() / Expr::symbol("x").pow(Expr::int(2));
        assert_eq!(simplify(&expr).unwrap(), simplify(&expected).unwrap());
    }

    #[test]
    fn binomial_expansion() {
        // (a + b)^2 = a^2 + 2ab + b^2
        let expr = (Expr::symbol("a") + Expr::symbol("b")).pow(Expr::int(2));
        let expected = Expr::symbol("a").pow(Expr::int(2))
            + Expr::int(2) * Expr::symbol("a") * Expr::symbol("b")
            + Expr::symbol("b").pow(Expr::int(2));
        assert_eq!(simplify(&expr).unwrap(), simplify(&expected).unwrap());
    }

    #[test]
    fn inversion_pass_merges_shared_denominators() {
        // a*d/(a*d - b*c) - b*c/(a*d - b*c) = 1
        let det = || Expr::symbol("a") * Expr::symbol("d") - Expr::symbol("b") * Expr::symbol("c");
        let expr = Expr::symbol("a") * Expr::symbol("d") / det()
            - Expr::symbol("b") * Expr::symbol("c") / det();
        assert_eq!(simplify_inversion(&expr).unwrap(), Expr::one());
    }
}
