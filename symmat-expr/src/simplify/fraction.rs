//! Tools to help manipulate symbolic fractions.

use crate::{Expr, OpKind};

/// Splits an expression into its numerator and denominator.
///
/// An expression that is not a division is treated as a fraction over `1`.
pub(crate) fn split(expr: &Expr) -> (Expr, Expr) {
    if let Expr::Operator(OpKind::Divide, operands) = expr {
        if let [numer, denom] = operands.as_slice() {
            return (numer.clone(), denom.clone());
        }
    }

    (expr.clone(), Expr::one())
}

/// Creates an [`Expr`] representing a fraction with the given numerator and denominator.
///
/// A denominator of `1` produces the bare numerator.
pub(crate) fn make_fraction(numerator: Expr, denominator: Expr) -> Expr {
    if denominator.is_one() {
        numerator
    } else {
        numerator / denominator
    }
}

/// Rewrites a sum containing fractions as a single fraction over the common denominator.
///
/// Each term is scaled by the denominators of the other terms, so `a/d + b` becomes
/// `(a + b*d)/d`. Recurses into children when the node itself is not such a sum. Returns `None`
/// once no sum holding a fraction remains anywhere in the expression.
pub fn consolidate(expr: &Expr) -> Option<Expr> {
    if let Expr::Operator(OpKind::Add, terms) = expr {
        let has_fraction = terms
            .iter()
            .any(|t| matches!(t, Expr::Operator(OpKind::Divide, _)));
        if has_fraction && terms.len() > 1 {
            let parts: Vec<(Expr, Expr)> = terms.iter().map(split).collect();

            let mut denominators: Vec<Expr> = Vec::new();
            for (_, denom) in &parts {
                if !denom.is_one() && !denominators.contains(denom) {
                    denominators.push(denom.clone());
                }
            }

            let common = Expr::Operator(OpKind::Multiply, denominators.clone()).downgrade();
            let scaled = parts
                .into_iter()
                .map(|(numer, denom)| {
                    let others: Vec<Expr> = denominators
                        .iter()
                        .filter(|d| **d != denom)
                        .cloned()
                        .collect();
                    let mut factors = vec![numer];
                    factors.extend(others);
                    Expr::Operator(OpKind::Multiply, factors).downgrade()
                })
                .collect();

            let numerator = Expr::Operator(OpKind::Add, scaled).downgrade();
            return Some(make_fraction(numerator, common));
        }
    }

    if let Expr::Operator(kind, operands) = expr {
        let mut changed = false;
        let rewritten = operands
            .iter()
            .map(|operand| match consolidate(operand) {
                Some(new) => {
                    changed = true;
                    new
                },
                None => operand.clone(),
            })
            .collect();
        if changed {
            return Some(Expr::Operator(*kind, rewritten));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn mixed_terms_scale_onto_common_denominator() {
        let expr = Expr::Operator(OpKind::Add, vec![
            Expr::symbol("a") / Expr::symbol("d"),
            Expr::symbol("b"),
        ]);
        assert_eq!(
            consolidate(&expr),
            Some(
                (Expr::symbol("a") + Expr::symbol("b") * Expr::symbol("d"))
                    / Expr::symbol("d"),
            ),
        );
    }

    #[test]
    fn distinct_denominators_cross_multiply() {
        let expr = Expr::Operator(OpKind::Add, vec![
            Expr::symbol("a") / Expr::symbol("c"),
            Expr::symbol("b") / Expr::symbol("d"),
        ]);
        assert_eq!(
            consolidate(&expr),
            Some(
                (Expr::symbol("a") * Expr::symbol("d") + Expr::symbol("b") * Expr::symbol("c"))
                    / (Expr::symbol("c") * Expr::symbol("d")),
            ),
        );
    }

    #[test]
    fn plain_sum_untouched() {
        let expr = Expr::symbol("a") + Expr::symbol("b");
        assert_eq!(consolidate(&expr), None);
    }
}
