//! Simplification rules for sums.
//!
//! Sums normalize to a flat term list in canonical order: like terms merge by summing their
//! rational coefficients, constant terms collapse into one, zero terms drop, and fractions over
//! the same denominator merge their numerators.

use crate::{Expr, OpKind};
use crate::primitive::rat;
use rug::Rational;
use super::do_add;

/// `a + (b + c) = a + b + c`
pub fn flatten(expr: &Expr) -> Option<Expr> {
    do_add(expr, |terms| {
        if !terms.iter().any(|t| matches!(t, Expr::Operator(OpKind::Add, _))) {
            return None;
        }

        let mut flattened = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Expr::Operator(OpKind::Add, inner) => flattened.extend(inner.iter().cloned()),
                other => flattened.push(other.clone()),
            }
        }
        Some(Expr::Operator(OpKind::Add, flattened).downgrade())
    })
}

/// Splits a term into its rational coefficient and the symbolic core it scales.
///
/// A bare constant has the core `1`, so constant terms combine through the same path as any
/// other like terms.
fn split(term: &Expr) -> (Rational, Expr) {
    match term {
        Expr::Constant(value) => (value.clone(), Expr::one()),
        Expr::Operator(OpKind::Multiply, factors) => match factors.as_slice() {
            [Expr::Constant(value), rest @ ..] => (
                value.clone(),
                Expr::Operator(OpKind::Multiply, rest.to_vec()).downgrade(),
            ),
            _ => (rat(1), term.clone()),
        },
        _ => (rat(1), term.clone()),
    }
}

fn rebuild(coefficient: Rational, core: Expr) -> Expr {
    if core.is_one() {
        Expr::Constant(coefficient)
    } else if coefficient == 1 {
        core
    } else {
        Expr::Constant(coefficient) * core
    }
}

/// `2*x + 3*x = 5*x`, merging every pair of terms that differ only in their coefficient.
///
/// Zero terms (including cancellations) drop out, and an empty sum collapses to `0`.
pub fn combine_like_terms(expr: &Expr) -> Option<Expr> {
    do_add(expr, |terms| {
        let mut cores: Vec<(Rational, Expr)> = Vec::with_capacity(terms.len());
        let mut combined = false;
        for term in terms {
            if term.is_zero() {
                combined = true;
                continue;
            }

            let (coefficient, core) = split(term);
            match cores.iter_mut().find(|(_, c)| *c == core) {
                Some((total, _)) => {
                    *total += coefficient;
                    combined = true;
                },
                None => cores.push((coefficient, core)),
            }
        }

        let dropped = cores.iter().any(|(total, _)| *total == 0);
        if !combined && !dropped {
            return None;
        }

        let terms = cores
            .into_iter()
            .filter(|(total, _)| *total != 0)
            .map(|(total, core)| rebuild(total, core))
            .collect();
        Some(Expr::Operator(OpKind::Add, terms).downgrade())
    })
}

/// `a/d + b/d = (a + b)/d`, merging terms that are fractions over the same denominator.
pub fn merge_fractions(expr: &Expr) -> Option<Expr> {
    do_add(expr, |terms| {
        let mut denominators: Vec<(Expr, Vec<Expr>)> = Vec::new();
        let mut rest = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Expr::Operator(OpKind::Divide, operands) => {
                    let [numer, denom] = operands.as_slice() else { return None };
                    match denominators.iter_mut().find(|(d, _)| d == denom) {
                        Some((_, numerators)) => numerators.push(numer.clone()),
                        None => denominators.push((denom.clone(), vec![numer.clone()])),
                    }
                },
                other => rest.push(other.clone()),
            }
        }

        if denominators.iter().all(|(_, numerators)| numerators.len() == 1) {
            return None;
        }

        for (denom, numerators) in denominators {
            rest.push(Expr::Operator(OpKind::Add, numerators).downgrade() / denom);
        }
        Some(Expr::Operator(OpKind::Add, rest).downgrade())
    })
}

/// Reorders terms into canonical order.
pub fn sort_terms(expr: &Expr) -> Option<Expr> {
    do_add(expr, |terms| {
        if terms.windows(2).all(|pair| pair[0] <= pair[1]) {
            return None;
        }

        let mut sorted = terms.to_vec();
        sorted.sort();
        Some(Expr::Operator(OpKind::Add, sorted))
    })
}

/// Applies all sum rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    flatten(expr)
        .or_else(|| combine_like_terms(expr))
        .or_else(|| merge_fractions(expr))
        .or_else(|| sort_terms(expr))
}
