//! Normalization rules for division.
//!
//! In canonical form a division node survives only with a non-constant denominator: constant
//! denominators fold into a rational coefficient, nested fractions flatten into a single one, and
//! a zero numerator collapses. A symbolic denominator is assumed nonzero (the optimistic policy
//! matrix inversion relies on); only the exact zero constant is an error, caught by folding or by
//! [`constant_denominator`].

use crate::{Expr, ExprError, OpKind, Result};
use crate::primitive::rat;
use super::do_divide;

/// `a / c = (1/c)*a` for a constant `c`; `a / 0` is an error.
pub fn constant_denominator(expr: &Expr) -> Result<Option<Expr>> {
    let Expr::Operator(OpKind::Divide, operands) = expr else {
        return Ok(None);
    };
    let [numer, denom] = operands.as_slice() else {
        return Ok(None);
    };
    let Some(value) = denom.as_constant() else {
        return Ok(None);
    };

    if *value == 0 {
        return Err(ExprError::DivisionByZero);
    }

    let reciprocal = rat(1) / value.clone();
    Ok(Some(Expr::Constant(reciprocal) * numer.clone()))
}

/// `0 / a = 0`
pub fn zero_numerator(expr: &Expr) -> Option<Expr> {
    do_divide(expr, |numer, _| {
        if numer.is_zero() {
            Some(Expr::zero())
        } else {
            None
        }
    })
}

/// `a / a = 1` for structurally equal operands.
///
/// Both operands are normalized by the time they compare equal, so this is the same oracle the
/// matrix layer uses for pivot tests.
pub fn divide_self(expr: &Expr) -> Option<Expr> {
    do_divide(expr, |numer, denom| {
        if numer == denom {
            Some(Expr::one())
        } else {
            None
        }
    })
}

/// Splits a factor into its base and exponent.
fn split_power(factor: &Expr) -> (Expr, Expr) {
    if let Expr::Operator(OpKind::Power, operands) = factor {
        if let [base, exp] = operands.as_slice() {
            return (base.clone(), exp.clone());
        }
    }
    (factor.clone(), Expr::one())
}

fn factor_list(expr: &Expr) -> Vec<(Expr, Expr)> {
    match expr {
        Expr::Operator(OpKind::Multiply, factors) => factors.iter().map(split_power).collect(),
        other => vec![split_power(other)],
    }
}

fn rebuild(factors: Vec<(Expr, Expr)>) -> Expr {
    let factors = factors
        .into_iter()
        .map(|(base, exp)| if exp.is_one() { base } else { base.pow(exp) })
        .collect();
    Expr::Operator(OpKind::Multiply, factors).downgrade()
}

/// `(a*b)/a = b`, cancelling symbolic factors shared between numerator and denominator.
///
/// Matching bases have their exponents subtracted. A symbolic base is assumed nonzero, the same
/// optimistic policy the matrix layer applies to symbolic pivots and determinants. Constant
/// bases are left for folding.
pub fn cancel_common_factors(expr: &Expr) -> Option<Expr> {
    do_divide(expr, |numer, denom| {
        let mut numer_factors = factor_list(numer);
        let mut denom_factors = factor_list(denom);
        let mut cancelled = false;

        denom_factors.retain(|(base, denom_exp)| {
            if base.as_constant().is_some() {
                return true;
            }
            let Some((_, numer_exp)) = numer_factors.iter_mut().find(|(b, _)| b == base) else {
                return true;
            };

            *numer_exp = match (numer_exp.as_constant(), denom_exp.as_constant()) {
                (Some(lhs), Some(rhs)) => Expr::Constant(lhs.clone() - rhs),
                _ => numer_exp.clone() - denom_exp.clone(),
            };
            cancelled = true;
            false
        });

        if !cancelled {
            return None;
        }

        numer_factors.retain(|(_, exp)| !exp.is_zero());
        let numer = rebuild(numer_factors);
        if denom_factors.is_empty() {
            Some(numer)
        } else {
            Some(numer / rebuild(denom_factors))
        }
    })
}

/// `(a/b)/c = a/(b*c)` and `a/(b/c) = (a*c)/b`
pub fn flatten_nested(expr: &Expr) -> Option<Expr> {
    do_divide(expr, |numer, denom| {
        if let Expr::Operator(OpKind::Divide, inner) = numer {
            let [a, b] = inner.as_slice() else { return None };
            return Some(a.clone() / (b.clone() * denom.clone()));
        }

        if let Expr::Operator(OpKind::Divide, inner) = denom {
            let [b, c] = inner.as_slice() else { return None };
            return Some((numer.clone() * c.clone()) / b.clone());
        }

        None
    })
}

/// Applies all division rules.
pub fn all(expr: &Expr) -> Result<Option<Expr>> {
    if let Some(expr) = constant_denominator(expr)? {
        return Ok(Some(expr));
    }
    Ok(zero_numerator(expr)
        .or_else(|| divide_self(expr))
        .or_else(|| cancel_common_factors(expr))
        .or_else(|| flatten_nested(expr)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn constant_denominator_becomes_coefficient() {
        let expr = Expr::symbol("x") / Expr::int(4);
        assert_eq!(
            constant_denominator(&expr).unwrap(),
            Some(Expr::rational(1, 4) * Expr::symbol("x")),
        );
    }

    #[test]
    fn zero_denominator_is_an_error() {
        let expr = Expr::symbol("x") / Expr::zero();
        assert_eq!(constant_denominator(&expr), Err(ExprError::DivisionByZero));
    }

    #[test]
    fn shared_factors_cancel() {
        let expr = (Expr::symbol("a") * Expr::symbol("b")) / Expr::symbol("a");
        assert_eq!(cancel_common_factors(&expr), Some(Expr::symbol("b")));
    }

    #[test]
    fn cancellation_moves_deficit_to_denominator() {
        let expr = Expr::symbol("a") / (Expr::symbol("a") * Expr::symbol("b"));
        assert_eq!(
            cancel_common_factors(&expr),
            Some(Expr::one() / Expr::symbol("b")),
        );
    }

    #[test]
    fn nested_fractions_flatten() {
        let expr = (Expr::symbol("a") / Expr::symbol("b")) / Expr::symbol("c");
        assert_eq!(
            flatten_nested(&expr),
            Some(Expr::symbol("a") / (Expr::symbol("b") * Expr::symbol("c"))),
        );
    }
}
