//! Constant folding of purely-rational subexpressions.
//!
//! Every operator whose operands are all constants collapses to a single exact
//! [`rug::Rational`]. Division (or a negative power) of the zero constant is the one failure mode
//! of the whole simplifier, surfaced as [`ExprError::DivisionByZero`].

use crate::{Expr, ExprError, OpKind, Result};
use crate::primitive::rat;
use rug::{ops::Pow, Rational};

/// Collects the operand list into rationals, or bails if any operand is non-constant.
fn constant_operands(operands: &[Expr]) -> Option<Vec<&Rational>> {
    operands.iter().map(Expr::as_constant).collect()
}

/// Folds a power of two rationals. Non-integer exponents are left untouched: they have no exact
/// rational value in general.
fn fold_power(base: &Rational, exp: &Rational) -> Result<Option<Expr>> {
    if !exp.is_integer() {
        return Ok(None);
    }

    let Some(exp) = exp.numer().to_i32() else {
        return Ok(None);
    };

    if *base == 0 && exp < 0 {
        return Err(ExprError::DivisionByZero);
    }

    Ok(Some(Expr::Constant(base.clone().pow(exp))))
}

/// Folds any operator whose operands are all rational constants.
pub fn fold_constants(expr: &Expr) -> Result<Option<Expr>> {
    let Expr::Operator(kind, operands) = expr else {
        return Ok(None);
    };
    let Some(values) = constant_operands(operands) else {
        return Ok(None);
    };

    match kind {
        OpKind::Add => {
            let sum = values.into_iter().fold(rat(0), |acc, value| acc + value);
            Ok(Some(Expr::Constant(sum)))
        },
        OpKind::Multiply => {
            let product = values.into_iter().fold(rat(1), |acc, value| acc * value);
            Ok(Some(Expr::Constant(product)))
        },
        OpKind::Subtract => {
            let [lhs, rhs] = values.as_slice() else { return Ok(None) };
            Ok(Some(Expr::Constant(Rational::from(*lhs - *rhs))))
        },
        OpKind::Divide => {
            let [numer, denom] = values.as_slice() else { return Ok(None) };
            if **denom == 0 {
                return Err(ExprError::DivisionByZero);
            }
            Ok(Some(Expr::Constant(Rational::from(*numer / *denom))))
        },
        OpKind::Power => {
            let [base, exp] = values.as_slice() else { return Ok(None) };
            fold_power(base, exp)
        },
        OpKind::Negate => {
            let [value] = values.as_slice() else { return Ok(None) };
            Ok(Some(Expr::Constant(-(*value).clone())))
        },
    }
}

/// Applies all folding rules.
pub fn all(expr: &Expr) -> Result<Option<Expr>> {
    fold_constants(expr)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn folds_mixed_arithmetic() {
        let expr = Expr::int(2) + Expr::rational(1, 2);
        assert_eq!(fold_constants(&expr).unwrap(), Some(Expr::rational(5, 2)));
    }

    #[test]
    fn leaves_symbols_alone() {
        let expr = Expr::int(2) + Expr::symbol("x");
        assert_eq!(fold_constants(&expr).unwrap(), None);
    }

    #[test]
    fn zero_denominator_is_an_error() {
        let expr = Expr::one() / Expr::zero();
        assert_eq!(fold_constants(&expr), Err(ExprError::DivisionByZero));
    }

    #[test]
    fn negative_power_of_zero_is_an_error() {
        let expr = Expr::zero().pow(Expr::int(-1));
        assert_eq!(fold_constants(&expr), Err(ExprError::DivisionByZero));
    }

    #[test]
    fn non_integer_exponent_left_symbolic() {
        let expr = Expr::int(2).pow(Expr::rational(1, 2));
        assert_eq!(fold_constants(&expr).unwrap(), None);
    }
}
