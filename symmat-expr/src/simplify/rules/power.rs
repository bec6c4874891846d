//! Normalization rules for power expressions.

use crate::{Expr, OpKind};
use super::do_power;

/// Largest integer exponent that [`expand_sum_power`] unrolls into a product.
const MAX_SUM_EXPANSION: i32 = 8;

/// `a^0 = 1`
///
/// `0^0` is defined as `1` by constant folding before this rule runs.
pub fn power_zero(expr: &Expr) -> Option<Expr> {
    do_power(expr, |_, exp| {
        if exp.is_zero() {
            Some(Expr::one())
        } else {
            None
        }
    })
}

/// `a^1 = a`
pub fn power_one(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, exp| {
        if exp.is_one() {
            Some(base.clone())
        } else {
            None
        }
    })
}

/// `1^a = 1`
pub fn power_one_left(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, _| {
        if base.is_one() {
            Some(Expr::one())
        } else {
            None
        }
    })
}

/// `0^a = 0` for constant positive `a`.
pub fn power_zero_left(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, exp| {
        if base.is_zero() && exp.as_constant().map(|value| *value > 0).unwrap_or(false) {
            Some(Expr::zero())
        } else {
            None
        }
    })
}

/// `(a^b)^c = a^(b*c)`
pub fn power_power(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, exp| {
        if let Expr::Operator(OpKind::Power, inner) = base {
            let [inner_base, inner_exp] = inner.as_slice() else { return None };
            return Some(inner_base.clone().pow(inner_exp.clone() * exp.clone()));
        }

        None
    })
}

/// `(a*b)^c = a^c * b^c`
pub fn distribute_power(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, exp| {
        if let Expr::Operator(OpKind::Multiply, factors) = base {
            let new_factors = factors.iter()
                .map(|factor| factor.clone().pow(exp.clone()))
                .collect::<Vec<_>>();
            return Some(Expr::Operator(OpKind::Multiply, new_factors));
        }

        None
    })
}

/// `(a/b)^c = a^c / b^c`
pub fn distribute_power_quotient(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, exp| {
        if let Expr::Operator(OpKind::Divide, operands) = base {
            let [numer, denom] = operands.as_slice() else { return None };
            return Some(numer.clone().pow(exp.clone()) / denom.clone().pow(exp.clone()));
        }

        None
    })
}

/// `a^-n = 1 / a^n` for constant integer `n > 0`.
///
/// Constant bases never reach this rule; folding already produced an exact rational for them.
pub fn negative_exponent(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, exp| {
        let value = exp.as_constant()?;
        if !value.is_integer() || *value >= 0 {
            return None;
        }

        let positive = Expr::Constant(-value.clone());
        Some(Expr::one() / base.clone().pow(positive))
    })
}

/// Expands a small positive integer power of a sum into a repeated product, which distribution
/// then multiplies out.
///
/// `(a+b)^2 = (a+b)*(a+b)`
pub fn expand_sum_power(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, exp| {
        if !matches!(base, Expr::Operator(OpKind::Add, _)) {
            return None;
        }

        let value = exp.as_constant()?;
        if !value.is_integer() {
            return None;
        }
        let n = value.numer().to_i32()?;
        if !(2..=MAX_SUM_EXPANSION).contains(&n) {
            return None;
        }

        let factors = std::iter::repeat(base.clone())
            .take(n as usize)
            .collect::<Vec<_>>();
        Some(Expr::Operator(OpKind::Multiply, factors))
    })
}

/// Applies all power rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    power_zero(expr)
        .or_else(|| power_one(expr))
        .or_else(|| power_one_left(expr))
        .or_else(|| power_zero_left(expr))
        .or_else(|| power_power(expr))
        .or_else(|| distribute_power(expr))
        .or_else(|| distribute_power_quotient(expr))
        .or_else(|| negative_exponent(expr))
        .or_else(|| expand_sum_power(expr))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn power_power_merges_exponents() {
        let expr = Expr::symbol("x").pow(Expr::int(2)).pow(Expr::int(3));
        assert_eq!(
            power_power(&expr),
            Some(Expr::symbol("x").pow(Expr::int(2) * Expr::int(3))),
        );
    }

    #[test]
    fn sum_power_unrolls() {
        let base = Expr::symbol("a") + Expr::symbol("b");
        let expr = base.clone().pow(Expr::int(2));
        assert_eq!(
            expand_sum_power(&expr),
            Some(Expr::Operator(OpKind::Multiply, vec![base.clone(), base])),
        );
    }

    #[test]
    fn large_sum_power_left_alone() {
        let base = Expr::symbol("a") + Expr::symbol("b");
        let expr = base.pow(Expr::int(100));
        assert_eq!(expand_sum_power(&expr), None);
    }
}
