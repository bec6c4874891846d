//! Simplification rules for products.
//!
//! Products normalize to a flat factor list with at most one leading rational coefficient,
//! embedded fractions hoisted into a single enclosing fraction, sums distributed, repeated bases
//! merged into powers, and factors in canonical order. Together with the addition rules this
//! drives every product toward the expanded sum-of-products shape that structural equality
//! depends on.

use crate::{Expr, OpKind};
use crate::primitive::rat;
use super::do_multiply;

/// `a*(b*c) = a*b*c`
pub fn flatten(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        if !factors.iter().any(|f| matches!(f, Expr::Operator(OpKind::Multiply, _))) {
            return None;
        }

        let mut flattened = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                Expr::Operator(OpKind::Multiply, inner) => flattened.extend(inner.iter().cloned()),
                other => flattened.push(other.clone()),
            }
        }
        Some(Expr::Operator(OpKind::Multiply, flattened).downgrade())
    })
}

/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        if factors.iter().any(|f| f.is_zero()) {
            Some(Expr::zero())
        } else {
            None
        }
    })
}

/// Folds all constant factors into a single leading coefficient and drops a coefficient of one.
pub fn collect_constants(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        let constants = factors.iter().filter(|f| f.as_constant().is_some()).count();
        let has_unit = factors.iter().any(|f| f.is_one());
        if constants < 2 && !has_unit {
            return None;
        }

        let mut coefficient = rat(1);
        let mut rest = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor.as_constant() {
                Some(value) => coefficient *= value,
                None => rest.push(factor.clone()),
            }
        }

        if coefficient != 1 || rest.is_empty() {
            rest.insert(0, Expr::Constant(coefficient));
        }
        Some(Expr::Operator(OpKind::Multiply, rest).downgrade())
    })
}

/// `a*(b/c) = (a*b)/c`, merging every fraction among the factors into one.
pub fn pull_fraction(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        if !factors.iter().any(|f| matches!(f, Expr::Operator(OpKind::Divide, _))) {
            return None;
        }

        let mut numerator = Vec::with_capacity(factors.len());
        let mut denominator = Vec::new();
        for factor in factors {
            match factor {
                Expr::Operator(OpKind::Divide, operands) => {
                    let [numer, denom] = operands.as_slice() else { return None };
                    numerator.push(numer.clone());
                    denominator.push(denom.clone());
                },
                other => numerator.push(other.clone()),
            }
        }

        Some(
            Expr::Operator(OpKind::Multiply, numerator).downgrade()
                / Expr::Operator(OpKind::Multiply, denominator).downgrade(),
        )
    })
}

/// `a*(b + c) = a*b + a*c`
///
/// One sum is expanded per application; the simplification loop finishes the job when several
/// factors are sums.
pub fn distribute(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        let sum_index = factors
            .iter()
            .position(|f| matches!(f, Expr::Operator(OpKind::Add, _)))?;
        let Expr::Operator(OpKind::Add, terms) = &factors[sum_index] else {
            return None;
        };

        let rest: Vec<_> = factors
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != sum_index)
            .map(|(_, f)| f.clone())
            .collect();

        let expanded = terms
            .iter()
            .map(|term| {
                let mut product = rest.clone();
                product.push(term.clone());
                Expr::Operator(OpKind::Multiply, product).downgrade()
            })
            .collect();
        Some(Expr::Operator(OpKind::Add, expanded).downgrade())
    })
}

/// `a*a^2 = a^3`, merging every repeated base into a single power.
///
/// Sum bases are left for [`distribute`], which would otherwise undo the merge each pass.
pub fn combine_like_factors(expr: &Expr) -> Option<Expr> {
    fn split(factor: &Expr) -> (Expr, Expr) {
        if let Expr::Operator(OpKind::Power, operands) = factor {
            if let [base, exp] = operands.as_slice() {
                return (base.clone(), exp.clone());
            }
        }
        (factor.clone(), Expr::one())
    }

    do_multiply(expr, |factors| {
        let mut bases: Vec<(Expr, Expr)> = Vec::with_capacity(factors.len());
        let mut combined = false;
        for factor in factors {
            if matches!(factor, Expr::Operator(OpKind::Add, _)) {
                bases.push((factor.clone(), Expr::one()));
                continue;
            }

            let (base, exp) = split(factor);
            match bases.iter_mut().find(|(b, _)| *b == base) {
                Some((_, total)) => {
                    let merged = match (total.as_constant(), exp.as_constant()) {
                        (Some(lhs), Some(rhs)) => Expr::Constant(lhs.clone() + rhs),
                        _ => total.clone() + exp,
                    };
                    *total = merged;
                    combined = true;
                },
                None => bases.push((base, exp)),
            }
        }

        if !combined {
            return None;
        }

        let factors = bases
            .into_iter()
            .map(|(base, exp)| if exp.is_one() { base } else { base.pow(exp) })
            .collect();
        Some(Expr::Operator(OpKind::Multiply, factors).downgrade())
    })
}

/// Reorders factors into canonical order, constants first.
pub fn sort_factors(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        if factors.windows(2).all(|pair| pair[0] <= pair[1]) {
            return None;
        }

        let mut sorted = factors.to_vec();
        sorted.sort();
        Some(Expr::Operator(OpKind::Multiply, sorted))
    })
}

/// Applies all product rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    flatten(expr)
        .or_else(|| multiply_zero(expr))
        .or_else(|| collect_constants(expr))
        .or_else(|| pull_fraction(expr))
        .or_else(|| distribute(expr))
        .or_else(|| combine_like_factors(expr))
        .or_else(|| sort_factors(expr))
}
