//! Implementation of the normalization rules.
//!
//! Each rule in this module is a function that takes the expression to rewrite as an argument,
//! and returns `Some(expr)` with the rewritten expression if the rule applies, or `None` if the
//! rule does not apply. Rules that can encounter a division by the zero constant return
//! `Result<Option<Expr>>` instead.
//!
//! The rules are pure data: [`all`] applies them in a fixed order and the caller loops to a
//! fixpoint. The order matters — folding runs first so later rules see folded constants, and
//! distribution runs before factor combining so products never hold sums when factors are merged.

pub mod add;
pub mod divide;
pub mod fold;
pub mod multiply;
pub mod power;
pub mod sign;

use crate::{Expr, OpKind, Result};

/// If the expression is a sum, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &Expr, f: impl FnOnce(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Operator(OpKind::Add, terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a product, calls the given transformation function with the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &Expr, f: impl FnOnce(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Operator(OpKind::Multiply, factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a division, calls the given transformation function with the numerator
/// and denominator.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_divide(expr: &Expr, f: impl FnOnce(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Operator(OpKind::Divide, operands) = expr {
        if let [numer, denom] = operands.as_slice() {
            return f(numer, denom);
        }
    }

    None
}

/// If the expression is a power, calls the given transformation function with the base and
/// exponent.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &Expr, f: impl FnOnce(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Operator(OpKind::Power, operands) = expr {
        if let [base, exp] = operands.as_slice() {
            return f(base, exp);
        }
    }

    None
}

/// Applies all rules.
pub fn all(expr: &Expr) -> Result<Option<Expr>> {
    if let Some(expr) = fold::all(expr)? {
        return Ok(Some(expr));
    }
    if let Some(expr) = sign::all(expr) {
        return Ok(Some(expr));
    }
    if let Some(expr) = power::all(expr) {
        return Ok(Some(expr));
    }
    if let Some(expr) = divide::all(expr)? {
        return Ok(Some(expr));
    }
    if let Some(expr) = multiply::all(expr) {
        return Ok(Some(expr));
    }
    if let Some(expr) = add::all(expr) {
        return Ok(Some(expr));
    }
    Ok(None)
}
