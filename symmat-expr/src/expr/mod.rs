//! The expression representation used by every symbolic operation in this crate.
//!
//! An [`Expr`] is an immutable tagged variant: an exact rational constant, a named symbol, or an
//! operator applied to an ordered list of operands. The operator set is the closed enumeration
//! [`OpKind`]; matching on it is exhaustive, so adding an operator forces every consumer to handle
//! it.
//!
//! # Canonical form and equality
//!
//! The derived [`PartialEq`] implements plain structural equality. On arbitrary expressions this
//! is too strict to be useful (`x + 1` and `1 + x` are structurally different), so the crate
//! defines a *canonical form*, produced by [`simplify`](crate::simplify()): constants folded,
//! negation and subtraction lowered into rational coefficients, products distributed over sums,
//! like terms and factors combined, and the operands of sums and products sorted by the derived
//! total order ([`Ord`]). Two semantically equal expressions normalize to the same tree, making
//! structural equality the correctness oracle everywhere downstream (pivot zero-tests, solution
//! verification).

use crate::primitive::rat;
use rug::Rational;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// The closed set of operators an [`Expr::Operator`] node can hold.
///
/// `Add` and `Multiply` are n-ary (their operand lists may hold any number of operands two or
/// more); `Subtract`, `Divide` and `Power` are binary; `Negate` is unary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Negate,
}

impl OpKind {
    /// Printing precedence, higher binds tighter.
    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
            Self::Negate => 3,
            Self::Power => 4,
        }
    }
}

/// An immutable symbolic expression.
///
/// Construct leaves with [`Expr::int`], [`Expr::rational`] and [`Expr::symbol`], and compound
/// expressions with the arithmetic operators (`+`, `-`, `*`, `/`, unary `-`) and [`Expr::pow`].
/// Construction performs no simplification beyond flattening nested sums and products; call
/// [`simplify`](crate::simplify()) to normalize.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// An exact rational constant, such as `2` or `-1/3`.
    Constant(Rational),

    /// A named symbol, such as `a` or `n_1`.
    Symbol(String),

    /// An operator applied to an ordered list of operands.
    Operator(OpKind, Vec<Expr>),
}

impl Expr {
    /// The constant `0`.
    pub fn zero() -> Self {
        Self::Constant(rat(0))
    }

    /// The constant `1`.
    pub fn one() -> Self {
        Self::Constant(rat(1))
    }

    /// The constant `-1`.
    pub fn minus_one() -> Self {
        Self::Constant(rat(-1))
    }

    /// Creates a constant expression with the given integer value.
    pub fn int(n: i64) -> Self {
        Self::Constant(rat(n))
    }

    /// Creates a constant expression with the given numerator and denominator.
    ///
    /// The denominator must be nonzero.
    pub fn rational(numer: i64, denom: i64) -> Self {
        Self::Constant(crate::primitive::frac(numer, denom))
    }

    /// Creates a symbol expression with the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: Expr) -> Self {
        Self::Operator(OpKind::Power, vec![self, exp])
    }

    /// If the expression is a constant, returns a reference to the contained rational.
    pub fn as_constant(&self) -> Option<&Rational> {
        match self {
            Self::Constant(value) => Some(value),
            _ => None,
        }
    }

    /// If the expression is a constant, returns the contained rational.
    pub fn into_constant(self) -> Option<Rational> {
        match self {
            Self::Constant(value) => Some(value),
            _ => None,
        }
    }

    /// If the expression is a symbol, returns its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if the expression is the normalized zero constant.
    pub fn is_zero(&self) -> bool {
        self.as_constant().map(|value| *value == 0).unwrap_or(false)
    }

    /// Returns true if the expression is the normalized one constant.
    pub fn is_one(&self) -> bool {
        self.as_constant().map(|value| *value == 1).unwrap_or(false)
    }

    /// Returns true if the expression is a constant, or the negation of one.
    ///
    /// The `-constant` shape appears in unnormalized input (a sign key pressed before a digit);
    /// normalization folds it into the rational's sign.
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Constant(_) => true,
            Self::Operator(OpKind::Negate, operands) => {
                matches!(operands.as_slice(), [Self::Constant(_)])
            },
            _ => false,
        }
    }

    /// Returns true if any [`Expr::Symbol`] occurs anywhere in the expression tree.
    pub fn contains_symbols(&self) -> bool {
        match self {
            Self::Constant(_) => false,
            Self::Symbol(_) => true,
            Self::Operator(_, operands) => operands.iter().any(Expr::contains_symbols),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Rewrite rules may leave an [`OpKind::Add`] with zero / one operand, or an
    /// [`OpKind::Multiply`] with zero / one operand. This function collapses those cases into the
    /// single operand, or the identity constant of the operation.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Operator(OpKind::Add, mut terms) => {
                if terms.is_empty() {
                    Self::zero()
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Operator(OpKind::Add, terms)
                }
            },
            Self::Operator(OpKind::Multiply, mut factors) => {
                if factors.is_empty() {
                    Self::one()
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Operator(OpKind::Multiply, factors)
                }
            },
            expr => expr,
        }
    }

    /// Writes a child expression, parenthesized if it binds looser than the parent operator.
    fn fmt_child(child: &Expr, parent: OpKind, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let needs_parens = match child {
            Expr::Operator(kind, _) => kind.precedence() <= parent.precedence(),
            Expr::Constant(value) => *value < 0 && parent != OpKind::Add,
            Expr::Symbol(_) => false,
        };

        if needs_parens {
            write!(f, "({})", child)
        } else {
            write!(f, "{}", child)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => write!(f, "{}", value),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Operator(kind, operands) => match kind {
                OpKind::Add | OpKind::Multiply => {
                    let separator = if *kind == OpKind::Add { " + " } else { " * " };
                    let mut iter = operands.iter();
                    if let Some(operand) = iter.next() {
                        Self::fmt_child(operand, *kind, f)?;
                        for operand in iter {
                            write!(f, "{}", separator)?;
                            Self::fmt_child(operand, *kind, f)?;
                        }
                    }
                    Ok(())
                },
                OpKind::Subtract | OpKind::Divide | OpKind::Power => {
                    let symbol = match kind {
                        OpKind::Subtract => " - ",
                        OpKind::Divide => "/",
                        _ => "^",
                    };
                    // joining over the whole list keeps formatting total for hand-built nodes
                    // that do not carry exactly two operands
                    let mut iter = operands.iter();
                    if let Some(operand) = iter.next() {
                        Self::fmt_child(operand, *kind, f)?;
                        for operand in iter {
                            write!(f, "{}", symbol)?;
                            Self::fmt_child(operand, *kind, f)?;
                        }
                    }
                    Ok(())
                },
                OpKind::Negate => {
                    write!(f, "-")?;
                    for operand in operands {
                        Self::fmt_child(operand, *kind, f)?;
                    }
                    Ok(())
                },
            },
        }
    }
}

/// Adds two expressions. No simplification is done, except that operands which are themselves
/// sums are combined into one flat list of terms.
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Operator(OpKind::Add, mut terms), Self::Operator(OpKind::Add, rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Operator(OpKind::Add, terms)
            },
            (Self::Operator(OpKind::Add, mut terms), other) => {
                terms.push(other);
                Self::Operator(OpKind::Add, terms)
            },
            (other, Self::Operator(OpKind::Add, mut terms)) => {
                terms.insert(0, other);
                Self::Operator(OpKind::Add, terms)
            },
            (lhs, rhs) => Self::Operator(OpKind::Add, vec![lhs, rhs]),
        }
    }
}

/// Multiplies two expressions. No simplification is done, except that operands which are
/// themselves products are combined into one flat list of factors.
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (
                Self::Operator(OpKind::Multiply, mut factors),
                Self::Operator(OpKind::Multiply, rhs_factors),
            ) => {
                factors.extend(rhs_factors);
                Self::Operator(OpKind::Multiply, factors)
            },
            (Self::Operator(OpKind::Multiply, mut factors), other) => {
                factors.push(other);
                Self::Operator(OpKind::Multiply, factors)
            },
            (other, Self::Operator(OpKind::Multiply, mut factors)) => {
                factors.insert(0, other);
                Self::Operator(OpKind::Multiply, factors)
            },
            (lhs, rhs) => Self::Operator(OpKind::Multiply, vec![lhs, rhs]),
        }
    }
}

impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Operator(OpKind::Subtract, vec![self, rhs])
    }
}

impl Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self::Operator(OpKind::Divide, vec![self, rhs])
    }
}

/// Negates an expression. Constants are negated in place; anything else is wrapped in an
/// [`OpKind::Negate`] node, which normalization lowers into the term's rational coefficient.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Constant(value) => Self::Constant(-value),
            expr => Self::Operator(OpKind::Negate, vec![expr]),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn flattening_on_construction() {
        let expr = (Expr::symbol("x") + Expr::symbol("y")) + Expr::symbol("z");
        assert_eq!(expr, Expr::Operator(OpKind::Add, vec![
            Expr::symbol("x"),
            Expr::symbol("y"),
            Expr::symbol("z"),
        ]));
    }

    #[test]
    fn constant_queries() {
        assert!(Expr::zero().is_zero());
        assert!(Expr::one().is_one());
        assert!(Expr::rational(-3, 4).is_constant());
        assert!((-Expr::symbol("x")).is_constant() == false);
        // the `-constant` shape counts as constant before normalization
        assert!(Expr::Operator(OpKind::Negate, vec![Expr::int(5)]).is_constant());
    }

    #[test]
    fn negating_a_constant_folds() {
        assert_eq!(-Expr::int(5), Expr::int(-5));
        assert_eq!(-Expr::rational(1, 2), Expr::rational(-1, 2));
    }

    #[test]
    fn contains_symbols() {
        let expr = Expr::int(2) * Expr::symbol("a") + Expr::int(1);
        assert!(expr.contains_symbols());
        let expr = (Expr::int(2) + Expr::rational(1, 3)).pow(Expr::int(2));
        assert!(!expr.contains_symbols());
    }

    #[test]
    fn leaf_accessors() {
        assert_eq!(Expr::symbol("a").as_symbol(), Some("a"));
        assert_eq!(Expr::int(2).as_symbol(), None);
        assert_eq!(
            Expr::rational(1, 2).into_constant(),
            Some(crate::primitive::frac(1, 2)),
        );
        assert_eq!(Expr::symbol("a").into_constant(), None);
    }

    #[test]
    fn fmt_expr() {
        let expr = (Expr::symbol("a") + Expr::symbol("b")) * Expr::symbol("c");
        assert_eq!(expr.to_string(), "(a + b) * c");

        let expr = Expr::symbol("x").pow(Expr::int(2)) / (Expr::symbol("y") + Expr::int(1));
        assert_eq!(expr.to_string(), "x^2/(y + 1)");

        let expr = Expr::int(-2) * Expr::symbol("x");
        assert_eq!(expr.to_string(), "(-2) * x");
    }

    #[test]
    fn fmt_tolerates_malformed_arity() {
        let expr = Expr::Operator(OpKind::Divide, vec![Expr::symbol("x")]);
        assert_eq!(expr.to_string(), "x");

        let expr = Expr::Operator(OpKind::Negate, vec![]);
        assert_eq!(expr.to_string(), "-");
    }
}
