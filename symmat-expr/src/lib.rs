//! Exact symbolic expressions over rational numbers.
//!
//! This crate provides the [`Expr`] type, an immutable representation of mathematical expressions
//! built from exact [`rug::Rational`] constants, named symbols, and a closed set of operators, and
//! the [`simplify()`] function, which rewrites an expression into a canonical form.
//!
//! Expressions are values: no operation ever mutates an existing expression, and every
//! transformation returns a new one. Structural equality ([`PartialEq`]) is only meaningful
//! between expressions that have been normalized by [`simplify()`]; the canonical form orders
//! additive terms and multiplicative factors, so two semantically equal expressions compare equal
//! after simplification.
//!
//! # Example
//!
//! ```
//! use symmat_expr::{simplify, Expr};
//!
//! // x + x + x = 3x
//! let x = Expr::symbol("x");
//! let sum = x.clone() + x.clone() + x.clone();
//! assert_eq!(
//!     simplify(&sum).unwrap(),
//!     simplify(&(Expr::int(3) * Expr::symbol("x"))).unwrap(),
//! );
//! ```

pub mod expr;
pub mod primitive;
pub mod simplify;

pub use expr::{Expr, OpKind};
pub use simplify::{simplify, simplify_inversion};

/// Error type for expression arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExprError {
    /// Division by the zero constant was attempted during simplification.
    #[error("division by zero")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, ExprError>;
