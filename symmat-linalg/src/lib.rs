//! Exact linear algebra over symbolic expression matrices.
//!
//! Provides dimension-checked matrix arithmetic, fraction-free (Bareiss) and partial Gaussian
//! elimination, cofactor determinants with adjugate-based inversion, and a matrix-equation solver
//! that classifies the solution space of `A*X = B` and produces general solutions with free
//! parameters:
//!
//! ```
//! use symmat_expr::Expr;
//! use symmat_linalg::{solve_equation, Matrix, SolutionType};
//!
//! let a = Matrix::new(vec![
//!     vec![Expr::int(2), Expr::zero()],
//!     vec![Expr::zero(), Expr::int(2)],
//! ]).unwrap();
//! let b = Matrix::new(vec![
//!     vec![Expr::int(4)],
//!     vec![Expr::int(6)],
//! ]).unwrap();
//!
//! let result = solve_equation(&a, &b, false).unwrap();
//! assert_eq!(result.kind, SolutionType::Unique);
//! ```
//!
//! Rank deficiency, inconsistency, and symbolic ambiguity are reported as [`SolutionType`]
//! values, never as errors; only malformed inputs and provably singular inversions fail.

pub mod determinant;
pub mod eliminate;
pub mod matrix;
pub mod solve;

pub use determinant::{adjugate_transpose, determinant, invert, Inverse};
pub use eliminate::{bareiss, gaussian_elimination, partial_elimination, Direction, Echelon};
pub use matrix::Matrix;
pub use solve::{solve_equation, Solution, SolutionType};

use symmat_expr::ExprError;

/// Any error that can occur while operating on matrices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// The operand shapes are incompatible for the requested operation.
    #[error("dimension mismatch in {operation}: {left:?} vs {right:?}")]
    DimensionMismatch {
        /// The operation that was attempted.
        operation: &'static str,

        /// Shape of the left operand, as `(rows, cols)`.
        left: (usize, usize),

        /// Shape of the right operand, as `(rows, cols)`.
        right: (usize, usize),
    },

    /// A square matrix was required.
    #[error("matrix is not square: {rows}x{cols}")]
    NonSquare {
        /// Number of rows.
        rows: usize,

        /// Number of columns.
        cols: usize,
    },

    /// The determinant normalized to the exact zero constant during inversion.
    #[error("matrix is singular")]
    Singular,

    /// Construction from ragged rows, or from zero rows or columns.
    #[error("malformed matrix: rows must be non-empty and of equal length")]
    Malformed,

    /// An expression-level failure, such as division by the zero constant.
    #[error(transparent)]
    Expr(#[from] ExprError),
}

/// A [`Result`](std::result::Result) whose error variant is [`MatrixError`].
pub type Result<T> = std::result::Result<T, MatrixError>;
