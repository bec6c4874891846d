//! Solving matrix equations of the form `A*X = B`.
//!
//! The solver eliminates the augmented system with [`bareiss`], classifies the solution space by
//! comparing the recomputed product against the original right-hand side, and resolves the
//! remaining ambiguity by rewriting the equation in vector form, assigning free parameters to
//! pivotless unknowns, and back-substituting. Rank deficiency and inconsistency are reported as
//! [`SolutionType`] values, never as errors.

use crate::eliminate::bareiss;
use crate::{Matrix, Result};
use std::fmt::{Display, Formatter};
use symmat_expr::{simplify, Expr};

/// Classification of the solution space of a matrix equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolutionType {
    /// Exactly one solution.
    Unique,

    /// Infinitely many solutions, parameterized by free parameters.
    Infinite,

    /// The equation is inconsistent.
    NoSolution,

    /// Either unique or infinite; intermediate state resolved by free-parameter assignment.
    UniqueOrInfinite,

    /// Either infinite or inconsistent; symbolic coefficients kept the comparison undecidable.
    InfiniteOrNone,
}

impl Display for SolutionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unique => "SPD",
            Self::Infinite => "SPI",
            Self::NoSolution => "SI",
            Self::UniqueOrInfinite => "SPD or SPI",
            Self::InfiniteOrNone => "SPI or SI",
        };
        write!(f, "{}", name)
    }
}

/// The result of solving a matrix equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The eliminated coefficient matrix.
    pub eliminated_coefficient: Matrix,

    /// The eliminated right-hand side.
    pub eliminated_rhs: Matrix,

    /// The general solution, absent when the equation is inconsistent or undecidable.
    pub solution: Option<Matrix>,

    /// The classification of the solution space.
    pub kind: SolutionType,

    /// The names of the free parameters introduced, in introduction order.
    pub free_parameters: Vec<String>,
}

/// Compares the eliminated and recomputed system against the original right-hand side.
///
/// Rows beyond the eliminated coefficient block with a nonzero right-hand entry make the system
/// inconsistent outright. Otherwise each entry of `A*X'` is compared against `B`: a mismatch
/// with both sides symbol-free is inconsistency, a mismatch involving symbols is undecidable,
/// and full agreement leaves the unique-or-infinite question to free-parameter assignment.
fn classify(rhs: &Matrix, elim_cols: usize, elim_rhs: &Matrix, recomputed: &Matrix) -> SolutionType {
    for row in elim_cols..elim_rhs.rows() {
        for col in 0..elim_rhs.cols() {
            if !elim_rhs.entry(row, col).is_zero() {
                return SolutionType::NoSolution;
            }
        }
    }

    let mut ambiguous = false;
    for row in 0..rhs.rows() {
        for col in 0..rhs.cols() {
            let expected = rhs.entry(row, col);
            let actual = recomputed.entry(row, col);
            if expected != actual {
                if !expected.contains_symbols() && !actual.contains_symbols() {
                    return SolutionType::NoSolution;
                }
                ambiguous = true;
            }
        }
    }

    if ambiguous {
        SolutionType::InfiniteOrNone
    } else {
        SolutionType::UniqueOrInfinite
    }
}

/// Rewrites `A*X = B` with `A` m-by-p and `X` p-by-n as an equivalent vector equation: `X`
/// flattens row-major into a length `p*n` vector and `A` expands to shape `(m*n)`-by-`(p*n)`,
/// placing each coefficient of `A` at the columns whose unknown shares its column of `X`.
fn vector_form(elim_a: &Matrix, candidate: &Matrix) -> Result<(Matrix, Vec<Expr>)> {
    let (rows_a, cols_a) = elim_a.dims();
    let cols_x = candidate.cols();

    let vector: Vec<Expr> = candidate.as_rows().iter().flatten().cloned().collect();

    let mut expanded = Matrix::zero(rows_a * cols_x, cols_a * cols_x)?;
    for new_row in 0..rows_a * cols_x {
        let row_a = new_row / cols_x;
        let col_x = new_row % cols_x;
        for slot in 0..vector.len() {
            if slot % cols_x == col_x {
                expanded.data[new_row][slot] = elim_a.entry(row_a, slot / cols_x).clone();
            }
        }
    }

    Ok((expanded.simplified()?, vector))
}

/// Assigns free parameters to pivotless unknowns and back-substitutes the rest.
///
/// An unknown whose index has no usable diagonal pivot becomes a fresh symbol (`n_1`, `n_2`, ...
/// in introduction order), which makes the classification [`SolutionType::Infinite`]. Dependent
/// unknowns are then resolved from the last pivot row upward by subtracting the contributions of
/// later columns.
fn general_vector(
    expanded: &Matrix,
    vector: &mut [Expr],
) -> Result<(SolutionType, Vec<String>)> {
    let (rows, cols) = expanded.dims();
    let min_dim = rows.min(cols);

    let mut kind = SolutionType::Unique;
    let mut free_parameters = Vec::new();
    for slot in 0..vector.len() {
        if slot >= min_dim || expanded.entry(slot, slot).is_zero() {
            kind = SolutionType::Infinite;
            let name = format!("n_{}", free_parameters.len() + 1);
            log::trace!("unknown {slot} has no pivot, assigning free parameter {name}");
            vector[slot] = Expr::symbol(name.as_str());
            free_parameters.push(name);
        }
    }

    let last = vector.len().min(rows) - 1;
    for row in (0..=last).rev() {
        for col in (row + 1..cols).rev() {
            let entry = vector[row].clone()
                - expanded.entry(row, col).clone() * vector[col].clone();
            vector[row] = simplify(&entry)?;
        }
    }

    Ok((kind, free_parameters))
}

/// Regroups a row-major vector of unknowns into a matrix with the given column count.
fn devectorize(vector: Vec<Expr>, cols: usize) -> Result<Matrix> {
    let data = vector.chunks(cols).map(<[Expr]>::to_vec).collect();
    Matrix::new(data)
}

/// Solves `A*X = B` for `X`, or `X*A = B` when `transposed` is set.
///
/// The transposed orientation is handled by transposing both operands, solving, and transposing
/// the coefficient and solution matrices back. Shape disagreement between the operands is a hard
/// [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch); every rank or
/// consistency outcome is data in the returned [`Solution`].
pub fn solve_equation(a: &Matrix, b: &Matrix, transposed: bool) -> Result<Solution> {
    let (a, b) = if transposed {
        (a.transpose(), b.transpose())
    } else {
        (a.clone(), b.clone())
    };

    let (eliminated_coefficient, eliminated_rhs) = bareiss(&a, &b)?;

    // reshape the eliminated right block to the p-by-n solution shape before verification
    let candidate = eliminated_rhs.resized(a.cols(), b.cols())?;
    let recomputed = a.mul(&candidate)?;
    let rhs = b.simplified()?;

    let mut kind = classify(&rhs, eliminated_coefficient.cols(), &eliminated_rhs, &recomputed);
    log::debug!("classified system as {kind}");

    let mut solution = None;
    let mut free_parameters = Vec::new();
    if kind == SolutionType::UniqueOrInfinite {
        let (expanded, mut vector) = vector_form(&eliminated_coefficient, &candidate)?;
        let (resolved, parameters) = general_vector(&expanded, &mut vector)?;
        kind = resolved;
        free_parameters = parameters;
        solution = Some(devectorize(vector, candidate.cols())?.simplified()?);
    }

    let (eliminated_coefficient, solution) = if transposed {
        (
            eliminated_coefficient.transpose(),
            solution.map(|m| m.transpose()),
        )
    } else {
        (eliminated_coefficient, solution)
    };

    Ok(Solution {
        eliminated_coefficient,
        eliminated_rhs,
        solution,
        kind,
        free_parameters,
    })
}
