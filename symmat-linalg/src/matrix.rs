//! Rectangular matrices of symbolic expressions.

use crate::{MatrixError, Result};
use std::fmt::{Display, Formatter};
use symmat_expr::{simplify, Expr};

/// A rectangular matrix of [`Expr`] entries.
///
/// Every row has the same length and there is at least one row and one column; [`Matrix::new`]
/// rejects anything else. All operations are pure: they allocate a new matrix and never mutate
/// their inputs. Arithmetic results are normalized entry by entry, so derived equality on two
/// results is structural equality of canonical forms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<Expr>>", into = "Vec<Vec<Expr>>")
)]
pub struct Matrix {
    pub(crate) data: Vec<Vec<Expr>>,
}

/// Validating conversion from raw rows; deserialization goes through this, so a ragged or empty
/// payload is rejected rather than constructing a matrix that breaks the shape invariant.
impl TryFrom<Vec<Vec<Expr>>> for Matrix {
    type Error = MatrixError;

    fn try_from(data: Vec<Vec<Expr>>) -> Result<Self> {
        Self::new(data)
    }
}

impl From<Matrix> for Vec<Vec<Expr>> {
    fn from(matrix: Matrix) -> Self {
        matrix.data
    }
}

impl Matrix {
    /// Creates a matrix from its rows, validating rectangularity and non-emptiness.
    pub fn new(data: Vec<Vec<Expr>>) -> Result<Self> {
        let Some(first) = data.first() else {
            return Err(MatrixError::Malformed);
        };
        if first.is_empty() || data.iter().any(|row| row.len() != first.len()) {
            return Err(MatrixError::Malformed);
        }

        Ok(Self { data })
    }

    /// Creates a matrix of the given shape filled with the zero constant.
    pub fn zero(rows: usize, cols: usize) -> Result<Self> {
        Self::new(vec![vec![Expr::zero(); cols]; rows])
    }

    /// Creates the identity matrix of the given size.
    pub fn identity(size: usize) -> Result<Self> {
        let mut matrix = Self::zero(size, size)?;
        for i in 0..size {
            matrix.data[i][i] = Expr::one();
        }
        Ok(matrix)
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.data[0].len()
    }

    /// Returns the shape as `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Returns the entry at the given row and column.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    pub fn entry(&self, row: usize, col: usize) -> &Expr {
        &self.data[row][col]
    }

    /// Returns the rows of the matrix.
    pub fn as_rows(&self) -> &[Vec<Expr>] {
        &self.data
    }

    /// Consumes the matrix, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<Expr>> {
        self.data
    }

    /// Returns true if the matrix has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Returns true if every entry is the zero constant.
    pub fn is_zero(&self) -> bool {
        self.data.iter().flatten().all(Expr::is_zero)
    }

    /// Returns a copy of the matrix with every entry normalized.
    pub fn simplified(&self) -> Result<Self> {
        let data = self
            .data
            .iter()
            .map(|row| row.iter().map(simplify).collect())
            .collect::<std::result::Result<_, _>>()?;
        Ok(Self { data })
    }

    /// Compares two matrices entry by entry after normalizing both sides.
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] when the shapes differ.
    pub fn eq_entrywise(&self, other: &Self) -> Result<bool> {
        self.check_same_shape(other, "eq_entrywise")?;
        for (lhs, rhs) in self.data.iter().flatten().zip(other.data.iter().flatten()) {
            if simplify(lhs)? != simplify(rhs)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Adds two matrices of equal shape.
    pub fn sum(&self, other: &Self) -> Result<Self> {
        self.check_same_shape(other, "sum")?;
        self.zip_entries(other, |lhs, rhs| lhs.clone() + rhs.clone())
    }

    /// Subtracts a matrix of equal shape from this one.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.check_same_shape(other, "sub")?;
        self.zip_entries(other, |lhs, rhs| lhs.clone() - rhs.clone())
    }

    /// Multiplies two matrices, requiring `self.cols() == other.rows()`.
    ///
    /// Each entry is the normalized sum of products across the shared dimension.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        if self.cols() != other.rows() {
            return Err(MatrixError::DimensionMismatch {
                operation: "mul",
                left: self.dims(),
                right: other.dims(),
            });
        }

        let mut data = Vec::with_capacity(self.rows());
        for i in 0..self.rows() {
            let mut row = Vec::with_capacity(other.cols());
            for j in 0..other.cols() {
                let mut entry = Expr::zero();
                for k in 0..self.cols() {
                    entry = entry + self.data[i][k].clone() * other.data[k][j].clone();
                }
                row.push(simplify(&entry)?);
            }
            data.push(row);
        }
        Ok(Self { data })
    }

    /// Multiplies every entry by the given expression.
    pub fn scalar_mul(&self, scalar: &Expr) -> Result<Self> {
        let data = self
            .data
            .iter()
            .map(|row| {
                row.iter()
                    .map(|entry| simplify(&(scalar.clone() * entry.clone())))
                    .collect()
            })
            .collect::<std::result::Result<_, _>>()?;
        Ok(Self { data })
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        let data = (0..self.cols())
            .map(|j| (0..self.rows()).map(|i| self.data[i][j].clone()).collect())
            .collect();
        Self { data }
    }

    /// Returns a copy reshaped to the given dimensions, truncating extra entries and padding
    /// missing ones with the zero constant.
    pub fn resized(&self, rows: usize, cols: usize) -> Result<Self> {
        let mut resized = Self::zero(rows, cols)?;
        for i in 0..rows.min(self.rows()) {
            for j in 0..cols.min(self.cols()) {
                resized.data[i][j] = self.data[i][j].clone();
            }
        }
        Ok(resized)
    }

    fn check_same_shape(&self, other: &Self, operation: &'static str) -> Result<()> {
        if self.dims() == other.dims() {
            Ok(())
        } else {
            Err(MatrixError::DimensionMismatch {
                operation,
                left: self.dims(),
                right: other.dims(),
            })
        }
    }

    fn zip_entries(&self, other: &Self, f: impl Fn(&Expr, &Expr) -> Expr) -> Result<Self> {
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(lhs_row, rhs_row)| {
                lhs_row
                    .iter()
                    .zip(rhs_row)
                    .map(|(lhs, rhs)| simplify(&f(lhs, rhs)))
                    .collect()
            })
            .collect::<std::result::Result<_, _>>()?;
        Ok(Self { data })
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.data.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (j, entry) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", entry)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
