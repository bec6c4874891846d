//! Determinants, adjugates, and exact matrix inversion.
//!
//! The determinant is computed by recursive cofactor expansion along the first column. The cost
//! is `O(n!)`; that is deliberate, since cofactor expansion keeps every intermediate value exact
//! and never assumes a pivot is invertible, at the price of only being practical for small
//! matrices (roughly n <= 8). Larger inputs should go through elimination instead.

use crate::{Matrix, MatrixError, Result};
use symmat_expr::{simplify, simplify_inversion, Expr};

fn require_square(matrix: &Matrix) -> Result<usize> {
    if matrix.is_square() {
        Ok(matrix.rows())
    } else {
        Err(MatrixError::NonSquare {
            rows: matrix.rows(),
            cols: matrix.cols(),
        })
    }
}

/// Removes the given row and column from the data.
fn minor(data: &[Vec<Expr>], row: usize, col: usize) -> Vec<Vec<Expr>> {
    data.iter()
        .enumerate()
        .filter(|(i, _)| *i != row)
        .map(|(_, entries)| {
            entries
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != col)
                .map(|(_, entry)| entry.clone())
                .collect()
        })
        .collect()
}

fn cofactor_det(data: &[Vec<Expr>]) -> Result<Expr> {
    if data.len() == 1 {
        return simplify(&data[0][0]).map_err(Into::into);
    }

    let mut det = Expr::zero();
    for (row, entries) in data.iter().enumerate() {
        let sub = cofactor_det(&minor(data, row, 0))?;
        let term = sub * entries[0].clone();
        det = if row % 2 == 0 {
            det + term
        } else {
            det + Expr::minus_one() * term
        };
    }
    simplify(&det).map_err(Into::into)
}

/// Computes the determinant by cofactor expansion along the first column.
///
/// Fails with [`MatrixError::NonSquare`] for non-square input.
pub fn determinant(matrix: &Matrix) -> Result<Expr> {
    require_square(matrix)?;
    cofactor_det(matrix.as_rows())
}

/// Computes the transposed adjugate: entry `(col, row)` is the signed determinant of the minor
/// obtained by deleting row `row` and column `col`.
pub fn adjugate_transpose(matrix: &Matrix) -> Result<Matrix> {
    let size = require_square(matrix)?;
    if size == 1 {
        return Matrix::new(vec![vec![Expr::one()]]);
    }

    let mut adj = Matrix::zero(size, size)?;
    for row in 0..size {
        for col in 0..size {
            let sub = cofactor_det(&minor(matrix.as_rows(), row, col))?;
            adj.data[col][row] = if (row + col) % 2 == 0 {
                sub
            } else {
                simplify(&(Expr::minus_one() * sub))?
            };
        }
    }
    Ok(adj)
}

/// An exact matrix inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inverse {
    /// The inverted matrix.
    pub matrix: Matrix,

    /// The determinant the inversion assumed to be nonzero, if it could not be decided.
    ///
    /// `None` for a determinant that normalized to a nonzero constant. `Some(det)` when the
    /// determinant is symbolic: the inverse is valid only where `det != 0`.
    pub condition: Option<Expr>,
}

/// Inverts the matrix by dividing its transposed adjugate by its determinant.
///
/// A determinant that normalizes to the exact zero constant fails with
/// [`MatrixError::Singular`]. A symbolic determinant cannot be decided, so inversion proceeds
/// optimistically and the returned [`Inverse`] carries it as a side condition.
pub fn invert(matrix: &Matrix) -> Result<Inverse> {
    let det = determinant(matrix)?;
    if det.is_zero() {
        return Err(MatrixError::Singular);
    }

    let condition = det.contains_symbols().then(|| det.clone());
    let mut inverse = adjugate_transpose(matrix)?;
    for row in inverse.data.iter_mut() {
        for entry in row.iter_mut() {
            *entry = simplify_inversion(&(entry.clone() / det.clone()))?;
        }
    }

    Ok(Inverse {
        matrix: inverse,
        condition,
    })
}

#[cfg(test)]
mod tests {
    use crate::eliminate::{partial_elimination, Direction};
    use pretty_assertions::assert_eq;
    use super::*;

    fn from_ints(rows: &[&[i64]]) -> Matrix {
        Matrix::new(
            rows.iter()
                .map(|row| row.iter().map(|&n| Expr::int(n)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn symbolic_two_by_two_determinant() {
        let m = Matrix::new(vec![
            vec![Expr::symbol("a"), Expr::symbol("b")],
            vec![Expr::symbol("c"), Expr::symbol("d")],
        ])
        .unwrap();
        let expected = simplify(
            &(Expr::symbol("a") * Expr::symbol("d") - Expr::symbol("b") * Expr::symbol("c")),
        )
        .unwrap();
        assert_eq!(determinant(&m).unwrap(), expected);
    }

    #[test]
    fn cofactor_determinant_matches_elimination_pivots() {
        let matrices = [
            from_ints(&[&[1, 4, 7], &[2, 5, 8], &[3, 6, 10]]),
            from_ints(&[&[2, 0], &[0, 2]]),
            from_ints(&[&[0, 1], &[1, 0]]),
            from_ints(&[&[3, 1, 4], &[1, 5, 9], &[2, 6, 5]]),
        ];

        for m in matrices {
            let echelon = partial_elimination(&m, Direction::Below).unwrap();
            let mut from_pivots = Expr::one();
            for pivot in &echelon.pivots {
                from_pivots = from_pivots * pivot.clone();
            }
            if echelon.swaps % 2 != 0 {
                from_pivots = Expr::minus_one() * from_pivots;
            }
            assert_eq!(determinant(&m).unwrap(), simplify(&from_pivots).unwrap());
        }
    }

    #[test]
    fn non_square_determinant_is_an_error() {
        let m = from_ints(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(
            determinant(&m),
            Err(MatrixError::NonSquare { rows: 2, cols: 3 }),
        );
    }

    #[test]
    fn inverse_times_original_is_identity() {
        let m = from_ints(&[&[1, 2], &[3, 4]]);
        let inverse = invert(&m).unwrap();
        assert_eq!(inverse.condition, None);
        assert_eq!(m.mul(&inverse.matrix).unwrap(), Matrix::identity(2).unwrap());
    }

    #[test]
    fn double_inversion_restores_the_matrix() {
        let m = from_ints(&[&[1, 2], &[3, 4]]);
        let inverse = invert(&m).unwrap();
        let double = invert(&inverse.matrix).unwrap();
        assert_eq!(double.matrix, m);
    }

    #[test]
    fn singular_matrix_fails() {
        let m = from_ints(&[&[1, 1], &[2, 2]]);
        assert_eq!(invert(&m), Err(MatrixError::Singular));
    }

    #[test]
    fn symbolic_inverse_carries_its_determinant_condition() {
        let m = Matrix::new(vec![
            vec![Expr::symbol("a"), Expr::symbol("b")],
            vec![Expr::symbol("c"), Expr::symbol("d")],
        ])
        .unwrap();
        let inverse = invert(&m).unwrap();
        let det = determinant(&m).unwrap();
        assert_eq!(inverse.condition, Some(det.clone()));
        assert_eq!(
            inverse.matrix.entry(0, 0),
            &simplify_inversion(&(Expr::symbol("d") / det)).unwrap(),
        );
    }

    #[test]
    fn one_by_one_inverse() {
        let m = from_ints(&[&[4]]);
        let inverse = invert(&m).unwrap();
        assert_eq!(inverse.matrix, Matrix::new(vec![vec![Expr::rational(1, 4)]]).unwrap());
    }
}
