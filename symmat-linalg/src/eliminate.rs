//! Gaussian and fraction-free (Bareiss) elimination.
//!
//! Both eliminators share the same pivot policy: a zero diagonal candidate triggers a downward
//! scan for a nonzero entry to swap in, and a column with no such entry is recorded as a rank
//! deficiency while elimination continues with the remaining columns. Deficiency is data for the
//! caller to classify, never an error.

use crate::{Matrix, MatrixError, Result};
use symmat_expr::{simplify, Expr};

/// Which side of the main diagonal a partial elimination clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Clear entries below the main diagonal, producing row-echelon form.
    Below,

    /// Clear entries above the main diagonal. Run after [`Direction::Below`], this produces
    /// reduced row-echelon form.
    Above,
}

/// The outcome of a partial elimination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Echelon {
    /// The eliminated matrix.
    pub matrix: Matrix,

    /// The pivot values encountered, in column order, before divide-through normalization.
    ///
    /// For a square matrix eliminated with [`Direction::Below`], the determinant is the product
    /// of these values, negated once per row swap.
    pub pivots: Vec<Expr>,

    /// The number of row swaps performed.
    pub swaps: usize,

    /// Whether some column had no usable pivot.
    pub deficient: bool,
}

/// Searches the given column downward for a row holding a nonzero entry to swap in.
fn find_pivot_row(data: &[Vec<Expr>], col: usize) -> Option<usize> {
    (col + 1..data.len()).find(|&row| !data[row][col].is_zero())
}

/// Eliminates one side of the main diagonal, normalizing each pivot row by dividing through.
///
/// Entries in the pivot column are cleared with the row combination
/// `target += (-target[col] / pivot) * pivot_row`, every touched entry normalized.
pub fn partial_elimination(matrix: &Matrix, direction: Direction) -> Result<Echelon> {
    let mut data = matrix.simplified()?.into_rows();
    let (rows, cols) = (data.len(), data[0].len());
    let min_dim = rows.min(cols);

    let columns: Vec<usize> = match direction {
        Direction::Below => (0..min_dim).collect(),
        Direction::Above => (0..min_dim).rev().collect(),
    };

    let mut pivots = Vec::with_capacity(min_dim);
    let mut swaps = 0;
    let mut deficient = false;

    for pivot_col in columns {
        if data[pivot_col][pivot_col].is_zero() {
            // above the diagonal the matrix is already echelon, so a zero diagonal entry means
            // the column has no pivot at all
            if direction == Direction::Above {
                continue;
            }

            match find_pivot_row(&data, pivot_col) {
                Some(row) => {
                    data.swap(pivot_col, row);
                    swaps += 1;
                    log::debug!("swapped rows {pivot_col} and {row} for pivot column {pivot_col}");
                },
                None => {
                    deficient = true;
                    log::debug!("no pivot in column {pivot_col}, recording rank deficiency");
                    continue;
                },
            }
        }

        let pivot = data[pivot_col][pivot_col].clone();
        pivots.push(pivot.clone());

        if !pivot.is_one() {
            for col in 0..cols {
                data[pivot_col][col] = simplify(&(data[pivot_col][col].clone() / pivot.clone()))?;
            }
        }
        let pivot = data[pivot_col][pivot_col].clone();

        let targets: Vec<usize> = match direction {
            Direction::Below => (pivot_col + 1..rows).collect(),
            Direction::Above => (0..pivot_col).rev().collect(),
        };
        for target in targets {
            let factor = simplify(
                &(Expr::minus_one() * data[target][pivot_col].clone() / pivot.clone()),
            )?;
            for col in 0..cols {
                data[target][col] = simplify(
                    &(factor.clone() * data[pivot_col][col].clone() + data[target][col].clone()),
                )?;
            }
        }
    }

    Ok(Echelon {
        matrix: Matrix::new(data)?,
        pivots,
        swaps,
        deficient,
    })
}

/// Runs both elimination passes, returning the row-echelon and reduced row-echelon forms.
pub fn gaussian_elimination(matrix: &Matrix) -> Result<(Matrix, Matrix)> {
    let echelon = partial_elimination(matrix, Direction::Below)?;
    let reduced = partial_elimination(&echelon.matrix, Direction::Above)?;
    Ok((echelon.matrix, reduced.matrix))
}

/// Rewrites each pivot row so its diagonal entry is `1`, dividing the entries to its right.
fn reduce_rows(data: &mut [Vec<Expr>]) -> Result<()> {
    let (rows, cols) = (data.len(), data[0].len());
    for row in 0..rows.min(cols) {
        let pivot = data[row][row].clone();
        if pivot.is_zero() {
            continue;
        }

        data[row][row] = Expr::one();
        for col in row + 1..cols {
            data[row][col] = simplify(&(data[row][col].clone() / pivot.clone()))?;
        }
    }
    Ok(())
}

/// Fraction-free elimination of the augmented matrix `[A|B]`.
///
/// Each round `r` rewrites every entry outside the pivot row as
/// `(m[r][r]*m[i][j] - m[r][j]*m[i][r]) / d`, where `d` is the pivot of the previous successful
/// round (no division on the first). Every intermediate value stays an exact polynomial in the
/// original entries. The result is reduced to reduced row-echelon form and split back into the
/// original block widths.
pub fn bareiss(a: &Matrix, b: &Matrix) -> Result<(Matrix, Matrix)> {
    if a.rows() != b.rows() {
        return Err(MatrixError::DimensionMismatch {
            operation: "bareiss",
            left: a.dims(),
            right: b.dims(),
        });
    }

    let split_at = a.cols();
    let mut data: Vec<Vec<Expr>> = a
        .as_rows()
        .iter()
        .zip(b.as_rows())
        .map(|(left, right)| {
            left.iter()
                .chain(right)
                .map(simplify)
                .collect::<std::result::Result<_, _>>()
        })
        .collect::<std::result::Result<_, _>>()?;

    let (rows, cols) = (data.len(), data[0].len());
    let min_dim = rows.min(cols);
    let mut prev_pivot: Option<Expr> = None;

    for r in 0..min_dim {
        if data[r][r].is_zero() {
            match find_pivot_row(&data, r) {
                Some(row) => {
                    data.swap(r, row);
                    log::debug!("swapped rows {r} and {row} for pivot column {r}");
                },
                None => {
                    log::debug!("no pivot in column {r}, recording rank deficiency");
                    continue;
                },
            }
        }

        let mut next = data.clone();
        for i in 0..rows {
            if i == r {
                continue;
            }
            for j in 0..cols {
                let numer = data[r][r].clone() * data[i][j].clone()
                    - data[r][j].clone() * data[i][r].clone();
                let entry = match &prev_pivot {
                    Some(divisor) => numer / divisor.clone(),
                    None => numer,
                };
                next[i][j] = simplify(&entry)?;
            }
        }
        data = next;
        prev_pivot = Some(data[r][r].clone());
    }

    reduce_rows(&mut data)?;

    let mut left = Vec::with_capacity(rows);
    let mut right = Vec::with_capacity(rows);
    for row in data {
        let (l, r) = row.split_at(split_at);
        left.push(l.to_vec());
        right.push(r.to_vec());
    }
    Ok((Matrix::new(left)?, Matrix::new(right)?))
}

#[cfg(test)]
mod tests {
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
    fn echelon_pivots_give_determinant() {
        let m = from_ints(&[&[1, 4, 7], &[2, 5, 8], &[3, 6, 10]]);
        let echelon = partial_elimination(&m, Direction::Below).unwrap();

        let mut det = Expr::one();
        for pivot in &echelon.pivots {
            det = det * pivot.clone();
        }
        if echelon.swaps % 2 != 0 {
            det = Expr::minus_one() * det;
        }
        assert_eq!(simplify(&det).unwrap(), Expr::int(-3));
        assert!(!echelon.deficient);
    }

    #[test]
    fn zero_pivot_triggers_row_swap() {
        let m = from_ints(&[&[0, 1], &[1, 0]]);
        let echelon = partial_elimination(&m, Direction::Below).unwrap();
        assert_eq!(echelon.swaps, 1);
        assert_eq!(echelon.matrix, Matrix::identity(2).unwrap());
    }

    #[test]
    fn pivotless_column_marks_deficiency() {
        let m = from_ints(&[&[1, 2], &[0, 0]]);
        let echelon = partial_elimination(&m, Direction::Below).unwrap();
        assert!(echelon.deficient);
        assert_eq!(echelon.matrix, from_ints(&[&[1, 2], &[0, 0]]));
    }

    #[test]
    fn gaussian_elimination_reaches_reduced_form() {
        let m = from_ints(&[&[2, 4], &[1, 3]]);
        let (_, rref) = gaussian_elimination(&m).unwrap();
        assert_eq!(rref, Matrix::identity(2).unwrap());
    }

    #[test]
    fn bareiss_solves_an_invertible_system() {
        let a = from_ints(&[&[2, 0], &[0, 2]]);
        let b = from_ints(&[&[4], &[6]]);
        let (left, right) = bareiss(&a, &b).unwrap();
        assert_eq!(left, Matrix::identity(2).unwrap());
        assert_eq!(right, from_ints(&[&[2], &[3]]));
    }

    #[test]
    fn bareiss_leaves_deficient_rows_in_place() {
        let a = from_ints(&[&[1, 1], &[2, 2]]);
        let b = from_ints(&[&[2], &[4]]);
        let (left, right) = bareiss(&a, &b).unwrap();
        assert_eq!(left, from_ints(&[&[1, 1], &[0, 0]]));
        assert_eq!(right, from_ints(&[&[2], &[0]]));
    }

    #[test]
    fn bareiss_row_count_mismatch_is_an_error() {
        let a = from_ints(&[&[1, 1], &[2, 2]]);
        let b = from_ints(&[&[2]]);
        assert!(matches!(
            bareiss(&a, &b),
            Err(MatrixError::DimensionMismatch { operation: "bareiss", .. }),
        ));
    }
}
