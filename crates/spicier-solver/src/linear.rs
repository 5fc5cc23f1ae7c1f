//! Linear system solvers.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

use crate::error::{Error, Result};

/// Solve a complex linear system Ax = b using LU decomposition.
pub fn solve_complex(
    a: &DMatrix<Complex<f64>>,
    b: &DVector<Complex<f64>>,
) -> Result<DVector<Complex<f64>>> {
    if a.nrows() != a.ncols() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: a.ncols(),
        });
    }
    if a.nrows() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: b.len(),
        });
    }

    a.clone().lu().solve(b).ok_or(Error::SingularMatrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{dmatrix, dvector};

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn test_solve_complex_simple() {
        // (1+j) x = 2  ->  x = 1 - j
        let a = dmatrix![c(1.0, 1.0)];
        let b = dvector![c(2.0, 0.0)];

        let x = solve_complex(&a, &b).unwrap();

        assert!((x[0] - c(1.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_singular_matrix() {
        let a = dmatrix![c(1.0, 0.0), c(2.0, 0.0); c(2.0, 0.0), c(4.0, 0.0)];
        let b = dvector![c(1.0, 0.0), c(2.0, 0.0)];

        let result = solve_complex(&a, &b);
        assert!(matches!(result, Err(Error::SingularMatrix)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = dmatrix![c(1.0, 0.0), c(2.0, 0.0); c(3.0, 0.0), c(4.0, 0.0)];
        let b = dvector![c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0)];

        let result = solve_complex(&a, &b);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }
}
