//! # Utilities
//!
//! Shared linear-algebra helpers for working with faer matrices.

use faer::Mat;
use faer::prelude::Solve;

use crate::models::mnl::MnlError;

/// # Errors
///
/// Returns `MnlError::SolveFailed` if the solve produces non-finite values.
pub fn solve_linear_system(a: &Mat<f64>, b: &Mat<f64>) -> Result<Mat<f64>, MnlError> {
    let rhs = b.clone();
    let lu = a.full_piv_lu();
    let solution = lu.solve(rhs);
    if !matrix_is_finite(&solution) {
        return Err(MnlError::SolveFailed);
    }
    Ok(solution)
}

/// Invert an observed-information matrix by solving against the identity.
///
/// # Errors
///
/// Returns `MnlError::SolveFailed` if the information matrix is singular.
pub fn covariance_from_information(information: &Mat<f64>) -> Result<Mat<f64>, MnlError> {
    let identity = Mat::<f64>::identity(information.nrows(), information.ncols());
    solve_linear_system(information, &identity)
}

#[must_use]
pub fn matrix_is_finite(matrix: &Mat<f64>) -> bool {
    for i in 0..matrix.nrows() {
        for j in 0..matrix.ncols() {
            if !matrix[(i, j)].is_finite() {
                return false;
            }
        }
    }
    true
}

#[must_use]
pub fn vec_to_column(values: &[f64]) -> Mat<f64> {
    Mat::from_fn(values.len(), 1, |row, _| values[row])
}
