//! Steady-state error covariance by fixed-count Riccati iteration.
//!
//! Starting from `L = Q`, each iteration runs one predict/update covariance
//! cycle of a time-invariant Kalman filter:
//!
//! ```text
//! L_pri = F·L·Fᵗ + Q
//! K     = L_pri·Hᵗ·(H·L_pri·Hᵗ + R)⁻¹
//! L     = (I − K·H)·L_pri
//! ```
//!
//! There is no convergence test: the iteration count is part of the model and
//! the result after exactly that many cycles is returned.

use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::matrix::{add, identity, inverse, multiply, subtract, transpose};

/// Run `iterations` Riccati cycles for an arbitrary `(F, H, Q, R)`.
///
/// Shapes are checked: `F` and `Q` must be n×n, `H` m×n and `R` m×m. Any
/// singular innovation covariance aborts with [`Error::SingularMatrix`].
pub fn steady_state_covariance(
    f: &DMatrix<f64>,
    h: &DMatrix<f64>,
    q: &DMatrix<f64>,
    r: &DMatrix<f64>,
    iterations: usize,
) -> Result<DMatrix<f64>> {
    let n = f.nrows();
    if !f.is_square() {
        return Err(Error::DimensionMismatch {
            op: "riccati",
            left: f.shape(),
            right: f.shape(),
        });
    }

    let ft = transpose(f);
    let ht = transpose(h);
    let eye = identity(n);
    let mut l = q.clone();

    for _ in 0..iterations {
        let l_pri = add(&multiply(&multiply(f, &l)?, &ft)?, q)?;
        let innovation = add(&multiply(&multiply(h, &l_pri)?, &ht)?, r)?;
        let gain = multiply(&multiply(&l_pri, &ht)?, &inverse(&innovation)?)?;
        l = multiply(&subtract(&eye, &multiply(&gain, h)?)?, &l_pri)?;
    }

    Ok(l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{abs, sqrt};

    #[test]
    fn test_scalar_random_walk_fixed_point() {
        // x' = x + w, z = x + v: steady posterior variance solves
        // P = (P + q) r / (P + q + r).
        let (q, r) = (0.01, 1.0);
        let p = steady_state_covariance(
            &DMatrix::from_element(1, 1, 1.0),
            &DMatrix::from_element(1, 1, 1.0),
            &DMatrix::from_element(1, 1, q),
            &DMatrix::from_element(1, 1, r),
            200,
        )
        .unwrap()[(0, 0)];

        let expected = (-q + sqrt(q * q + 4.0 * q * r)) / 2.0;
        assert!(abs(p - expected) < 1e-9, "P = {}, expected {}", p, expected);
    }

    #[test]
    fn test_zero_iterations_returns_q() {
        let q = DMatrix::from_row_slice(2, 2, &[2.0, 0.5, 0.5, 1.0]);
        let p = steady_state_covariance(
            &DMatrix::identity(2, 2),
            &DMatrix::identity(2, 2),
            &q,
            &DMatrix::identity(2, 2),
            0,
        )
        .unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn test_shape_mismatch_reported() {
        let result = steady_state_covariance(
            &DMatrix::identity(2, 2),
            &DMatrix::identity(3, 3),
            &DMatrix::identity(2, 2),
            &DMatrix::identity(3, 3),
            1,
        );
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_singular_innovation_reported() {
        let result = steady_state_covariance(
            &DMatrix::identity(2, 2),
            &DMatrix::zeros(2, 2),
            &DMatrix::identity(2, 2),
            &DMatrix::zeros(2, 2),
            1,
        );
        assert!(matches!(result, Err(Error::SingularMatrix { .. })));
    }
}
