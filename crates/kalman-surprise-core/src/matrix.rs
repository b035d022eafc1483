//! Dense matrix kernels.
//!
//! Two families live here:
//!
//! - **Checked dynamic kernels** over `DMatrix<f64>`: product, sum, difference,
//!   transpose, identity, trace, matrix–vector products and a partial-pivot
//!   Gauss-Jordan inverse. Shape violations are reported as
//!   [`Error::DimensionMismatch`] rather than panicking, so general solvers such
//!   as the steady-state Riccati iteration can be driven with arbitrary
//!   operands.
//! - **Closed-form 3×3 kernels** over [`Matrix3`] used by the surprise metric.
//!
//! All functions are pure.

use nalgebra::{DMatrix, DVector, SMatrix};

use crate::constants::SINGULARITY_EPSILON;
use crate::error::{Error, Result};
use crate::math::abs;
use crate::types::Matrix3;

#[inline]
fn mismatch(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Error {
    Error::DimensionMismatch { op, left, right }
}

/// Matrix product `A·B`. Requires `A.ncols == B.nrows`.
pub fn multiply(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    if a.ncols() != b.nrows() {
        return Err(mismatch("multiply", a.shape(), b.shape()));
    }
    Ok(a * b)
}

/// Element-wise sum. Requires identical shapes.
pub fn add(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    if a.shape() != b.shape() {
        return Err(mismatch("add", a.shape(), b.shape()));
    }
    Ok(a + b)
}

/// Element-wise difference `A − B`. Requires identical shapes.
pub fn subtract(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    if a.shape() != b.shape() {
        return Err(mismatch("subtract", a.shape(), b.shape()));
    }
    Ok(a - b)
}

/// Transpose.
#[inline]
pub fn transpose(a: &DMatrix<f64>) -> DMatrix<f64> {
    a.transpose()
}

/// `n×n` identity.
#[inline]
pub fn identity(n: usize) -> DMatrix<f64> {
    DMatrix::identity(n, n)
}

/// Sum of the leading diagonal, over `min(rows, cols)` entries.
#[inline]
pub fn trace(a: &DMatrix<f64>) -> f64 {
    (0..a.nrows().min(a.ncols())).map(|i| a[(i, i)]).sum()
}

/// Matrix × column vector. Requires `A.ncols == v.len`.
pub fn mul_vec(a: &DMatrix<f64>, v: &DVector<f64>) -> Result<DVector<f64>> {
    if a.ncols() != v.len() {
        return Err(mismatch("mul_vec", a.shape(), v.shape()));
    }
    Ok(a * v)
}

/// Row vector × matrix, returned as a column vector. Requires `v.len == A.nrows`.
pub fn vec_mul(v: &DVector<f64>, a: &DMatrix<f64>) -> Result<DVector<f64>> {
    if v.len() != a.nrows() {
        return Err(mismatch("vec_mul", (1, v.len()), a.shape()));
    }
    Ok(a.tr_mul(v))
}

/// Inverse of a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// At each column the row with the largest-magnitude entry is swapped into the
/// pivot position. If that pivot is still below [`SINGULARITY_EPSILON`] the
/// matrix is reported as [`Error::SingularMatrix`].
pub fn inverse(a: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(mismatch("inverse", a.shape(), a.shape()));
    }

    let mut work = a.clone();
    let mut inv = identity(n);

    for k in 0..n {
        let mut max = k;
        for j in (k + 1)..n {
            if abs(work[(j, k)]) > abs(work[(max, k)]) {
                max = j;
            }
        }
        if max != k {
            work.swap_rows(k, max);
            inv.swap_rows(k, max);
        }

        let pivot = work[(k, k)];
        if abs(pivot) < SINGULARITY_EPSILON {
            return Err(Error::SingularMatrix { pivot });
        }

        for i in 0..n {
            work[(k, i)] /= pivot;
            inv[(k, i)] /= pivot;
        }

        for j in 0..n {
            if j == k {
                continue;
            }
            let factor = work[(j, k)];
            if factor == 0.0 {
                continue;
            }
            for i in 0..n {
                let w = work[(k, i)] * factor;
                let v = inv[(k, i)] * factor;
                work[(j, i)] -= w;
                inv[(j, i)] -= v;
            }
        }
    }

    Ok(inv)
}

/// [`inverse`] for a statically sized square matrix.
pub fn inverse_fixed<const N: usize>(a: &SMatrix<f64, N, N>) -> Result<SMatrix<f64, N, N>> {
    let inv = inverse(&to_dynamic(a))?;
    Ok(SMatrix::<f64, N, N>::from_column_slice(inv.as_slice()))
}

/// Copy a statically sized matrix into a `DMatrix`.
#[inline]
pub fn to_dynamic<const R: usize, const C: usize>(a: &SMatrix<f64, R, C>) -> DMatrix<f64> {
    DMatrix::from_column_slice(R, C, a.as_slice())
}

/// Copy a `DMatrix` back into a statically sized matrix.
///
/// Fails with [`Error::DimensionMismatch`] when the shapes differ.
pub fn from_dynamic<const R: usize, const C: usize>(
    a: &DMatrix<f64>,
) -> Result<SMatrix<f64, R, C>> {
    if a.shape() != (R, C) {
        return Err(mismatch("from_dynamic", a.shape(), (R, C)));
    }
    Ok(SMatrix::<f64, R, C>::from_column_slice(a.as_slice()))
}

// =============================================================================
// Closed-form 3×3 kernels
// =============================================================================

/// Determinant of a 3×3 matrix by cofactor expansion along the first row.
#[inline]
pub fn determinant3x3(m: &Matrix3) -> f64 {
    m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
        - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
        + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
}

/// Adjugate divided by `det`.
fn adjugate_inverse(m: &Matrix3, det: f64) -> Matrix3 {
    let (a, b, c) = (m[(0, 0)], m[(0, 1)], m[(0, 2)]);
    let (d, e, f) = (m[(1, 0)], m[(1, 1)], m[(1, 2)]);
    let (g, h, i) = (m[(2, 0)], m[(2, 1)], m[(2, 2)]);
    let inv_det = 1.0 / det;

    Matrix3::new(
        (e * i - f * h) * inv_det,
        (c * h - b * i) * inv_det,
        (b * f - c * e) * inv_det,
        (f * g - d * i) * inv_det,
        (a * i - c * g) * inv_det,
        (c * d - a * f) * inv_det,
        (d * h - e * g) * inv_det,
        (b * g - a * h) * inv_det,
        (a * e - b * d) * inv_det,
    )
}

/// Closed-form 3×3 inverse.
///
/// Fails with [`Error::SingularMatrix`] when `|det| < 1e-12`.
pub fn inverse3x3(m: &Matrix3) -> Result<Matrix3> {
    let det = determinant3x3(m);
    if abs(det) < SINGULARITY_EPSILON {
        return Err(Error::SingularMatrix { pivot: det });
    }
    Ok(adjugate_inverse(m, det))
}

/// Closed-form 3×3 inverse that never fails.
///
/// Returns the identity when `|det| < 1e-12`. This is a fallback, not a
/// Moore-Penrose inverse: near-singular input yields a value unrelated to `m`.
pub fn pseudo_inverse3x3(m: &Matrix3) -> Matrix3 {
    let det = determinant3x3(m);
    if abs(det) < SINGULARITY_EPSILON {
        return Matrix3::identity();
    }
    adjugate_inverse(m, det)
}
