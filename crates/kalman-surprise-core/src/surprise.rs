//! Bayesian surprise of the gravity-direction belief.
//!
//! Each filter update replaces the belief `N(x_prev, P_prev)` with `N(x, P)`.
//! The surprise of that update is the KL divergence between the two,
//! restricted to the gravity block (state indices 6..9):
//!
//! ```text
//! S = 0.5 × (ln(det P / det P_prev) − k + tr(P⁻¹ P_prev) + Δᵀ P⁻¹ Δ)
//! ```
//!
//! with `Δ = x_prev − x` and `k = 3`.

use crate::constants::{GRAVITY_BLOCK_DIM, GRAVITY_OFFSET};
use crate::math::ln;
use crate::matrix::{determinant3x3, pseudo_inverse3x3};
use crate::types::{Matrix12, Matrix3, Vector12, Vector3};

/// Mean and covariance of the gravity block of a full state belief.
pub fn gravity_block(x: &Vector12, p: &Matrix12) -> (Vector3, Matrix3) {
    (
        x.fixed_rows::<GRAVITY_BLOCK_DIM>(GRAVITY_OFFSET).into_owned(),
        p.fixed_view::<GRAVITY_BLOCK_DIM, GRAVITY_BLOCK_DIM>(GRAVITY_OFFSET, GRAVITY_OFFSET)
            .into_owned(),
    )
}

/// Surprise of moving from `(x_prev, p_prev)` to `(x, p)`, in nats.
///
/// Determinants are not checked for sign: a non-positive gravity-block
/// determinant yields NaN or ±∞, which callers can detect with
/// [`f64::is_finite`].
pub fn bayesian_surprise(x_prev: &Vector12, p_prev: &Matrix12, x: &Vector12, p: &Matrix12) -> f64 {
    let (mean_prev, cov_prev) = gravity_block(x_prev, p_prev);
    let (mean, cov) = gravity_block(x, p);
    kl_divergence_3d(&mean_prev, &cov_prev, &mean, &cov)
}

/// KL divergence between two 3-dimensional Gaussians given as
/// `(mean_prev, cov_prev)` and `(mean, cov)`.
///
/// `cov` is inverted with [`pseudo_inverse3x3`], so a near-singular `cov`
/// silently falls back to the identity.
pub fn kl_divergence_3d(
    mean_prev: &Vector3,
    cov_prev: &Matrix3,
    mean: &Vector3,
    cov: &Matrix3,
) -> f64 {
    let k = GRAVITY_BLOCK_DIM as f64;

    let delta = mean_prev - mean;
    let cov_inv = pseudo_inverse3x3(cov);

    let log_det_ratio = ln(determinant3x3(cov) / determinant3x3(cov_prev));
    let trace_term = (cov_inv * cov_prev).trace();
    let mahalanobis = delta.dot(&(cov_inv * delta));

    0.5 * (log_det_ratio - k + trace_term + mahalanobis)
}
