//! Error type shared by the matrix kernels and the filter.

/// Errors raised by matrix kernels and the surprise filter.
///
/// None of these are retried internally. A failing `process_sample` leaves the
/// filter exactly as it was before the call, so the caller decides whether to
/// skip the sample, re-initialize or abort.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Matrix shapes violate the operation's contract.
    ///
    /// Unreachable through the fixed-size filter path; raised by the dynamic
    /// kernels in [`crate::matrix`].
    #[error("dimension mismatch in {op}: {left:?} vs {right:?}")]
    DimensionMismatch {
        /// Operation that rejected its operands.
        op: &'static str,
        /// Shape of the left operand as (rows, cols).
        left: (usize, usize),
        /// Shape of the right operand as (rows, cols).
        right: (usize, usize),
    },

    /// Gauss-Jordan elimination hit a pivot below the singularity threshold.
    #[error("matrix is singular: pivot magnitude {pivot:e} below threshold")]
    SingularMatrix {
        /// The offending pivot after row exchange.
        pivot: f64,
    },

    /// `process_sample` was called before `initialize`.
    #[error("filter used before initialize()")]
    UninitializedFilter,

    /// The calibration window holds no usable samples.
    #[error("calibration window is empty")]
    EmptyCalibration,
}

/// Result alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;
