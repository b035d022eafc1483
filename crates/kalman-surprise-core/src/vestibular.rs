//! Vestibular (semicircular-canal) channel model.
//!
//! Each rotational axis passes through the same discrete second-order
//! high-pass filter, the cascade of a fast canal time constant τd and a slow
//! adaptation time constant τa:
//!
//! ```text
//!            τd·τa·s²
//! H(s) = ─────────────────────────
//!        τd·τa·s² + (τd+τa)·s + 1
//! ```
//!
//! The filter is realized in controllable canonical state-space form. Output
//! is read from the state *before* the new input is absorbed:
//!
//! ```text
//! y = C·s + D·u
//! s ← A·s + B·u
//! ```

use crate::constants::AXES;
use crate::types::{Matrix2, Row2, Vector2};

/// State-space coefficients `(A, B, C, D)` shared by every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VestibularCoefficients {
    /// 2×2 state transition.
    pub a: Matrix2,
    /// 2×1 input column.
    pub b: Vector2,
    /// 1×2 output row.
    pub c: Row2,
    /// Direct feed-through.
    pub d: f64,
}

impl VestibularCoefficients {
    /// Tabulated coefficients for `dt = 0.01 s`, `τd = 7 s`, `τa = 190 s`.
    pub fn reference() -> Self {
        Self {
            a: Matrix2::new(1.99851982, -0.99851989, 1.0, 0.0),
            b: Vector2::new(1.0, 0.0),
            c: Row2::new(-0.00147909, 0.00147901),
            d: 0.99925993,
        }
    }

    /// Discretize the canal transfer function with the bilinear (Tustin)
    /// transform at sample period `dt`.
    ///
    /// With `K = 2/dt` and `T = τd·τa`, the discrete transfer function is
    /// `(b0 + b1 z⁻¹ + b2 z⁻²) / (1 + a1 z⁻¹ + a2 z⁻²)` after normalizing by
    /// `a0 = T·K² + (τd+τa)·K + 1`, which maps to
    /// `A = [[−a1, −a2], [1, 0]]`, `B = [1, 0]ᵗ`,
    /// `C = [b1 − b0·a1, b2 − b0·a2]`, `D = b0`.
    pub fn bilinear(tau_d: f64, tau_a: f64, dt: f64) -> Self {
        let k = 2.0 / dt;
        let t = tau_d * tau_a;
        let s = tau_d + tau_a;

        let a0 = t * k * k + s * k + 1.0;
        let a1 = (2.0 - 2.0 * t * k * k) / a0;
        let a2 = (t * k * k - s * k + 1.0) / a0;

        let b0 = t * k * k / a0;
        let b1 = -2.0 * t * k * k / a0;
        let b2 = t * k * k / a0;

        Self {
            a: Matrix2::new(-a1, -a2, 1.0, 0.0),
            b: Vector2::new(1.0, 0.0),
            c: Row2::new(b1 - b0 * a1, b2 - b0 * a2),
            d: b0,
        }
    }
}

impl Default for VestibularCoefficients {
    fn default() -> Self {
        Self::reference()
    }
}

/// Three independent canal filters, one per rotational axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VestibularChannel {
    coefficients: VestibularCoefficients,
    states: [Vector2; AXES],
}

impl VestibularChannel {
    /// Create a channel with zeroed memory.
    pub fn new(coefficients: VestibularCoefficients) -> Self {
        Self {
            coefficients,
            states: [Vector2::zeros(); AXES],
        }
    }

    /// Create a channel for the given time constants and sample period.
    pub fn from_time_constants(tau_d: f64, tau_a: f64, dt: f64) -> Self {
        Self::new(VestibularCoefficients::bilinear(tau_d, tau_a, dt))
    }

    /// Feed one angular-rate triple; returns the perceived angular rate.
    pub fn update(&mut self, omega: [f64; AXES]) -> [f64; AXES] {
        let mut perceived = [0.0; AXES];
        for (axis, &input) in omega.iter().enumerate() {
            perceived[axis] = self.update_axis(axis, input);
        }
        perceived
    }

    /// Feed one sample to a single axis.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= 3`.
    pub fn update_axis(&mut self, axis: usize, input: f64) -> f64 {
        let VestibularCoefficients { a, b, c, d } = self.coefficients;
        let state = &mut self.states[axis];

        let output = (c * *state)[0] + d * input;
        *state = a * *state + b * input;

        output
    }

    /// Zero the memory of every axis.
    pub fn reset(&mut self) {
        self.states = [Vector2::zeros(); AXES];
    }

    /// Memory of one axis.
    pub fn state(&self, axis: usize) -> Vector2 {
        self.states[axis]
    }

    /// Coefficients in use.
    pub fn coefficients(&self) -> &VestibularCoefficients {
        &self.coefficients
    }
}

impl Default for VestibularChannel {
    fn default() -> Self {
        Self::new(VestibularCoefficients::reference())
    }
}
