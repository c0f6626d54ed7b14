//! Flow / drift primitives: the analytic velocity field and the per-step
//! particle updates built on it.
//!
//! A "drift" here is infinitesimal transport: a vector field gives the local
//! velocity needed to move a particle toward the target mixture, and the two
//! step functions integrate it with a fixed Euler step, either exactly
//! (flow matching) or with an added time-scaled Gaussian perturbation
//! (DDPM-style diffusion).

use crate::density::{sample_gaussian, DensityModel};
use rand::Rng;
use std::f64::consts::{PI, TAU};

/// A vector field representing a continuous drift over position and time.
pub trait VectorField {
    /// Evaluate the velocity at position `x` and time `t`.
    fn velocity(&self, x: f64, t: f64) -> f64;
}

/// Standard sign convention: negative -> -1, positive -> +1, zero -> 0.
///
/// Not `f64::signum`, which maps +0.0 to 1.0 and -0.0 to -1.0.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl DensityModel {
    /// Analytic velocity at `(x, t)`.
    ///
    /// Each target mode attracts with weight `exp(-2 |x - mode|)`, modulated
    /// by a slow time oscillation (`1 + 0.3 sin(pi t)` for mode a,
    /// `1 + 0.3 cos(pi t)` for mode b). The normalized weights blend the mode
    /// centers into a target point, and the base drift points at it. Two
    /// decorative terms, a curvature swirl and a center pull, both fade out
    /// as `t -> 1` so arrival is governed by the mode attraction alone.
    pub fn velocity_field(&self, x: f64, t: f64) -> f64 {
        let p = self.params();

        let osc_a = 1.0 + 0.3 * (PI * t).sin();
        let osc_b = 1.0 + 0.3 * (PI * t).cos();
        let w_a = (-2.0 * (x - p.mode_a).abs()).exp() * osc_a;
        let w_b = (-2.0 * (x - p.mode_b).abs()).exp() * osc_b;

        // Both weights underflow to zero only absurdly far from the modes;
        // fall back to the midpoint rather than divide by zero.
        let total = w_a + w_b;
        let target = if total > 0.0 {
            (w_a * p.mode_a + w_b * p.mode_b) / total
        } else {
            0.5 * (p.mode_a + p.mode_b)
        };

        let direction = target - x;
        let curvature = (TAU * t).sin() * 0.3 * (1.0 - t);
        let center_pull = -x * 0.4 * (-1.5 * t).exp() * (1.0 - t);

        direction * (1.0 - 0.2 * t) + curvature * sign(x) + center_pull
    }

    /// One deterministic Euler step: `x + velocity_field(x, t) * dt`.
    pub fn deterministic_step(&self, x: f64, t: f64, dt: f64) -> f64 {
        x + self.velocity_field(x, t) * dt
    }

    /// One diffusion step: the deterministic step plus an independent Gaussian
    /// perturbation with standard deviation `sqrt(dt) * (1 - t) * stochasticity`.
    ///
    /// The noise magnitude vanishes as `stochasticity -> 0` or `t -> 1`.
    pub fn stochastic_step<R: Rng + ?Sized>(
        &self,
        x: f64,
        t: f64,
        dt: f64,
        stochasticity: f64,
        rng: &mut R,
    ) -> f64 {
        let noise_std = dt.sqrt() * (1.0 - t) * stochasticity;
        self.deterministic_step(x, t, dt) + sample_gaussian(rng, 0.0, noise_std)
    }

    /// The single entry point the population update uses: dispatches to the
    /// deterministic step when `stochasticity` is exactly zero, else to the
    /// stochastic step.
    pub fn evolve<R: Rng + ?Sized>(
        &self,
        x: f64,
        t: f64,
        dt: f64,
        stochasticity: f64,
        rng: &mut R,
    ) -> f64 {
        if stochasticity == 0.0 {
            self.deterministic_step(x, t, dt)
        } else {
            self.stochastic_step(x, t, dt, stochasticity, rng)
        }
    }
}

impl VectorField for DensityModel {
    fn velocity(&self, x: f64, t: f64) -> f64 {
        self.velocity_field(x, t)
    }
}
