//! # flowvis
//!
//! Move particles from noise to structure, two ways: deterministic flow
//! matching along an analytic vector field, and DDPM-style diffusion that
//! perturbs every step with time-scaled Gaussian noise.
//!
//! ## The Problem
//!
//! A visualization wants to show how generative samplers transport a simple
//! prior into a structured target. This crate is the numerical core of that
//! picture: one spatial dimension, time running over [0, 1], a unimodal
//! Gaussian prior at `t = 0` and a bimodal Gaussian mixture at `t = 1`.
//! Everything the renderer needs (densities, the velocity field, per-step
//! particle updates, a bounded particle population) lives here. Pixels,
//! colors, and frame scheduling do not.
//!
//! ## Key Pieces
//!
//! | Item | Use Case |
//! |------|----------|
//! | [`DensityModel::noisy_density`] | background density at `(x, t)` |
//! | [`DensityModel::velocity_field`] | analytic transport field |
//! | [`DensityModel::evolve`] | one Euler step, deterministic or noisy |
//! | [`Population`] | spawn / advance / evict particle records |
//! | [`Simulation`] | explicit per-instance driver context |
//!
//! ## Quick Start
//!
//! ```rust
//! use flowvis::{DensityModel, DistributionParams};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let model = DensityModel::new(DistributionParams::default()).unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//!
//! // Sample a particle from the prior and take one deterministic step.
//! let x0 = model.sample_noise(&mut rng);
//! let x1 = model.evolve(x0, 0.0, 0.02, 0.0, &mut rng);
//! assert!(x1.is_finite());
//!
//! // Stochasticity > 0 switches the same entry point to a diffusion step.
//! let x1_noisy = model.evolve(x0, 0.0, 0.02, 1.0, &mut rng);
//! assert!(x1_noisy.is_finite());
//! ```
//!
//! ## What Can Go Wrong
//!
//! 1. **Degenerate parameters**: zero/negative standard deviations would turn
//!    every density into NaN. Construction validates and returns [`Error`]
//!    instead; for valid inputs the arithmetic is untouched.
//! 2. **Expecting a rigorous marginal**: [`DensityModel::noisy_density`] is a
//!    deliberate linear blend in probability space, not the time-marginal of
//!    any real diffusion process. The blend is the point, not an
//!    approximation error.
//! 3. **`signum` at zero**: Rust's `f64::signum(0.0)` is `1.0`. The velocity
//!    field needs the standard convention `sign(0) = 0`, so it uses its own
//!    sign, and the curvature term vanishes at the origin.
//!
//! ## References
//!
//! - Lipman et al. (2022). "Flow Matching for Generative Modeling"
//! - Ho et al. (2020). "Denoising Diffusion Probabilistic Models"
//! - Song et al. (2021). "Score-Based Generative Modeling through SDEs"

use thiserror::Error;

pub mod density;
pub mod flow;
pub mod population;
pub mod sim;

pub use density::{gaussian_pdf, sample_gaussian, DensityModel, DistributionParams};
pub use flow::VectorField;
pub use population::{Particle, Population, PopulationConfig};
pub use sim::{SimConfig, Simulation};

/// flowvis error variants.
#[derive(Debug, Error)]
pub enum Error {
    /// A standard deviation that is zero, negative, or non-finite.
    #[error("standard deviation must be positive and finite, got {0}")]
    InvalidStd(f64),

    /// A mixture weight outside [0, 1].
    #[error("mode weight must lie in [0, 1], got {0}")]
    InvalidWeight(f64),

    /// A simulation time step that is zero, negative, or non-finite.
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    /// A stochasticity value outside [0, 1].
    #[error("stochasticity must lie in [0, 1], got {0}")]
    InvalidStochasticity(f64),

    /// A spawn rate that is zero, negative, or non-finite.
    #[error("spawn rate must be positive and finite, got {0}")]
    InvalidSpawnRate(f64),

    /// Domain error (invalid inputs for the mathematical definition).
    #[error("{0}")]
    Domain(&'static str),
}

/// Result type for flowvis operations.
pub type Result<T> = std::result::Result<T, Error>;
