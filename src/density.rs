//! Closed-form densities: Gaussian prior, bimodal target, and the blend
//! between them.
//!
//! Everything here is a pure evaluation over fixed [`DistributionParams`];
//! the only state is the parameter set itself, validated once at
//! construction. Sampling entry points take an explicit `&mut impl Rng` so
//! callers control seeding and reproducibility.

use crate::{Error, Result};
use ndarray::Array1;
use rand::Rng;
use std::f64::consts::{PI, TAU};

/// Fixed distribution parameters for one model instance.
///
/// `noise_*` describe the unimodal Gaussian prior at `t = 0`; the `mode_*`
/// fields describe the bimodal Gaussian mixture target at `t = 1`. The time
/// domain is always [0, 1].
#[derive(Debug, Clone)]
pub struct DistributionParams {
    /// Mean of the noise prior.
    pub noise_mean: f64,
    /// Standard deviation of the noise prior. Must be positive and finite.
    pub noise_std: f64,
    /// Center of the first target mode.
    pub mode_a: f64,
    /// Center of the second target mode.
    pub mode_b: f64,
    /// Shared standard deviation of both target modes. Must be positive and finite.
    pub mode_std: f64,
    /// Mixture weight on `mode_a` (weight on `mode_b` is `1 - mode_weight`).
    /// Must lie in [0, 1].
    pub mode_weight: f64,
}

impl Default for DistributionParams {
    fn default() -> Self {
        Self {
            noise_mean: 0.0,
            noise_std: 1.0,
            mode_a: -2.0,
            mode_b: 2.0,
            mode_std: 0.5,
            mode_weight: 0.5,
        }
    }
}

impl DistributionParams {
    /// Check the parameter invariants.
    pub fn validate(&self) -> Result<()> {
        if !(self.noise_std > 0.0) || !self.noise_std.is_finite() {
            return Err(Error::InvalidStd(self.noise_std));
        }
        if !(self.mode_std > 0.0) || !self.mode_std.is_finite() {
            return Err(Error::InvalidStd(self.mode_std));
        }
        if !(0.0..=1.0).contains(&self.mode_weight) {
            return Err(Error::InvalidWeight(self.mode_weight));
        }
        if !self.noise_mean.is_finite() || !self.mode_a.is_finite() || !self.mode_b.is_finite() {
            return Err(Error::Domain("means and mode centers must be finite"));
        }
        Ok(())
    }
}

/// Gaussian probability density.
///
/// \[
/// p(x) = \frac{1}{\sqrt{2\pi\sigma^2}} \exp\!\left(-\frac{(x-\mu)^2}{2\sigma^2}\right)
/// \]
pub fn gaussian_pdf(x: f64, mean: f64, std: f64) -> f64 {
    let z = (x - mean) / std;
    (-0.5 * z * z).exp() / (std * (2.0 * PI).sqrt())
}

/// Draw one Gaussian sample via the Box-Muller transform.
///
/// Consumes exactly two uniform [0, 1) draws per output. The first draw is
/// reflected to (0, 1] so the logarithm is always finite.
pub fn sample_gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std: f64) -> f64 {
    let u1 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    mean + std * (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Density evaluations and sampling over one fixed parameter set.
#[derive(Debug, Clone)]
pub struct DensityModel {
    params: DistributionParams,
}

impl DensityModel {
    /// Build a model, rejecting degenerate parameters up front so no density
    /// can evaluate to NaN later.
    pub fn new(params: DistributionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The parameters this model was built with.
    pub fn params(&self) -> &DistributionParams {
        &self.params
    }

    /// Density of the unimodal noise prior at `x`.
    pub fn noise_density(&self, x: f64) -> f64 {
        gaussian_pdf(x, self.params.noise_mean, self.params.noise_std)
    }

    /// Density of the bimodal target mixture at `x`:
    /// `w * N(x; mode_a, std) + (1 - w) * N(x; mode_b, std)`.
    pub fn clean_density(&self, x: f64) -> f64 {
        let p = &self.params;
        p.mode_weight * gaussian_pdf(x, p.mode_a, p.mode_std)
            + (1.0 - p.mode_weight) * gaussian_pdf(x, p.mode_b, p.mode_std)
    }

    /// Interpolated density at `(x, t)`: `(1 - t) * noise(x) + t * clean(x)`.
    ///
    /// This is a heuristic linear blend in probability space, not the
    /// time-marginal of a real diffusion process. The blend is exact at both
    /// boundaries: pure noise at `t = 0`, pure target at `t = 1`.
    pub fn noisy_density(&self, x: f64, t: f64) -> f64 {
        (1.0 - t) * self.noise_density(x) + t * self.clean_density(x)
    }

    /// Display normalization constant: 1.2 times the largest of the three
    /// densities evaluated at their own centers.
    ///
    /// Computed on call, so it can never go stale against the parameters.
    pub fn max_density(&self) -> f64 {
        let p = &self.params;
        let peak = self
            .noise_density(p.noise_mean)
            .max(self.clean_density(p.mode_a))
            .max(self.clean_density(p.mode_b));
        1.2 * peak
    }

    /// Bulk `noisy_density` over a position grid at a single time.
    ///
    /// The shape the presentation layer reads per frame for the background
    /// density band.
    pub fn density_profile(&self, xs: &Array1<f64>, t: f64) -> Array1<f64> {
        xs.mapv(|x| self.noisy_density(x, t))
    }

    /// Draw one sample from the noise prior.
    pub fn sample_noise<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        sample_gaussian(rng, self.params.noise_mean, self.params.noise_std)
    }
}
