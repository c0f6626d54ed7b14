//! Explicit simulation context: one model, one population, one RNG.
//!
//! The driver (an animation loop, a test, a headless sweep) owns a
//! [`Simulation`] instance and calls [`Simulation::tick`] once per frame.
//! Nothing here is global; independent simulations coexist freely.

use crate::density::{DensityModel, DistributionParams};
use crate::population::{Population, PopulationConfig};
use crate::{Error, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Configuration for one simulation instance.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Fixed simulation time step per tick.
    pub dt: f64,
    /// Noise mix per step: 0 is pure deterministic flow, 1 is full diffusion.
    pub stochasticity: f64,
    /// Spawn rate; the spawn interval is `1000 / particles_per_second` ms.
    pub particles_per_second: f64,
    /// Particles added per due spawn.
    pub spawn_batch: usize,
    /// Compaction cadence in ticks. Runs deterministically so test runs
    /// never depend on a dice roll.
    pub cleanup_every: u64,
    /// RNG seed (deterministic by default).
    pub seed: u64,
    /// Population bounds.
    pub population: PopulationConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.02,
            stochasticity: 0.0,
            particles_per_second: 20.0,
            spawn_batch: 1,
            cleanup_every: 10,
            seed: 42,
            population: PopulationConfig::default(),
        }
    }
}

impl SimConfig {
    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<()> {
        if !(self.dt > 0.0) || !self.dt.is_finite() {
            return Err(Error::InvalidTimeStep(self.dt));
        }
        if !(0.0..=1.0).contains(&self.stochasticity) {
            return Err(Error::InvalidStochasticity(self.stochasticity));
        }
        if !(self.particles_per_second > 0.0) || !self.particles_per_second.is_finite() {
            return Err(Error::InvalidSpawnRate(self.particles_per_second));
        }
        if self.spawn_batch == 0 {
            return Err(Error::Domain("spawn batch must be >= 1"));
        }
        if self.cleanup_every == 0 {
            return Err(Error::Domain("cleanup cadence must be >= 1"));
        }
        self.population.validate()
    }
}

/// One self-contained simulation: model, population, RNG, and tick bookkeeping.
pub struct Simulation {
    model: DensityModel,
    population: Population,
    cfg: SimConfig,
    rng: ChaCha8Rng,
    ticks: u64,
    spawn_credit_ms: f64,
}

impl Simulation {
    /// Build a simulation, validating both parameter sets up front.
    pub fn new(params: DistributionParams, cfg: SimConfig) -> Result<Self> {
        cfg.validate()?;
        let model = DensityModel::new(params)?;
        let population = Population::new(cfg.population.clone())?;
        let rng = ChaCha8Rng::seed_from_u64(cfg.seed);
        Ok(Self {
            model,
            population,
            cfg,
            rng,
            ticks: 0,
            spawn_credit_ms: 0.0,
        })
    }

    /// Milliseconds between spawns at the configured rate.
    pub fn spawn_interval_ms(&self) -> f64 {
        1000.0 / self.cfg.particles_per_second
    }

    /// Run one frame: spawn whatever is due for `elapsed_ms` of wall time,
    /// advance the whole population by one `dt`, and compact on cadence.
    ///
    /// Synchronous and atomic from the caller's perspective; pausing is
    /// simply not calling this.
    pub fn tick(&mut self, elapsed_ms: f64) {
        self.spawn_credit_ms += elapsed_ms;
        let interval = self.spawn_interval_ms();
        while self.spawn_credit_ms >= interval {
            self.spawn_credit_ms -= interval;
            self.population
                .spawn(self.cfg.spawn_batch, &self.model, &mut self.rng);
        }

        self.population.advance(
            &self.model,
            self.cfg.dt,
            self.cfg.stochasticity,
            &mut self.rng,
        );

        self.ticks += 1;
        if self.ticks % self.cfg.cleanup_every == 0 {
            self.population.cleanup();
        }
    }

    /// Adjust the noise mix between ticks.
    pub fn set_stochasticity(&mut self, stochasticity: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&stochasticity) {
            return Err(Error::InvalidStochasticity(stochasticity));
        }
        self.cfg.stochasticity = stochasticity;
        Ok(())
    }

    /// Drop all particles and restart the tick and spawn bookkeeping.
    /// The UI reset command lands here.
    pub fn reset(&mut self) {
        self.population.clear();
        self.ticks = 0;
        self.spawn_credit_ms = 0.0;
    }

    /// The density model driving this simulation.
    pub fn model(&self) -> &DensityModel {
        &self.model
    }

    /// Read access to the particle population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The configuration in effect.
    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    /// Ticks executed since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
