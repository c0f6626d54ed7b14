//! Bounded particle population: spawn, advance, evict, compact.
//!
//! The population exclusively owns its particles. Mutation happens only
//! through [`Population::spawn`] and [`Population::advance`]; everything the
//! presentation layer gets back is a shared view.

use crate::density::DensityModel;
use crate::{Error, Result};
use rand::Rng;
use std::collections::VecDeque;

/// Capacity bounds for one population instance.
#[derive(Debug, Clone)]
pub struct PopulationConfig {
    /// Hard cap on the number of particles held at once.
    pub capacity: usize,
    /// Maximum trajectory points retained per particle; the oldest point is
    /// dropped first once the bound is hit.
    pub trail_len: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            trail_len: 100,
        }
    }
}

impl PopulationConfig {
    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::Domain("population capacity must be >= 1"));
        }
        if self.trail_len == 0 {
            return Err(Error::Domain("trail retention must be >= 1"));
        }
        Ok(())
    }
}

/// One particle record: current state plus a bounded trajectory history.
///
/// Particles carry an opaque `id` instead of any display attribute; the
/// rendering layer derives color (or anything else) from the identifier.
#[derive(Debug, Clone)]
pub struct Particle {
    id: u64,
    x: f64,
    t: f64,
    trail: VecDeque<(f64, f64)>,
    active: bool,
}

impl Particle {
    fn new(id: u64, x: f64, trail_len: usize) -> Self {
        let mut trail = VecDeque::with_capacity(trail_len);
        trail.push_back((x, 0.0));
        Self {
            id,
            x,
            t: 0.0,
            trail,
            active: true,
        }
    }

    /// Opaque identity, unique within the owning population.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current position.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Current time in [0, 1].
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Whether the particle is still being stepped.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Terminal check: inactive, or already at the end of the time domain.
    pub fn is_complete(&self) -> bool {
        !self.active || self.t >= 1.0
    }

    /// Recorded `(position, time)` trajectory, oldest first.
    pub fn trail(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.trail.iter().copied()
    }

    /// Number of retained trajectory points.
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }
}

/// Capacity-bounded, insertion-ordered collection of particles.
///
/// Order is insertion order, except that eviction swap-removes, so it is not
/// stable across eviction.
#[derive(Debug, Clone)]
pub struct Population {
    cfg: PopulationConfig,
    particles: Vec<Particle>,
    next_id: u64,
}

impl Population {
    /// Build an empty population with the given bounds.
    pub fn new(cfg: PopulationConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            particles: Vec::new(),
            next_id: 0,
        })
    }

    /// The bounds this population was built with.
    pub fn config(&self) -> &PopulationConfig {
        &self.cfg
    }

    /// Try to add `count` particles, each starting at `t = 0` with a position
    /// drawn from the model's noise prior and a single-point trail.
    ///
    /// At capacity, one completed particle is evicted per new spawn; if none
    /// is completed, spawning stops silently. Returns how many particles were
    /// actually added.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        model: &DensityModel,
        rng: &mut R,
    ) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            if self.particles.len() >= self.cfg.capacity {
                match self.particles.iter().position(Particle::is_complete) {
                    Some(i) => {
                        self.particles.swap_remove(i);
                    }
                    None => break,
                }
            }
            let x = model.sample_noise(rng);
            self.particles
                .push(Particle::new(self.next_id, x, self.cfg.trail_len));
            self.next_id += 1;
            spawned += 1;
        }
        spawned
    }

    /// Step every active particle once.
    ///
    /// For each particle with `t < 1`: evolve the position through the model,
    /// clamp `t + dt` to 1.0, append the new point to the trail (dropping the
    /// oldest past the retention bound), and deactivate on reaching 1.0.
    /// Completed particles are left untouched.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        model: &DensityModel,
        dt: f64,
        stochasticity: f64,
        rng: &mut R,
    ) {
        for p in &mut self.particles {
            if !p.active || p.t >= 1.0 {
                continue;
            }
            let x = model.evolve(p.x, p.t, dt, stochasticity, rng);
            let t = (p.t + dt).min(1.0);
            if p.trail.len() >= self.cfg.trail_len {
                p.trail.pop_front();
            }
            p.trail.push_back((x, t));
            p.x = x;
            p.t = t;
            if t >= 1.0 {
                p.active = false;
            }
        }
    }

    /// Read-only view of the particles currently active.
    pub fn active(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.active)
    }

    /// Read-only view of every particle held, completed ones included.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Number of particles held, active or not.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the population holds no particles at all.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drop every particle unconditionally.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Defensive compaction: drop particles that are complete and hold an
    /// empty trail. In normal operation completed particles always retain
    /// their trail, so this is effectively inert.
    pub fn cleanup(&mut self) {
        self.particles
            .retain(|p| !(p.is_complete() && p.trail.is_empty()));
    }
}
