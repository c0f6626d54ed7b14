//! Flow Matching vs. Diffusion, Side by Side
//!
//! Runs two identically-seeded simulations, one with pure deterministic
//! transport (stochasticity 0) and one with full DDPM-style noise
//! (stochasticity 1), then prints an ASCII histogram of where the completed
//! particles landed. Both should pile up around the two target modes; the
//! diffusion run arrives with visibly more spread along the way.
//!
//! Run: cargo run --example flow_vs_diffusion

use flowvis::{DistributionParams, PopulationConfig, SimConfig, Simulation};

const BINS: usize = 41;
const X_MIN: f64 = -4.0;
const X_MAX: f64 = 4.0;

fn run(stochasticity: f64) -> Vec<f64> {
    let cfg = SimConfig {
        stochasticity,
        particles_per_second: 120.0,
        population: PopulationConfig {
            capacity: 600,
            trail_len: 50,
        },
        ..Default::default()
    };
    let mut sim = Simulation::new(DistributionParams::default(), cfg).unwrap();

    // ~8 seconds of 60 fps frames, then drain so everything completes.
    for _ in 0..480 {
        sim.tick(16.7);
    }
    for _ in 0..60 {
        sim.tick(0.0);
    }

    sim.population().iter().map(|p| p.x()).collect()
}

fn histogram(label: &str, xs: &[f64]) {
    let mut bins = [0usize; BINS];
    for &x in xs {
        let f = (x - X_MIN) / (X_MAX - X_MIN);
        if (0.0..1.0).contains(&f) {
            bins[(f * BINS as f64) as usize] += 1;
        }
    }
    let peak = bins.iter().copied().max().unwrap_or(1).max(1);

    println!("{label} ({} particles):", xs.len());
    for (i, &count) in bins.iter().enumerate() {
        let x = X_MIN + (i as f64 + 0.5) / BINS as f64 * (X_MAX - X_MIN);
        let width = count * 50 / peak;
        println!("  {x:6.2} | {}", "#".repeat(width));
    }
    println!();
}

fn main() {
    let flow = run(0.0);
    let diffusion = run(1.0);

    println!("Final particle positions after transport from N(0,1)");
    println!("to the bimodal target at -2 and +2:\n");
    histogram("flow matching  (stochasticity = 0)", &flow);
    histogram("diffusion      (stochasticity = 1)", &diffusion);

    for (label, xs) in [("flow", &flow), ("diffusion", &diffusion)] {
        let near_a = xs.iter().filter(|&&x| (x + 2.0).abs() < 1.0).count();
        let near_b = xs.iter().filter(|&&x| (x - 2.0).abs() < 1.0).count();
        println!(
            "{label:9}: {near_a} particles near mode -2, {near_b} near mode +2"
        );
    }
}
