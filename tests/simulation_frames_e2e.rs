use flowvis::{DistributionParams, PopulationConfig, SimConfig, Simulation};
use ndarray::Array1;

fn config() -> SimConfig {
    SimConfig {
        particles_per_second: 60.0,
        population: PopulationConfig {
            capacity: 40,
            trail_len: 30,
        },
        ..Default::default()
    }
}

#[test]
fn frame_loop_respects_capacity_and_completes_particles() {
    let mut sim = Simulation::new(DistributionParams::default(), config()).unwrap();

    // ~10 seconds of 60 fps frames: far more spawns than capacity.
    for _ in 0..600 {
        sim.tick(16.7);
        assert!(sim.population().len() <= 40);
        for p in sim.population().active() {
            assert!(p.t() <= 1.0);
            assert!(p.x().is_finite());
            assert!(p.trail_len() <= 30);
        }
    }
    assert!(!sim.population().is_empty());

    // Stop spawning (zero elapsed time) and drain the in-flight particles.
    for _ in 0..60 {
        sim.tick(0.0);
    }
    assert_eq!(sim.population().active().count(), 0);
}

#[test]
fn switching_stochasticity_mid_run_keeps_the_loop_stable() {
    let mut sim = Simulation::new(DistributionParams::default(), config()).unwrap();
    for frame in 0..300 {
        if frame == 150 {
            sim.set_stochasticity(1.0).unwrap();
        }
        sim.tick(16.7);
        for p in sim.population().active() {
            assert!(p.x().is_finite());
        }
    }
}

#[test]
fn presentation_reads_are_consistent_per_frame() {
    // What the renderer does every frame: read the active set, and read a
    // density profile normalized by max_density. Neither touches particle
    // state, so two reads in a row agree.
    let mut sim = Simulation::new(DistributionParams::default(), config()).unwrap();
    for _ in 0..120 {
        sim.tick(16.7);
    }

    let first: Vec<(u64, f64, f64)> = sim
        .population()
        .active()
        .map(|p| (p.id(), p.x(), p.t()))
        .collect();
    let second: Vec<(u64, f64, f64)> = sim
        .population()
        .active()
        .map(|p| (p.id(), p.x(), p.t()))
        .collect();
    assert_eq!(first, second);

    let xs = Array1::linspace(-4.0, 4.0, 65);
    let max = sim.model().max_density();
    assert!(max > 0.0);
    let mid_t = sim
        .population()
        .active()
        .next()
        .map(|p| p.t())
        .unwrap_or(0.5);
    let profile = sim.model().density_profile(&xs, mid_t);
    for d in profile.iter() {
        let shade = d / max;
        assert!((0.0..=1.0).contains(&shade));
    }
}

#[test]
fn reset_supports_the_ui_reset_command() {
    let mut sim = Simulation::new(DistributionParams::default(), config()).unwrap();
    for _ in 0..120 {
        sim.tick(16.7);
    }
    assert!(!sim.population().is_empty());
    sim.reset();
    assert!(sim.population().is_empty());
    assert_eq!(sim.ticks(), 0);

    // The simulation keeps working after a reset.
    for _ in 0..60 {
        sim.tick(16.7);
    }
    assert!(!sim.population().is_empty());
}
