//! Density Sweep: the Blend from Noise to Bimodal
//!
//! Prints an ASCII shading of the interpolated density over position (rows)
//! and time (columns). The left column is the unimodal N(0,1) prior; the
//! right column is the bimodal target; everything in between is the linear
//! probability-space blend the visualization draws as its background.
//!
//! Run: cargo run --example density_sweep

use flowvis::{DensityModel, DistributionParams};
use ndarray::Array1;

const SHADES: &[u8] = b" .:-=+*#%@";

fn main() {
    let model = DensityModel::new(DistributionParams::default()).unwrap();
    let max = model.max_density();

    let rows = 33;
    let cols = 25;
    let xs = Array1::linspace(4.0, -4.0, rows);

    println!("rows: x in [-4, 4]   columns: t in [0, 1]\n");
    for (i, &x) in xs.iter().enumerate() {
        let mut line = String::with_capacity(cols);
        for j in 0..cols {
            let t = j as f64 / (cols - 1) as f64;
            let shade = (model.noisy_density(x, t) / max).clamp(0.0, 1.0);
            let idx = (shade * (SHADES.len() - 1) as f64).round() as usize;
            line.push(SHADES[idx] as char);
        }
        let tag = match i {
            0 => "  x = +4",
            i if i == rows / 2 => "  x =  0",
            i if i + 1 == rows => "  x = -4",
            _ => "",
        };
        println!("  {line}{tag}");
    }
    println!("\n  t=0 (noise)          t=1 (two modes)");
    println!("  display normalization: max_density = {:.4}", max);
}
