//! Particle Analysis Example
//!
//! Loads a small particle-physics style dataset, computes derived quantities
//! straight off the column views, and selects high-energy particles.

use columnar::Table;
use std::error::Error;
use std::path::PathBuf;

/// id, px, py, pz, energy
type Particle = (i32, f64, f64, f64, f64);

const ENERGY_CUT: f64 = 15.0;

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    println!("=== Columnar Particle Analysis Example ===\n");

    let particles = Table::<Particle>::load(data_path("particles.csv"))?;
    println!("Loaded {} particles\n", particles.row_count());

    // Transverse momentum from two column views
    let px = particles.column::<1>();
    let py = particles.column::<2>();
    let pt: Vec<f64> = px.iter().zip(py).map(|(x, y)| x.hypot(*y)).collect();
    let mean_pt = pt.iter().sum::<f64>() / pt.len().max(1) as f64;
    println!("Mean transverse momentum: {:.3}", mean_pt);

    let energy = particles.column_by_name::<f64>("energy")?;
    let max_energy = energy.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    println!("Maximum energy: {:.1}\n", max_energy);

    let high = particles.filter::<f64, _>("energy", |e| *e > ENERGY_CUT)?;
    println!(
        "{} of {} particles above {} GeV:",
        high.row_count(),
        particles.row_count(),
        ENERGY_CUT
    );
    for (id, px, py, pz, energy) in high.rows() {
        println!(
            "   #{:<3} p = ({:>5.1}, {:>5.1}, {:>5.1})  E = {:.1}",
            id, px, py, pz, energy
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
