use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a synthetic pupil_positions.csv for trying out the viewer
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Output file
    #[arg(default_value = "pupil_positions.csv")]
    output: PathBuf,

    /// Samples per eye and detector
    #[arg(long, default_value_t = 300)]
    samples: usize,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const HEADER: [&str; 10] = [
    "pupil_timestamp",
    "world_index",
    "eye_id",
    "confidence",
    "norm_pos_x",
    "norm_pos_y",
    "diameter",
    "method",
    "phi",
    "theta",
];

const SAMPLE_RATE_HZ: f64 = 120.0;
const WORLD_RATE_HZ: f64 = 30.0;

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record(HEADER)?;

    let mut rows = 0usize;
    for i in 0..args.samples {
        let t = i as f64 / SAMPLE_RATE_HZ;
        // Slow saccade-like drift of the gaze angles.
        let phi_true = -1.6 + 0.25 * (t * 0.9).sin();
        let theta_true = 1.9 + 0.15 * (t * 1.3).cos();

        for eye_id in [0, 1] {
            // The 2D detector reports no angles; the 3D model reports noisy ones.
            for method in ["2d c++", "pye3d 0.3.0 real-time"] {
                let is_3d = method.starts_with("pye3d");
                let confidence = (0.95 + rng.gauss(0.0, 0.03)).clamp(0.0, 1.0);
                let diameter = 38.0 + rng.gauss(0.0, 1.5);
                let (phi, theta) = if is_3d {
                    (
                        format!("{:.6}", phi_true + rng.gauss(0.0, 0.01)),
                        format!("{:.6}", theta_true + rng.gauss(0.0, 0.01)),
                    )
                } else {
                    (String::new(), String::new())
                };

                writer.write_record([
                    format!("{:.6}", 1000.0 + t + eye_id as f64 * 0.001),
                    ((t * WORLD_RATE_HZ) as u64).to_string(),
                    eye_id.to_string(),
                    format!("{confidence:.4}"),
                    format!("{:.6}", 0.5 + 0.1 * phi_true.sin() + rng.gauss(0.0, 0.005)),
                    format!("{:.6}", 0.5 + 0.1 * theta_true.cos() + rng.gauss(0.0, 0.005)),
                    format!("{diameter:.3}"),
                    method.to_string(),
                    phi,
                    theta,
                ])?;
                rows += 1;
            }
        }
    }
    writer.flush()?;

    println!("Wrote {rows} pupil samples to {}", args.output.display());
    Ok(())
}
