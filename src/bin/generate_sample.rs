use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::Parser;

/// Write a directory of synthetic portfolio snapshot files
#[derive(Parser, Debug)]
#[command(name = "generate-sample")]
struct Args {
    /// Output directory (created if missing)
    #[arg(short, long, default_value = "sample_data")]
    output: PathBuf,

    /// Number of snapshots to write
    #[arg(short, long, default_value = "48")]
    snapshots: u32,

    /// Hours between snapshots
    #[arg(long, default_value = "6")]
    interval_hours: i64,

    /// PRNG seed
    #[arg(long, default_value = "42")]
    seed: u64,
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

/// (owner, account, starting value, per-snapshot volatility as a fraction)
const HOLDINGS: &[(&str, &str, f64, f64)] = &[
    ("Alice", "Monzo", 4_200.0, 0.01),
    ("Alice", "HSBC Savings", 25_000.0, 0.0),
    ("Alice", "BA Amex", -1_150.0, 0.05),
    ("Alice", "Vanguard ISA", 82_000.0, 0.012),
    ("Alice", "Tesla Model Y", 41_000.0, 0.002),
    ("Bob", "NatWest", 6_800.0, 0.01),
    ("Bob", "HSBC USD", 12_500.0, 0.0),
    ("Bob", "IBKR Brokerage", 133_000.0, 0.015),
    ("Bob", "Bitcoin", 18_000.0, 0.04),
    ("Joint", "35B Lancaster Rd", 650_000.0, 0.001),
];

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let start: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .context("invalid start date")?;

    let mut values: Vec<f64> = HOLDINGS.iter().map(|h| h.2).collect();

    for i in 0..args.snapshots {
        let timestamp = start + Duration::hours(args.interval_hours * i64::from(i));
        let path = args
            .output
            .join(format!("{}_summary.csv", timestamp.format("%Y%m%d.%H%M%S")));

        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        writer.write_record(["Owner", "Account", "USD Value"])?;

        let mut total = 0.0;
        for ((owner, account, _, volatility), value) in HOLDINGS.iter().zip(values.iter_mut()) {
            *value *= 1.0 + rng.gauss(0.0005, *volatility);
            total += *value;
            let amount = format!("{value:.2}");
            writer.write_record([*owner, *account, amount.as_str()])?;
        }
        // Exported files carry their own total row; the dashboard drops it.
        let total = format!("{total:.2}");
        writer.write_record(["", "Total", total.as_str()])?;
        writer.flush()?;
    }

    println!(
        "Wrote {} snapshots ({} holdings each) to {}",
        args.snapshots,
        HOLDINGS.len(),
        args.output.display()
    );
    Ok(())
}
