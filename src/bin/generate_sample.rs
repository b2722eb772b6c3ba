//! Writes a synthetic trade CSV in the Comtrade-derived layout.
//!
//! The file deliberately carries the quirks the loader has to cope with: a
//! byte-order mark, padded mixed-case headers, aggregate partners and
//! unusable net weights.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Generate a synthetic lithium/cobalt trade CSV")]
struct Args {
    /// Output CSV path
    #[arg(long, default_value = "sample_trade.csv")]
    output: PathBuf,

    /// First year of monthly data
    #[arg(long, default_value_t = 2021)]
    from_year: u32,

    /// Number of years to generate
    #[arg(long, default_value_t = 3)]
    years: u32,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// splitmix64; deterministic across platforms.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

const REPORTERS: &[&str] = &["Korea, Rep.", "Japan", "China"];

/// (commodity, partner, typical monthly net weight in kg)
const FLOWS: &[(&str, &str, f64)] = &[
    ("283691", "Chile", 4.0e6),
    ("283691", "Argentina", 1.5e6),
    ("283691", "China", 8.0e5),
    ("282520", "China", 2.0e6),
    ("282520", "United States", 1.2e5),
    ("282520", "Russian Federation", 6.0e4),
    ("260500", "Dem. Rep. of the Congo", 9.0e6),
    ("260500", "Zambia", 3.0e5),
    ("282200", "Finland", 2.5e5),
    ("282200", "Belgium", 1.8e5),
    ("810520", "Viet Nam", 4.0e4),
    ("810520", "Norway", 9.0e4),
    ("282619", "Other Asia, nes", 1.0e4),
];

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SampleRng(args.seed);

    let mut file = std::fs::File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    file.write_all("\u{feff}".as_bytes()).context("writing byte-order mark")?;

    let mut writer = csv::Writer::from_writer(file);
    writer
        .write_record([" Period ", "CmdCode", " Reporter", "Partner ", "NetWgt"])
        .context("writing header")?;

    let mut rows = 0usize;
    for year in args.from_year..args.from_year + args.years {
        for month in 1..=12u32 {
            let period = format!("{year}{month:02}");
            // Mild seasonality so annual totals differ from 12x a month.
            let season = 1.0 + 0.25 * ((month as f64 - 1.0) / 12.0 * std::f64::consts::TAU).sin();

            for &reporter in REPORTERS {
                for &(cmd, partner, typical) in FLOWS {
                    if partner == reporter || rng.unit() < 0.15 {
                        continue;
                    }
                    let noise = 0.5 + rng.unit();
                    let roll = rng.unit();
                    let netwgt = if roll < 0.01 {
                        String::new()
                    } else if roll < 0.02 {
                        "n/a".to_string()
                    } else {
                        format!("{:.0}", typical * season * noise)
                    };
                    writer
                        .write_record([period.as_str(), cmd, reporter, partner, netwgt.as_str()])
                        .with_context(|| format!("writing row {rows}"))?;
                    rows += 1;
                }
            }
        }
    }
    writer.flush().context("flushing CSV")?;

    log::info!("Wrote {rows} rows to {}", args.output.display());
    println!("Wrote {rows} trade rows to {}", args.output.display());
    Ok(())
}
