//! Occupancy x ADR-growth sensitivity grid
//!
//! Projects every combination in parallel and prints average ROI per cell

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use property_returns::assumptions::load_assumptions;
use property_returns::{ScenarioRunner, YearlyAssumptions};

#[derive(Parser)]
#[command(name = "sensitivity", about = "Average ROI across year-1 occupancy and ADR growth")]
struct Args {
    /// Base assumptions JSON (built-in sample villa if omitted)
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// Year-1 occupancy values in percent
    #[arg(long, value_delimiter = ',', default_values_t = vec![50.0, 60.0, 70.0, 80.0, 90.0])]
    occupancy: Vec<f64>,

    /// ADR growth values in percent per year
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.0, 2.5, 5.0, 7.5, 10.0])]
    adr_growth: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let base = match &args.assumptions {
        Some(path) => load_assumptions(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
        None => YearlyAssumptions::default(),
    };
    let runner = ScenarioRunner::with_base(base);

    let start = Instant::now();
    let grid = runner
        .sensitivity_grid(&args.occupancy, &args.adr_growth)
        .context("Sensitivity grid failed")?;
    log::info!("Projected {} scenarios in {:?}", grid.len(), start.elapsed());

    println!("Average ROI after management (%)");
    print!("{:>8}", "Occ \\ ADR");
    for growth in &args.adr_growth {
        print!(" {:>9}", format!("{:+.1}%", growth));
    }
    println!();
    println!("{}", "-".repeat(9 + 10 * args.adr_growth.len()));

    for row in grid.chunks(args.adr_growth.len().max(1)) {
        print!("{:>8.1}%", row[0].y1_occupancy);
        for point in row {
            print!(" {:>9.2}", point.average_roi);
        }
        println!();
    }

    println!("\nPayback year (- = beyond horizon)");
    for row in grid.chunks(args.adr_growth.len().max(1)) {
        print!("{:>8.1}%", row[0].y1_occupancy);
        for point in row {
            match point.payback_year {
                Some(year) => print!(" {:>9}", year),
                None => print!(" {:>9}", "-"),
            }
        }
        println!();
    }

    Ok(())
}
