//! Property Returns CLI
//!
//! Command-line interface for running rental projections and XIRR calculations

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use property_returns::assumptions::load_assumptions;
use property_returns::investment::{build_cash_flows, load_investment};
use property_returns::xirr::load_cash_flows;
use property_returns::{project, solve, InvestmentData, ProjectionResult, XirrResult, YearlyAssumptions};

#[derive(Parser)]
#[command(name = "property-returns", version, about = "Rental projections and XIRR for property investments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ten-year rental projection
    Project {
        /// Assumptions JSON (built-in sample villa if omitted)
        #[arg(long)]
        assumptions: Option<PathBuf>,
        /// Write the yearly table to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// XIRR of a date,amount CSV
    Xirr {
        #[arg(long)]
        flows: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Return on an off-plan purchase
    Invest {
        /// Investment JSON (built-in sample if omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Project { assumptions, csv, json } => run_project(assumptions, csv, json),
        Command::Xirr { flows, json } => {
            let flows = load_cash_flows(&flows)
                .with_context(|| format!("Failed to load cash flows from {}", flows.display()))?;
            let result = solve(&flows).context("XIRR calculation failed")?;
            print_xirr(&result, json)
        }
        Command::Invest { input, json } => run_invest(input, json),
    }
}

fn run_project(path: Option<PathBuf>, csv_path: Option<PathBuf>, json: bool) -> Result<()> {
    let assumptions = match path {
        Some(path) => load_assumptions(&path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
        None => YearlyAssumptions::default(),
    };

    let result = project(&assumptions).context("Projection failed")?;

    if let Some(csv_path) = csv_path {
        write_projection_csv(&result, &csv_path)?;
        log::info!("Yearly table written to {}", csv_path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Ten-Year Projection (initial investment {:.0})", result.initial_investment);
    println!(
        "{:>4} {:>6} {:>12} {:>16} {:>16} {:>16} {:>16} {:>8}",
        "Year", "Occ%", "ADR", "Gross", "OpCosts", "MgmtFee", "TakeHome", "ROI%"
    );
    println!("{}", "-".repeat(102));

    for row in &result.years {
        println!(
            "{:>4} {:>6.1} {:>12.0} {:>16.0} {:>16.0} {:>16.0} {:>16.0} {:>8.2}",
            row.year,
            row.occupancy,
            row.adr,
            row.gross_revenue,
            row.operating_costs,
            row.management_fee,
            row.take_home_profit,
            row.roi_after_management,
        );
    }

    let avg = &result.averages;
    println!("{}", "-".repeat(102));
    println!(
        "{:>4} {:>6.1} {:>12.0} {:>16.0} {:>16.0} {:>16.0} {:>16.0} {:>8.2}",
        "Avg",
        avg.occupancy,
        avg.adr,
        avg.gross_revenue,
        avg.operating_costs,
        avg.management_fee,
        avg.take_home_profit,
        avg.roi_after_management,
    );

    println!("\nSummary:");
    println!("  Total Take-Home Profit: {:.0}", result.total_take_home_profit);
    println!("  Ten-Year ROI: {:.2}%", result.total_roi());
    match result.payback_year {
        Some(year) => println!("  Payback: year {}", year),
        None => println!("  Payback: beyond year {}", result.years.len()),
    }

    Ok(())
}

fn write_projection_csv(result: &ProjectionResult, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in &result.years {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn run_invest(path: Option<PathBuf>, json: bool) -> Result<()> {
    let data = match path {
        Some(path) => load_investment(&path)
            .with_context(|| format!("Failed to load investment from {}", path.display()))?,
        None => InvestmentData::default(),
    };

    let flows = build_cash_flows(&data).context("Invalid investment input")?;
    let result = solve(&flows).context("XIRR calculation failed")?;

    if json {
        return print_xirr(&result, true);
    }

    let currency = data.property.currency.code();
    println!("{} ({})", data.property.project_name, data.property.location);
    println!("\nCash Flows:");
    for flow in &flows {
        println!("  {}  {:>20.0} {}", flow.date, flow.amount, currency);
    }
    println!();
    print_xirr(&result, false)
}

fn print_xirr(result: &XirrResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("Annual Return (XIRR): {:.2}%", result.rate_percent());
    println!("  Total Invested: {:.0}", result.total_invested);
    println!("  Net Profit: {:.0}", result.net_profit);
    println!("  Hold Period: {} months", result.hold_period_months);
    Ok(())
}
