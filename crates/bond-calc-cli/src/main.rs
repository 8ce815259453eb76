mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::valuation::{CheckArgs, PriceArgs};

/// Fixed-coupon bond valuation from the terminal
#[derive(Parser)]
#[command(
    name = "bondcalc",
    version,
    about = "Fixed-coupon bond valuation with decimal precision",
    long_about = "Prices a fixed-coupon bond from face value, coupon rate, \
                  yield-to-maturity, years-to-maturity, and payment frequency, \
                  and prints the price, summary metrics, and the per-period \
                  cash-flow schedule."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a bond and print its cash-flow schedule
    Price(PriceArgs),
    /// Validate bond parameters without pricing
    Check(CheckArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Price(args) => commands::valuation::run_price(args),
        Commands::Check(args) => commands::valuation::run_check(args),
        Commands::Version => {
            println!("bondcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
