use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

use salary_cli::app::{self, PurchaseOption};
use salary_cli::logging;
use salary_cli::utils::{parse_amount, parse_signed_amount};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Bulgarian salary calculator for the 2025 → 2026 contribution changes.
///
/// Works out net pay, gross pay and employer cost under each year's rules,
/// and shows what the difference amounts to in everyday purchases.
#[derive(Debug, Parser)]
#[command(name = "salary-calc", version, about, long_about = None)]
struct Cli {
    /// Rate table (.csv or .toml) overriding or adding tax years.
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    /// Log level or EnvFilter directive. `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare a net salary earned in one year with the same gross in another.
    Compare {
        /// Monthly net salary in the first year (BGN).
        #[arg(long, value_parser = parse_amount)]
        net: Decimal,

        #[command(flatten)]
        years: YearPair,

        #[command(flatten)]
        purchase: PurchaseArgs,
    },

    /// Full breakdown of a monthly gross salary.
    Net {
        /// Monthly gross salary (BGN).
        #[arg(long, value_parser = parse_amount)]
        gross: Decimal,

        #[arg(long, default_value_t = 2025)]
        year: i32,
    },

    /// Find the gross salary that pays a given net salary.
    Gross {
        /// Monthly net salary (BGN).
        #[arg(long, value_parser = parse_amount)]
        net: Decimal,

        #[arg(long, default_value_t = 2025)]
        year: i32,
    },

    /// Express an annual salary difference in catalog products.
    Products {
        /// Annual net salary difference (BGN); the sign is ignored.
        #[arg(long, value_parser = parse_signed_amount, allow_hyphen_values = true)]
        annual_difference: Decimal,
    },

    /// Compare every `net_salary` row of a CSV file.
    Batch {
        /// Input CSV with a `net_salary` column and an optional `label` column.
        #[arg(long)]
        file: PathBuf,

        /// Write results here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        years: YearPair,
    },
}

#[derive(Debug, Args)]
struct YearPair {
    /// Year the net salary is known for.
    #[arg(long, default_value_t = 2025)]
    from: i32,

    /// Year to compare against.
    #[arg(long, default_value_t = 2026)]
    to: i32,
}

#[derive(Debug, Args)]
#[group(multiple = false)]
struct PurchaseArgs {
    /// Catalog product to count (e.g. `bread`, `eggs`).
    #[arg(long)]
    product: Option<String>,

    /// Custom unit price (BGN).
    #[arg(long, value_parser = parse_amount)]
    price: Option<Decimal>,
}

impl From<PurchaseArgs> for PurchaseOption {
    fn from(args: PurchaseArgs) -> Self {
        match (args.product, args.price) {
            (Some(name), _) => PurchaseOption::Product(name),
            (None, Some(price)) => PurchaseOption::Price(price),
            (None, None) => PurchaseOption::Catalog,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref())?;
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!(?cli, "parsed arguments");

    let set = app::load_config_set(cli.rates.as_deref())?;

    let output = match cli.command {
        Command::Compare {
            net,
            years,
            purchase,
        } => {
            let calculator = app::build_calculator(&set, years.from, years.to)?;
            app::run_compare(&calculator, net, &purchase.into())?
        }
        Command::Net { gross, year } => app::run_net(&set, gross, year)?,
        Command::Gross { net, year } => app::run_gross(&set, net, year)?,
        Command::Products { annual_difference } => app::run_products(annual_difference)?,
        Command::Batch {
            file,
            output,
            years,
        } => {
            let calculator = app::build_calculator(&set, years.from, years.to)?;
            app::run_batch(&calculator, &file, output.as_deref())
                .with_context(|| format!("Batch run failed: {}", file.display()))?
        }
    };

    println!("{output}");
    Ok(())
}
