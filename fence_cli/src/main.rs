//! # Fenceline CLI
//!
//! Command-line front-end for the estimating engine.
//!
//! ## Commands
//!
//! - `fence_cli estimate <item.json>` - Validate and evaluate a calculation item
//! - `fence_cli demo` - Run a built-in double drive gate estimate
//! - `fence_cli export-catalog <path>` - Write the standard catalog as JSON
//! - `fence_cli convert <value> <from> <to>` - Convert between ft, m, in and cm
//!
//! Reports go to stdout followed by the JSON result. Logs go to stderr,
//! filtered by `RUST_LOG` (default `info`).

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fence_core::calculations::{CalculationItem, PipeCutInput};
use fence_core::catalog::{Catalog, FrameDiameter, GateLeafArrangement};
use fence_core::errors::{CalcError, CalcResult};
use fence_core::estimate::EstimatePayload;
use fence_core::file_io::{load_catalog, load_item, save_catalog};
use fence_core::units::{convert, round2, Inches, LengthUnit};

/// Fence and gate material estimator
#[derive(Parser)]
#[command(name = "fence_cli")]
#[command(about = "Fence and gate material estimator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and evaluate a calculation item read from a JSON file
    Estimate {
        /// Path to the calculation item, e.g. `{ "type": "Vinyl", ... }`
        #[arg(name = "ITEM")]
        item: PathBuf,

        /// Catalog file to use instead of the standard catalog
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print the invoicing payload instead of the bare result
        #[arg(long)]
        invoice: bool,
    },

    /// Run a built-in 96" double drive gate estimate
    Demo {
        /// Print the invoicing payload instead of the bare result
        #[arg(long)]
        invoice: bool,
    },

    /// Write the standard catalog to a JSON file
    ExportCatalog {
        #[arg(name = "PATH")]
        path: PathBuf,
    },

    /// Convert a length between units (ft, m, in, cm)
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: LengthUnit,
        to: LengthUnit,
    },
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// 96" opening, 48" tall, double swing, 1 5/8" galvanized frame
pub(crate) fn demo_item() -> CalculationItem {
    let catalog = Catalog::shared();
    let mut input = PipeCutInput::from_defaults("Demo drive gate", Inches(96.0), Inches(48.0), catalog);
    input.frame_diameter = FrameDiameter::OneFiveEighths;
    input.gate_type = GateLeafArrangement::Double;
    input.frame_color = "galvanized".to_string();
    CalculationItem::PipeCut(input)
}

fn run_estimate(item: CalculationItem, catalog: &Catalog, invoice: bool) -> CalcResult<()> {
    let output = item.evaluate(catalog)?;
    println!("{}", report::render(&item, &output));

    let json = if invoice {
        EstimatePayload::new(item, output).to_json()?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{}", json);
    Ok(())
}

fn estimate(item_path: &Path, catalog_path: Option<&Path>, invoice: bool) -> CalcResult<()> {
    let loaded;
    let catalog = match catalog_path {
        Some(path) => {
            loaded = load_catalog(path)?;
            &loaded
        }
        None => Catalog::shared(),
    };
    let item = load_item(item_path)?;
    run_estimate(item, catalog, invoice)
}

fn export_catalog(path: &Path) -> CalcResult<()> {
    save_catalog(Catalog::shared(), path)?;
    tracing::info!(path = %path.display(), "standard catalog written");
    Ok(())
}

fn print_conversion(value: f64, from: LengthUnit, to: LengthUnit) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input("value", value.to_string(), "Value must be a number"));
    }
    let converted = convert(value, from, to);
    let display = (converted * 10_000.0).round() / 10_000.0;
    println!("{} {} = {} {}", round2(value), from, display, to);
    Ok(())
}

fn report_error(error: &CalcError) {
    eprintln!("error: {}", error);
    match serde_json::to_string_pretty(error) {
        Ok(json) => eprintln!("{}", json),
        Err(e) => tracing::error!(error = %e, "failed to serialize error"),
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Estimate {
            item,
            catalog,
            invoice,
        } => estimate(&item, catalog.as_deref(), invoice),
        Commands::Demo { invoice } => run_estimate(demo_item(), Catalog::shared(), invoice),
        Commands::ExportCatalog { path } => export_catalog(&path),
        Commands::Convert { value, from, to } => print_conversion(value, from, to),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_error(&error);
            ExitCode::FAILURE
        }
    }
}
