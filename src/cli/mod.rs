//! Command-line interface definitions for order-budget.
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueHint};

use crate::model::CompanyId;

const CLI_EXAMPLES: &str = "Examples:\n  order-budget check --quote cart.json --grants grants.json\n  order-budget batch --quotes carts.json --allow-unlimited 42 --report-out report.json\n";

/// Top-level CLI parser.
#[derive(Debug, Parser)]
#[command(
    name = "order-budget",
    version,
    about = "Order-budget gate for company quotes",
    long_about = "Checks quote subtotals against the order budget of the owning company business unit.",
    after_help = CLI_EXAMPLES,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Emit debug diagnostics on stderr.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
    /// Reduce diagnostics to errors only.
    #[arg(long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a single quote.
    #[command(alias = "c")]
    Check(CheckArgs),
    /// Validate an array of quotes.
    #[command(alias = "b")]
    Batch(BatchArgs),
}

/// Permission sources shared by all subcommands.
#[derive(Debug, Args, Clone, Default)]
pub struct PermissionArgs {
    /// JSON file mapping permission keys to company ids.
    #[arg(long = "grants", value_hint = ValueHint::FilePath)]
    pub grants: Option<Utf8PathBuf>,
    /// Grant the unlimited-cart permission to this company.
    #[arg(long = "allow-unlimited", value_name = "COMPANY_ID")]
    pub allow_unlimited: Vec<CompanyId>,
}

/// Arguments for the `check` subcommand.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Quote JSON file to validate.
    #[arg(short = 'q', long = "quote", value_hint = ValueHint::FilePath)]
    pub quote: Utf8PathBuf,
    /// Emit a machine-readable JSON report.
    #[arg(long = "json")]
    pub json: bool,
    #[command(flatten)]
    pub permissions: PermissionArgs,
}

/// Arguments for the `batch` subcommand.
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// JSON file holding an array of quotes.
    #[arg(short = 'q', long = "quotes", value_hint = ValueHint::FilePath)]
    pub quotes: Utf8PathBuf,
    /// Write the full report as JSON to this file.
    #[arg(long = "report-out", value_hint = ValueHint::FilePath)]
    pub report_out: Option<Utf8PathBuf>,
    /// Emit the report as JSON on stdout.
    #[arg(long = "json")]
    pub json: bool,
    #[command(flatten)]
    pub permissions: PermissionArgs,
}
