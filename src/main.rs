//! Command-line entry point for the order-budget binary.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use order_budget::error::{QuotesRejected, UserInputError};
use order_budget::model::RecordError;
use order_budget::validator::BudgetError;

fn main() {
    let cli = order_budget::cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(err) = order_budget::run(cli) {
        let mut exit_code = 1;
        for cause in err.chain() {
            if cause.is::<BudgetError>() || cause.is::<QuotesRejected>() {
                exit_code = 3;
                break;
            }
            if cause.is::<UserInputError>()
                || cause.is::<RecordError>()
                || cause.is::<serde_json::Error>()
            {
                exit_code = 2;
                break;
            }
        }
        eprintln!("order-budget: {err:#}");
        std::process::exit(exit_code);
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
