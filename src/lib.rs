//! order-budget library entry points.

pub mod cli;
pub mod error;
pub mod model;
pub mod permission;
pub mod report;
pub mod validator;

use anyhow::{Context, Result};
use camino::Utf8Path;
use tracing::{debug, info};

use crate::cli::{BatchArgs, CheckArgs, Cli, Commands, PermissionArgs};
use crate::error::{QuotesRejected, UserInputError};
use crate::permission::{read_grants_json, PermissionGrants};
use crate::report::{validate_batch, write_report_json, BatchReport, QuoteReport};
use crate::validator::QuoteValidator;

/// Execute the command represented by the parsed CLI input.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check(args) => handle_check(args),
        Commands::Batch(args) => handle_batch(args),
    }
}

fn handle_check(args: CheckArgs) -> Result<()> {
    require_file(&args.quote, "quote")?;
    let validator = QuoteValidator::new(load_permissions(&args.permissions)?);
    let quote = model::read_quote_json(&args.quote)?;

    let outcome = validator.validate(&quote);
    let report = QuoteReport::from_outcome(0, &quote, outcome);
    if args.json {
        let encoded = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{encoded}");
    } else if report.passed {
        println!("ok");
    }

    outcome.with_context(|| format!("quote {} rejected", report.label()))
}

fn handle_batch(args: BatchArgs) -> Result<()> {
    require_file(&args.quotes, "quotes")?;
    if args.report_out.as_deref() == Some(args.quotes.as_path()) {
        return Err(UserInputError::new("report output would overwrite the quotes file").into());
    }
    let validator = QuoteValidator::new(load_permissions(&args.permissions)?);
    let quotes = model::read_quotes_json(&args.quotes)?;

    let report = BatchReport::new(validate_batch(&validator, &quotes));
    let summary = report.summary;
    info!(
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        "batch validated"
    );

    if let Some(path) = &args.report_out {
        write_report_json(&report, path)?;
    }
    if args.json {
        let encoded = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{encoded}");
    } else {
        for entry in &report.quotes {
            match &entry.message {
                None => println!("{}: ok", entry.label()),
                Some(message) => println!("{}: {message}", entry.label()),
            }
        }
        println!(
            "{} passed, {} failed, {} total",
            summary.passed, summary.failed, summary.total
        );
    }

    if summary.failed > 0 {
        return Err(QuotesRejected {
            failed: summary.failed,
            total: summary.total,
        }
        .into());
    }
    Ok(())
}

fn load_permissions(args: &PermissionArgs) -> Result<PermissionGrants> {
    let from_file = match &args.grants {
        Some(path) => {
            require_file(path, "grants")?;
            read_grants_json(path)?
        }
        None => PermissionGrants::new(),
    };
    let grants = from_file.allow_unlimited(args.allow_unlimited.iter().copied());
    if grants.is_empty() {
        debug!("no permissions granted; every quote is held to its order budget");
    }
    Ok(grants)
}

fn require_file(path: &Utf8Path, what: &str) -> Result<()> {
    if !path.is_file() {
        return Err(UserInputError::new(format!("{what} file not found: {path}")).into());
    }
    Ok(())
}
