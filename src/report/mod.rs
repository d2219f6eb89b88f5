//! Batch validation and JSON reports.

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use camino::Utf8Path;
use fs_err::File;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::Quote;
use crate::permission::PermissionFacade;
use crate::validator::{BudgetError, QuoteValidator};

/// Outcome of validating a single quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuoteReport {
    /// Position of the quote in its batch.
    pub index: usize,
    pub reference: Option<String>,
    pub passed: bool,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl QuoteReport {
    #[must_use]
    pub fn from_outcome(index: usize, quote: &Quote, outcome: Result<(), BudgetError>) -> Self {
        let (code, message) = match outcome {
            Ok(()) => (None, None),
            Err(err) => (Some(err.code().to_string()), Some(err.to_string())),
        };
        Self {
            index,
            reference: quote.reference.clone(),
            passed: code.is_none(),
            code,
            message,
        }
    }

    /// Human-readable label: the reference, or `#index`.
    #[must_use]
    pub fn label(&self) -> String {
        self.reference
            .clone()
            .unwrap_or_else(|| format!("#{}", self.index))
    }
}

/// Pass/fail counts for a batch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn of(reports: &[QuoteReport]) -> Self {
        let passed = reports.iter().filter(|report| report.passed).count();
        Self {
            total: reports.len(),
            passed,
            failed: reports.len() - passed,
        }
    }
}

/// Report document written by `--report-out`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub quotes: Vec<QuoteReport>,
}

impl BatchReport {
    #[must_use]
    pub fn new(quotes: Vec<QuoteReport>) -> Self {
        Self {
            summary: BatchSummary::of(&quotes),
            quotes,
        }
    }
}

/// Validate every quote (in parallel), keeping input order.
pub fn validate_batch<P>(validator: &QuoteValidator<P>, quotes: &[Quote]) -> Vec<QuoteReport>
where
    P: PermissionFacade + Sync,
{
    quotes
        .par_iter()
        .enumerate()
        .map(|(index, quote)| QuoteReport::from_outcome(index, quote, validator.validate(quote)))
        .collect()
}

/// Write a batch report to JSON.
pub fn write_report_json(report: &BatchReport, path: &Utf8Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create report {path}"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("failed to encode report {path}"))?;
    writer.flush().context("failed to flush report writer")
}

/// Read a batch report from JSON.
pub fn read_report_json(path: &Utf8Path) -> Result<BatchReport> {
    let file = File::open(path).with_context(|| format!("failed to open report {path}"))?;
    let report: BatchReport = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("failed to decode report {path}"))?;
    Ok(report)
}
