//! Quote records consumed by the order-budget gate.
//!
//! Records are plain data: every optional relation is an `Option` and absent
//! JSON fields decode to `None`.

use std::fmt;
use std::io::BufReader;

use anyhow::{Context, Result};
use camino::Utf8Path;
use fs_err::File;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of the company a user acts for.
pub type CompanyId = i64;

/// Monetary amount in minor currency units (cents).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Wrap an amount expressed in minor units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Amount in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }
}

impl From<i64> for Money {
    fn from(minor: i64) -> Self {
        Self(minor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Spending ceiling assigned to a business unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBudget {
    pub budget: Money,
}

/// Business unit a company user is assigned to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyBusinessUnit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub order_budget: Option<OrderBudget>,
}

/// User account acting on behalf of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyUser {
    pub company_id: CompanyId,
    #[serde(default)]
    pub company_business_unit: Option<CompanyBusinessUnit>,
}

/// Calculated totals of a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(default)]
    pub subtotal: Option<Money>,
}

/// Shopping cart awaiting checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Caller-supplied label, only used in reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default)]
    pub company_user: Option<CompanyUser>,
    #[serde(default)]
    pub totals: Option<Totals>,
}

impl Quote {
    /// Quote owned by `company_user` without totals.
    #[must_use]
    pub fn for_company_user(company_user: CompanyUser) -> Self {
        Self {
            reference: None,
            company_user: Some(company_user),
            totals: None,
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the subtotal, in minor units.
    #[must_use]
    pub fn with_subtotal(mut self, subtotal: i64) -> Self {
        self.totals = Some(Totals {
            subtotal: Some(Money::from_minor(subtotal)),
        });
        self
    }
}

impl CompanyUser {
    /// Company user without a business unit.
    #[must_use]
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            company_business_unit: None,
        }
    }

    /// Assign a business unit whose order budget is `budget` minor units.
    #[must_use]
    pub fn with_budget(mut self, budget: i64) -> Self {
        self.company_business_unit = Some(CompanyBusinessUnit {
            name: None,
            order_budget: Some(OrderBudget {
                budget: Money::from_minor(budget),
            }),
        });
        self
    }
}

/// Errors raised while loading record files.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("quote file {0} contains no quotes")]
    EmptyBatch(String),
}

/// Read a single quote from a JSON file.
pub fn read_quote_json(path: &Utf8Path) -> Result<Quote> {
    let file = File::open(path).with_context(|| format!("failed to open quote {path}"))?;
    let quote: Quote = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to decode quote {path}"))?;
    Ok(quote)
}

/// Read a non-empty array of quotes from a JSON file.
pub fn read_quotes_json(path: &Utf8Path) -> Result<Vec<Quote>> {
    let file = File::open(path).with_context(|| format!("failed to open quotes {path}"))?;
    let quotes: Vec<Quote> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to decode quotes {path}"))?;
    if quotes.is_empty() {
        return Err(RecordError::EmptyBatch(path.to_string()).into());
    }
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_relations_decode_to_none() {
        let quote: Quote = serde_json::from_str(r#"{"company_user": {"company_id": 7}}"#)
            .expect("decode quote");
        let user = quote.company_user.expect("company user");
        assert_eq!(user.company_id, 7);
        assert!(user.company_business_unit.is_none());
        assert!(quote.totals.is_none());
        assert!(quote.reference.is_none());
    }

    #[test]
    fn null_subtotal_decodes_to_none() {
        let quote: Quote = serde_json::from_str(r#"{"totals": {"subtotal": null}}"#)
            .expect("decode quote");
        assert_eq!(quote.totals, Some(Totals { subtotal: None }));
    }

    #[test]
    fn money_is_transparent_minor_units() {
        let budget: OrderBudget = serde_json::from_str(r#"{"budget": 125000}"#).expect("decode");
        assert_eq!(budget.budget, Money::from_minor(125_000));
        assert_eq!(
            serde_json::to_string(&budget).expect("encode"),
            r#"{"budget":125000}"#
        );
    }

    #[test]
    fn fractional_amounts_are_rejected() {
        let result = serde_json::from_str::<Totals>(r#"{"subtotal": 10.5}"#);
        assert!(result.is_err());
    }
}
