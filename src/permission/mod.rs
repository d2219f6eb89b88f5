//! Permission oracle consulted by the order-budget gate.
use std::collections::{BTreeMap, BTreeSet};
use std::io::BufReader;

use anyhow::{Context, Result};
use camino::Utf8Path;
use fs_err::File;
use serde::{Deserialize, Serialize};

use crate::model::CompanyId;

/// Permission that lets a company user alter carts without a budget limit.
pub const ALTER_CART_WITHOUT_LIMIT: &str = "AlterCartWithoutLimit";

/// Answers whether the current user holds `key` for `company_id`.
pub trait PermissionFacade {
    fn can(&self, key: &str, company_id: CompanyId) -> bool;
}

impl<F> PermissionFacade for F
where
    F: Fn(&str, CompanyId) -> bool,
{
    fn can(&self, key: &str, company_id: CompanyId) -> bool {
        self(key, company_id)
    }
}

/// Static set of granted permissions, keyed by permission name.
///
/// On disk this is a JSON object mapping each key to the company ids holding it:
///
/// ```json
/// { "AlterCartWithoutLimit": [1, 42] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionGrants {
    grants: BTreeMap<String, BTreeSet<CompanyId>>,
}

impl PermissionGrants {
    /// Grants nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `key` for `company_id`.
    #[must_use]
    pub fn with_grant(mut self, key: impl Into<String>, company_id: CompanyId) -> Self {
        self.grants.entry(key.into()).or_default().insert(company_id);
        self
    }

    /// Grant [`ALTER_CART_WITHOUT_LIMIT`] for every company in `company_ids`.
    #[must_use]
    pub fn allow_unlimited(self, company_ids: impl IntoIterator<Item = CompanyId>) -> Self {
        company_ids
            .into_iter()
            .fold(self, |grants, id| grants.with_grant(ALTER_CART_WITHOUT_LIMIT, id))
    }

    /// Union of both grant sets.
    #[must_use]
    pub fn merge(mut self, other: PermissionGrants) -> Self {
        for (key, ids) in other.grants {
            self.grants.entry(key).or_default().extend(ids);
        }
        self
    }

    /// Whether no permission is granted at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grants.values().all(BTreeSet::is_empty)
    }
}

impl PermissionFacade for PermissionGrants {
    fn can(&self, key: &str, company_id: CompanyId) -> bool {
        self.grants
            .get(key)
            .is_some_and(|ids| ids.contains(&company_id))
    }
}

/// Read permission grants from a JSON file.
pub fn read_grants_json(path: &Utf8Path) -> Result<PermissionGrants> {
    let file = File::open(path).with_context(|| format!("failed to open grants {path}"))?;
    let grants: PermissionGrants = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to decode grants {path}"))?;
    Ok(grants)
}
