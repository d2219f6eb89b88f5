//! Order-budget enforcement for company quotes.
use thiserror::Error;
use tracing::debug;

use crate::model::{Money, Quote};
use crate::permission::{PermissionFacade, ALTER_CART_WITHOUT_LIMIT};

pub const MESSAGE_NOT_OWNED_BY_COMPANY_USER: &str = "Quote is not owned by company user.";
pub const MESSAGE_NOT_ASSIGNED_TO_COMPANY_BUSINESS_UNIT: &str =
    "Company user is not assigned to company business unit.";
pub const MESSAGE_NO_ORDER_BUDGET: &str = "Company business unit has no order budget.";
pub const MESSAGE_NO_SUBTOTALS: &str = "Quote has no subtotals.";
pub const MESSAGE_NOT_ENOUGH_ORDER_BUDGET: &str = "Not enough order budget.";

/// Reasons a quote may not proceed. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("{}", MESSAGE_NOT_OWNED_BY_COMPANY_USER)]
    NotOwnedByCompanyUser,
    #[error("{}", MESSAGE_NOT_ASSIGNED_TO_COMPANY_BUSINESS_UNIT)]
    NotAssignedToCompanyBusinessUnit,
    #[error("{}", MESSAGE_NO_ORDER_BUDGET)]
    NoOrderBudget,
    #[error("{}", MESSAGE_NO_SUBTOTALS)]
    NoSubtotals,
    #[error("{}", MESSAGE_NOT_ENOUGH_ORDER_BUDGET)]
    NotEnoughOrderBudget { budget: Money, subtotal: Money },
}

impl BudgetError {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotOwnedByCompanyUser => "not_owned_by_company_user",
            Self::NotAssignedToCompanyBusinessUnit => "not_assigned_to_company_business_unit",
            Self::NoOrderBudget => "no_order_budget",
            Self::NoSubtotals => "no_subtotals",
            Self::NotEnoughOrderBudget { .. } => "not_enough_order_budget",
        }
    }
}

/// Checks quote subtotals against the business unit's order budget.
#[derive(Debug, Clone)]
pub struct QuoteValidator<P> {
    permissions: P,
}

impl<P: PermissionFacade> QuoteValidator<P> {
    #[must_use]
    pub fn new(permissions: P) -> Self {
        Self { permissions }
    }

    /// Permission oracle in use.
    #[must_use]
    pub fn permissions(&self) -> &P {
        &self.permissions
    }

    /// Decide whether `quote` may proceed.
    ///
    /// The oracle is queried once, and only for quotes owned by a company
    /// user. Holders of [`ALTER_CART_WITHOUT_LIMIT`] pass without any budget
    /// or totals lookup. A subtotal equal to the budget passes.
    pub fn validate(&self, quote: &Quote) -> Result<(), BudgetError> {
        let company_user = quote
            .company_user
            .as_ref()
            .ok_or(BudgetError::NotOwnedByCompanyUser)?;

        if self
            .permissions
            .can(ALTER_CART_WITHOUT_LIMIT, company_user.company_id)
        {
            debug!(
                company_id = company_user.company_id,
                "unlimited permission granted, skipping budget check"
            );
            return Ok(());
        }

        let business_unit = company_user
            .company_business_unit
            .as_ref()
            .ok_or(BudgetError::NotAssignedToCompanyBusinessUnit)?;
        let order_budget = business_unit
            .order_budget
            .as_ref()
            .ok_or(BudgetError::NoOrderBudget)?;
        let budget = order_budget.budget;

        let subtotal = quote
            .totals
            .as_ref()
            .and_then(|totals| totals.subtotal)
            .ok_or(BudgetError::NoSubtotals)?;

        debug!(
            company_id = company_user.company_id,
            budget = budget.minor(),
            subtotal = subtotal.minor(),
            "comparing subtotal against order budget"
        );

        if subtotal > budget {
            return Err(BudgetError::NotEnoughOrderBudget { budget, subtotal });
        }

        Ok(())
    }
}
