// crates/plan-gate-core/src/runtime/quote.rs
// ============================================================================
// Module: Plan Gate Quotes
// Description: Monthly payment figures for payment plan proposals.
// Purpose: Summarize what a proposal costs per month without enforcing it.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! Quotes are informational. The minimum monthly payment comparison is an
//! advisory flag and never becomes a [`Violation`](crate::core::Violation).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::Money;
use crate::core::PaymentPlanProposal;
use crate::core::RuleSet;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Monthly payment summary for a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanQuote {
    /// Amount left after the down payment.
    pub financed_amount: Money,
    /// Monthly installment rounded to the cent; zero without installments.
    pub monthly_payment: Money,
    /// True when the monthly payment is under the advisory minimum.
    pub below_min_monthly: bool,
}

impl PlanQuote {
    /// Computes the quote for `proposal` under `rules`.
    #[must_use]
    pub fn compute(proposal: &PaymentPlanProposal, rules: &RuleSet) -> Self {
        let financed_amount = proposal.financed_amount().unwrap_or_else(Money::zero);
        let monthly_payment =
            financed_amount.divide_evenly(proposal.installments).unwrap_or_else(Money::zero);
        let below_min_monthly = proposal.installments > 0
            && rules.min_monthly_payment().is_some_and(|minimum| monthly_payment < minimum);
        Self {
            financed_amount,
            monthly_payment,
            below_min_monthly,
        }
    }
}
