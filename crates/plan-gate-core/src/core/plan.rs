// crates/plan-gate-core/src/core/plan.rs
// ============================================================================
// Module: Plan Gate Proposals
// Description: Payment plan proposals and the consultations that produce them.
// Purpose: Carry the values under test between callers and the engine.
// Dependencies: crate::core::money, serde
// ============================================================================

//! ## Overview
//! A [`PaymentPlanProposal`] is transient: callers rebuild it on every edit
//! and only keep it once the gate accepts it. Its `total_cost` is already
//! net of insurance; [`Consultation::proposal`] applies that convention.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::money::Money;

// ============================================================================
// SECTION: Proposal
// ============================================================================

/// Payment plan values evaluated by the constraint engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentPlanProposal {
    /// Upfront payment.
    pub down_payment: Money,
    /// Number of monthly payments.
    pub installments: i32,
    /// Cost basis net of insurance coverage.
    pub total_cost: Money,
}

impl PaymentPlanProposal {
    /// Creates a proposal.
    #[must_use]
    pub const fn new(down_payment: Money, installments: i32, total_cost: Money) -> Self {
        Self {
            down_payment,
            installments,
            total_cost,
        }
    }

    /// Returns the amount financed over the installments.
    #[must_use]
    pub const fn financed_amount(&self) -> Option<Money> {
        self.total_cost.checked_sub(self.down_payment)
    }
}

// ============================================================================
// SECTION: Consultation
// ============================================================================

/// Consultation record a proposal is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    /// Treatment description.
    pub treatment_name: String,
    /// Gross treatment cost.
    pub total_cost: Money,
    /// Amount covered by insurance.
    #[serde(default)]
    pub insurance_coverage: Money,
    /// Proposed down payment.
    pub down_payment: Money,
    /// Proposed installment count.
    pub installments: i32,
}

impl Consultation {
    /// Returns the patient's out-of-pocket cost, floored at zero.
    #[must_use]
    pub fn patient_cost(&self) -> Money {
        self.total_cost
            .checked_sub(self.insurance_coverage)
            .map_or_else(Money::zero, |cost| cost.max(Money::zero()))
    }

    /// Builds the proposal evaluated against the patient cost.
    #[must_use]
    pub fn proposal(&self) -> PaymentPlanProposal {
        PaymentPlanProposal::new(self.down_payment, self.installments, self.patient_cost())
    }

    /// Applies a down payment and term (preset or accepted suggestion).
    pub const fn apply(&mut self, plan: &PaymentPlanProposal) {
        self.down_payment = plan.down_payment;
        self.installments = plan.installments;
    }
}
