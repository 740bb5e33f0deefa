// crates/plan-gate-core/src/runtime/engine.rs
// ============================================================================
// Module: Plan Gate Constraint Engine
// Description: Deterministic validation and repair of payment plan proposals.
// Purpose: Check proposals against a rule set and clamp them into compliance.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The constraint engine is two pure functions. [`validate_payment_plan`]
//! runs five independent checks in a fixed order and returns every failure.
//! [`repair_payment_plan`] applies five clamps in a fixed order, each
//! overwriting the previous value.
//!
//! ## Invariants
//! - Neither function performs I/O, allocates shared state, or panics.
//! - Identical inputs yield identical, identically ordered outputs.
//! - Repair is idempotent; its output is violation-free whenever
//!   `min_down_payment <= total_cost`, except in the configuration reported by
//!   [`RuleSet::zero_down_is_unrepairable`] with a zero input down payment.
//!   Callers must re-validate repaired plans.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Money;
use crate::core::PaymentPlanProposal;
use crate::core::RuleSet;
use crate::core::Violation;
use crate::core::ViolationCode;

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a payment plan against `rules`, returning violations in check order.
#[must_use]
pub fn validate_payment_plan(
    down_payment: Money,
    installments: i32,
    total_cost: Money,
    rules: &RuleSet,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    if down_payment < rules.min_down_payment() {
        violations.push(Violation::new(
            ViolationCode::MinDownPayment,
            format!("Minimum down payment is {}", rules.min_down_payment()),
        ));
    }

    // Independent of the minimum check; both may fire for the same input.
    if down_payment.is_zero() && !rules.allow_zero_down_payment() {
        violations.push(Violation::new(ViolationCode::ZeroDownPayment, "Down payment cannot be $0"));
    }

    if installments > rules.max_installment_months() {
        violations.push(Violation::new(
            ViolationCode::MaxInstallments,
            format!("Maximum installment duration is {} months", rules.max_installment_months()),
        ));
    }

    if down_payment > total_cost {
        violations.push(Violation::new(
            ViolationCode::DownPaymentExceedsTotal,
            "Down payment cannot exceed total cost",
        ));
    }

    if installments < 1 {
        violations.push(Violation::new(
            ViolationCode::MinInstallments,
            "Installments must be at least 1 month",
        ));
    }

    violations
}

/// Validates a proposal against `rules`.
#[must_use]
pub fn validate_proposal(proposal: &PaymentPlanProposal, rules: &RuleSet) -> Vec<Violation> {
    validate_payment_plan(proposal.down_payment, proposal.installments, proposal.total_cost, rules)
}

// ============================================================================
// SECTION: Repair
// ============================================================================

/// Clamps a payment plan into the legal ranges defined by `rules`.
///
/// The ceiling clamp runs after the minimum clamps, so a minimum above the
/// total cost is undone (last applied wins).
#[must_use]
pub fn repair_payment_plan(
    down_payment: Money,
    installments: i32,
    total_cost: Money,
    rules: &RuleSet,
) -> PaymentPlanProposal {
    let mut fixed_down_payment = down_payment;
    let mut fixed_installments = installments;

    if fixed_down_payment < rules.min_down_payment() {
        fixed_down_payment = rules.min_down_payment();
    }
    // No-op when the minimum is zero; see `RuleSet::zero_down_is_unrepairable`.
    if fixed_down_payment.is_zero() && !rules.allow_zero_down_payment() {
        fixed_down_payment = rules.min_down_payment();
    }
    if fixed_down_payment > total_cost {
        fixed_down_payment = total_cost;
    }

    if fixed_installments > rules.max_installment_months() {
        fixed_installments = rules.max_installment_months();
    }
    if fixed_installments < 1 {
        fixed_installments = 1;
    }

    PaymentPlanProposal::new(fixed_down_payment, fixed_installments, total_cost)
}

/// Repairs a proposal against `rules`.
#[must_use]
pub fn repair_proposal(proposal: &PaymentPlanProposal, rules: &RuleSet) -> PaymentPlanProposal {
    repair_payment_plan(proposal.down_payment, proposal.installments, proposal.total_cost, rules)
}

impl PaymentPlanProposal {
    /// Validates this proposal against `rules`.
    #[must_use]
    pub fn validate(&self, rules: &RuleSet) -> Vec<Violation> {
        validate_proposal(self, rules)
    }

    /// Returns the repaired form of this proposal.
    #[must_use]
    pub fn repair(&self, rules: &RuleSet) -> Self {
        repair_proposal(self, rules)
    }
}
