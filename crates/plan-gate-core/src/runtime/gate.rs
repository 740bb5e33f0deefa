// crates/plan-gate-core/src/runtime/gate.rs
// ============================================================================
// Module: Plan Gate
// Description: Caller-side contract around the constraint engine.
// Purpose: Gate finalization and suggestion acceptance on violation-free plans.
// Dependencies: crate::{core, interfaces, runtime::{agreement, engine}}, serde, thiserror
// ============================================================================

//! ## Overview
//! [`PlanGate`] owns the active [`RuleSet`] and an [`AuditSink`]. It wraps
//! the pure engine with the rules every caller must follow:
//! - validate on every change,
//! - re-validate after repair instead of trusting it,
//! - block "proceed" actions unless the violation list is empty.
//!
//! Finalization yields an [`Agreement`]; signature and payment capture are
//! gate operations as well. Every decision is written to the sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use serde::Serialize;
use thiserror::Error;

use crate::core::AuditEvent;
use crate::core::AuditEventParams;
use crate::core::LedgerAction;
use crate::core::Money;
use crate::core::PaymentPlanProposal;
use crate::core::RuleSet;
use crate::core::RuleSetError;
use crate::core::RuleSetUpdate;
use crate::core::Violation;
use crate::interfaces::AuditSink;
use crate::runtime::agreement::Agreement;
use crate::runtime::agreement::AgreementStatus;
use crate::runtime::agreement::PaymentReceipt;
use crate::runtime::agreement::PaymentRecord;
use crate::runtime::engine::repair_proposal;
use crate::runtime::engine::validate_proposal;
use crate::runtime::quote::PlanQuote;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Actor recorded for gate decisions unless overridden.
pub const DEFAULT_GATE_ACTOR: &str = "System (DCE)";

// ============================================================================
// SECTION: Results
// ============================================================================

/// Validation result for a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Proposal that was evaluated.
    pub proposal: PaymentPlanProposal,
    /// Violations in check order.
    pub violations: Vec<Violation>,
    /// Monthly payment summary.
    pub quote: PlanQuote,
}

impl Evaluation {
    /// Returns true when no rule failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Result of an auto-fix request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairOutcome {
    /// Proposal before repair.
    pub original: PaymentPlanProposal,
    /// Proposal after repair.
    pub repaired: PaymentPlanProposal,
    /// True when repair changed any value.
    pub changed: bool,
    /// Violations remaining after repair.
    pub residual: Vec<Violation>,
}

impl RepairOutcome {
    /// Returns true when the repaired proposal passes validation.
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.residual.is_empty()
    }
}

/// Review of an externally suggested plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionReview {
    /// Plan offered for application (repaired when the suggestion violated rules).
    pub suggested: PaymentPlanProposal,
    /// Original suggestion when it had to be repaired.
    pub original: Option<PaymentPlanProposal>,
    /// True when the suggestion was repaired.
    pub auto_fixed: bool,
    /// Violations of `suggested`.
    pub violations: Vec<Violation>,
}

impl SuggestionReview {
    /// Returns true when the suggested plan may be applied.
    #[must_use]
    pub fn is_applicable(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Terms of a plan that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizedPlan {
    /// Accepted proposal.
    pub plan: PaymentPlanProposal,
    /// Monthly payment summary.
    pub quote: PlanQuote,
    /// Optional subject reference.
    pub subject: Option<String>,
}

/// Plan gate errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// The proposal has violations and cannot proceed.
    #[error("payment plan blocked by {} violation(s)", .violations.len())]
    Blocked {
        /// Violations that blocked the proposal.
        violations: Vec<Violation>,
    },
    /// A rule update produced an invalid rule set.
    #[error(transparent)]
    Rules(#[from] RuleSetError),
    /// An agreement transition was requested out of order.
    #[error("agreement cannot move from {from} to {to}")]
    InvalidTransition {
        /// Current stage.
        from: AgreementStatus,
        /// Requested stage.
        to: AgreementStatus,
    },
    /// A signature was captured without a signer name.
    #[error("signer name is required")]
    MissingSigner,
    /// A payment was reported without a transaction id.
    #[error("payment transaction id is required")]
    MissingTransactionId,
    /// A payment was reported with a negative amount.
    #[error("payment amount cannot be negative: {0}")]
    NegativePayment(Money),
}

// ============================================================================
// SECTION: Plan Gate
// ============================================================================

/// Rule-enforcing front end for payment plan proposals.
pub struct PlanGate<S> {
    /// Active rule set.
    rules: RuleSet,
    /// Audit destination.
    sink: S,
    /// Actor recorded on audit events.
    actor: String,
    /// Next audit sequence number.
    sequence: AtomicU64,
}

impl<S: AuditSink> PlanGate<S> {
    /// Creates a gate over `rules` recording to `sink`.
    #[must_use]
    pub fn new(rules: RuleSet, sink: S) -> Self {
        Self {
            rules,
            sink,
            actor: DEFAULT_GATE_ACTOR.to_string(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Overrides the actor recorded on audit events.
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Returns the active rule set.
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the audit sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Validates `proposal` and records the outcome.
    pub fn evaluate(&self, proposal: &PaymentPlanProposal) -> Evaluation {
        let violations = validate_proposal(proposal, &self.rules);
        let quote = PlanQuote::compute(proposal, &self.rules);
        self.record(
            LedgerAction::RuleValidation,
            None,
            format!(
                "Payment plan validated: {} down, {} months, {} cost basis; {} violation(s)",
                proposal.down_payment,
                proposal.installments,
                proposal.total_cost,
                violations.len()
            ),
        );
        Evaluation {
            proposal: *proposal,
            violations,
            quote,
        }
    }

    /// Repairs `proposal` and re-validates the result.
    pub fn auto_fix(&self, proposal: &PaymentPlanProposal) -> RepairOutcome {
        let repaired = repair_proposal(proposal, &self.rules);
        let residual = validate_proposal(&repaired, &self.rules);
        self.record(
            LedgerAction::AutoFix,
            None,
            format!(
                "Auto-fix: {} down, {} months -> {} down, {} months; {} residual violation(s)",
                proposal.down_payment,
                proposal.installments,
                repaired.down_payment,
                repaired.installments,
                residual.len()
            ),
        );
        RepairOutcome {
            original: *proposal,
            repaired,
            changed: repaired != *proposal,
            residual,
        }
    }

    /// Reviews a suggested plan, repairing it when it violates the rules.
    pub fn review_suggestion(&self, suggestion: &PaymentPlanProposal) -> SuggestionReview {
        let violations = validate_proposal(suggestion, &self.rules);
        let review = if violations.is_empty() {
            SuggestionReview {
                suggested: *suggestion,
                original: None,
                auto_fixed: false,
                violations,
            }
        } else {
            let repaired = repair_proposal(suggestion, &self.rules);
            SuggestionReview {
                suggested: repaired,
                original: Some(*suggestion),
                auto_fixed: true,
                violations: validate_proposal(&repaired, &self.rules),
            }
        };
        self.record(
            LedgerAction::SuggestionReview,
            None,
            format!(
                "Suggestion {} down, {} months: {}",
                review.suggested.down_payment,
                review.suggested.installments,
                match (review.auto_fixed, review.is_applicable()) {
                    (false, _) => "accepted as proposed",
                    (true, true) => "adjusted to comply",
                    (true, false) => "still non-compliant after adjustment",
                }
            ),
        );
        review
    }

    /// Finalizes `proposal` into an [`Agreement`] when it has no violations.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Blocked`] with the violations otherwise.
    pub fn finalize(
        &self,
        proposal: &PaymentPlanProposal,
        subject: Option<&str>,
    ) -> Result<Agreement, GateError> {
        let violations = validate_proposal(proposal, &self.rules);
        if !violations.is_empty() {
            return Err(GateError::Blocked {
                violations,
            });
        }
        let quote = PlanQuote::compute(proposal, &self.rules);
        self.record(
            LedgerAction::AgreementFinalized,
            subject,
            format!(
                "Agreement finalized: {} down, {} months at {} per month",
                proposal.down_payment, proposal.installments, quote.monthly_payment
            ),
        );
        Ok(Agreement::new(FinalizedPlan {
            plan: *proposal,
            quote,
            subject: subject.map(str::to_string),
        }))
    }

    /// Sends `agreement` to the patient for remote signature.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidTransition`] unless the agreement is
    /// freshly finalized.
    pub fn send_for_signature(&self, agreement: &mut Agreement) -> Result<(), GateError> {
        agreement.mark_sent()?;
        self.record(
            LedgerAction::AgreementSent,
            agreement.terms().subject.as_deref(),
            "Agreement sent for remote signature".to_string(),
        );
        Ok(())
    }

    /// Records the signature of `signer` on `agreement`.
    ///
    /// The ledger entry is attributed to the signer.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingSigner`] for a blank name and
    /// [`GateError::InvalidTransition`] when the agreement was already signed.
    pub fn sign_agreement(
        &self,
        agreement: &mut Agreement,
        signer: &str,
    ) -> Result<(), GateError> {
        agreement.mark_signed(signer)?;
        let terms = agreement.terms();
        self.record_as(
            agreement.signed_by().unwrap_or(signer),
            LedgerAction::AgreementSigned,
            terms.subject.as_deref(),
            format!(
                "Digital signature captured: {} down, {} months at {} per month",
                terms.plan.down_payment, terms.plan.installments, terms.quote.monthly_payment
            ),
        );
        Ok(())
    }

    /// Records the payment described by `receipt` on a signed `agreement`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingTransactionId`],
    /// [`GateError::NegativePayment`], or [`GateError::InvalidTransition`]
    /// when the agreement is unsigned or already paid.
    pub fn complete_payment(
        &self,
        agreement: &mut Agreement,
        receipt: PaymentReceipt,
    ) -> Result<PaymentRecord, GateError> {
        let record = agreement.mark_paid(receipt)?.clone();
        self.record(
            LedgerAction::PaymentProcessed,
            agreement.terms().subject.as_deref(),
            format!(
                "Transaction: {}, Amount: {}, Method: {}",
                record.transaction_id, record.amount, record.method
            ),
        );
        Ok(record)
    }

    /// Merges `update` into the active rule set.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Rules`] when the merged rule set is invalid; the
    /// active rules are left unchanged.
    pub fn update_rules(&mut self, update: &RuleSetUpdate) -> Result<&RuleSet, GateError> {
        let rules = self.rules.updated(update)?;
        self.replace_rules(rules);
        Ok(&self.rules)
    }

    /// Replaces the active rule set.
    pub fn replace_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
        self.record(
            LedgerAction::RulesUpdated,
            None,
            format!(
                "Rules updated: minimum down payment {}, maximum {} months, zero down {}",
                self.rules.min_down_payment(),
                self.rules.max_installment_months(),
                if self.rules.allow_zero_down_payment() { "allowed" } else { "disallowed" }
            ),
        );
    }

    /// Emits an audit event attributed to the gate actor.
    fn record(&self, action: LedgerAction, subject: Option<&str>, details: String) {
        self.record_as(&self.actor, action, subject, details);
    }

    /// Emits an audit event attributed to `actor`.
    fn record_as(
        &self,
        actor: &str,
        action: LedgerAction,
        subject: Option<&str>,
        details: String,
    ) {
        let event = AuditEvent::new(AuditEventParams {
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
            actor: actor.to_string(),
            action,
            subject: subject.map(str::to_string),
            details,
        });
        self.sink.record(&event);
    }
}
