// crates/plan-gate-core/src/runtime/agreement.rs
// ============================================================================
// Module: Plan Gate Agreements
// Description: Lifecycle of a finalized payment agreement.
// Purpose: Track signature and down-payment capture after the gate passes.
// Dependencies: crate::{core, runtime::gate}, serde, time
// ============================================================================

//! ## Overview
//! An [`Agreement`] is only ever produced by
//! [`PlanGate::finalize`](crate::runtime::PlanGate::finalize), so every
//! agreement started from a violation-free plan. It then moves forward
//! through [`AgreementStatus`]:
//!
//! ```text
//! Finalized -> SentForSignature -> Signed -> Paid
//!          \_______________________/
//! ```
//!
//! Signing in the office skips `SentForSignature`. No stage can be revisited.
//! Transitions are driven by the gate so each one is audited.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::core::Money;
use crate::runtime::gate::FinalizedPlan;
use crate::runtime::gate::GateError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Payment kind recorded when the receipt does not name one.
pub const DEFAULT_PAYMENT_KIND: &str = "Down Payment";

// ============================================================================
// SECTION: Status
// ============================================================================

/// Lifecycle stage of an agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    /// Plan passed the gate.
    Finalized,
    /// Agreement was sent to the patient for remote signature.
    SentForSignature,
    /// Patient signature was captured.
    Signed,
    /// Down payment was captured.
    Paid,
}

impl AgreementStatus {
    /// Returns true when `next` directly follows this stage.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Finalized, Self::SentForSignature)
                | (Self::Finalized | Self::SentForSignature, Self::Signed)
                | (Self::Signed, Self::Paid)
        )
    }

    /// Returns the human-readable stage name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Finalized => "finalized",
            Self::SentForSignature => "sent for signature",
            Self::Signed => "signed",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for AgreementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Payments
// ============================================================================

/// Payment details reported by the processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentReceipt {
    /// Processor transaction identifier.
    pub transaction_id: String,
    /// Payment method description (card, bank transfer, ...).
    pub method: String,
    /// Amount captured; defaults to the agreement's down payment.
    #[serde(default)]
    pub amount: Option<Money>,
    /// Payment kind; defaults to [`DEFAULT_PAYMENT_KIND`].
    #[serde(default)]
    pub kind: Option<String>,
}

impl PaymentReceipt {
    /// Creates a receipt for the down payment.
    #[must_use]
    pub fn new(transaction_id: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            method: method.into(),
            amount: None,
            kind: None,
        }
    }
}

/// Payment captured against an agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRecord {
    /// Processor transaction identifier.
    pub transaction_id: String,
    /// Payment method description.
    pub method: String,
    /// Amount captured.
    pub amount: Money,
    /// Payment kind.
    pub kind: String,
    /// Capture time.
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

// ============================================================================
// SECTION: Agreement
// ============================================================================

/// Finalized payment agreement and its lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agreement {
    /// Terms accepted by the gate.
    terms: FinalizedPlan,
    /// Current stage.
    status: AgreementStatus,
    /// Time the agreement was sent for remote signature.
    #[serde(with = "time::serde::rfc3339::option")]
    sent_at: Option<OffsetDateTime>,
    /// Name of the signer.
    signed_by: Option<String>,
    /// Signature time.
    #[serde(with = "time::serde::rfc3339::option")]
    signed_at: Option<OffsetDateTime>,
    /// Captured payment.
    payment: Option<PaymentRecord>,
}

impl Agreement {
    /// Starts an agreement from gate-approved terms.
    pub(crate) const fn new(terms: FinalizedPlan) -> Self {
        Self {
            terms,
            status: AgreementStatus::Finalized,
            sent_at: None,
            signed_by: None,
            signed_at: None,
            payment: None,
        }
    }

    /// Returns the accepted terms.
    #[must_use]
    pub const fn terms(&self) -> &FinalizedPlan {
        &self.terms
    }

    /// Returns the current stage.
    #[must_use]
    pub const fn status(&self) -> AgreementStatus {
        self.status
    }

    /// Returns when the agreement was sent for signature.
    #[must_use]
    pub const fn sent_at(&self) -> Option<OffsetDateTime> {
        self.sent_at
    }

    /// Returns the signer's name.
    #[must_use]
    pub fn signed_by(&self) -> Option<&str> {
        self.signed_by.as_deref()
    }

    /// Returns the signature time.
    #[must_use]
    pub const fn signed_at(&self) -> Option<OffsetDateTime> {
        self.signed_at
    }

    /// Returns the captured payment.
    #[must_use]
    pub const fn payment(&self) -> Option<&PaymentRecord> {
        self.payment.as_ref()
    }

    /// Moves to `next` or reports an out-of-order transition.
    fn advance(&mut self, next: AgreementStatus) -> Result<(), GateError> {
        if !self.status.can_advance_to(next) {
            return Err(GateError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Marks the agreement as sent for remote signature.
    pub(crate) fn mark_sent(&mut self) -> Result<(), GateError> {
        self.advance(AgreementStatus::SentForSignature)?;
        self.sent_at = Some(OffsetDateTime::now_utc());
        Ok(())
    }

    /// Records the signature of `signer`.
    pub(crate) fn mark_signed(&mut self, signer: &str) -> Result<(), GateError> {
        if signer.trim().is_empty() {
            return Err(GateError::MissingSigner);
        }
        self.advance(AgreementStatus::Signed)?;
        self.signed_by = Some(signer.trim().to_string());
        self.signed_at = Some(OffsetDateTime::now_utc());
        Ok(())
    }

    /// Records the captured payment described by `receipt`.
    pub(crate) fn mark_paid(
        &mut self,
        receipt: PaymentReceipt,
    ) -> Result<&PaymentRecord, GateError> {
        if receipt.transaction_id.trim().is_empty() {
            return Err(GateError::MissingTransactionId);
        }
        let amount = receipt.amount.unwrap_or(self.terms.plan.down_payment);
        if amount.is_negative() {
            return Err(GateError::NegativePayment(amount));
        }
        self.advance(AgreementStatus::Paid)?;
        let record = PaymentRecord {
            transaction_id: receipt.transaction_id.trim().to_string(),
            method: receipt.method,
            amount,
            kind: receipt.kind.unwrap_or_else(|| DEFAULT_PAYMENT_KIND.to_string()),
            recorded_at: OffsetDateTime::now_utc(),
        };
        Ok(&*self.payment.insert(record))
    }
}
