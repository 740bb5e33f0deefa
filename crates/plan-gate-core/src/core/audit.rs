// crates/plan-gate-core/src/core/audit.rs
// ============================================================================
// Module: Plan Gate Audit Events
// Description: Structured audit records for constraint engine decisions.
// Purpose: Describe ledger entries independently of where they are stored.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Every decision the plan gate makes (validation, auto-fix, suggestion
//! review, agreement lifecycle, rule change) is described by an [`AuditEvent`] and
//! handed to an [`AuditSink`](crate::interfaces::AuditSink). Events serialize
//! as single JSON objects so sinks can emit JSON lines.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Kind of decision recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerAction {
    /// A proposal was validated.
    RuleValidation,
    /// A proposal was repaired.
    AutoFix,
    /// A suggested plan was reviewed.
    SuggestionReview,
    /// An agreement was finalized.
    AgreementFinalized,
    /// An agreement was sent for remote signature.
    AgreementSent,
    /// A patient signed an agreement.
    AgreementSigned,
    /// A down payment was captured.
    PaymentProcessed,
    /// The active rule set changed.
    RulesUpdated,
}

impl LedgerAction {
    /// Returns the human-readable label shown in ledger views.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RuleValidation => "Rule Validation",
            Self::AutoFix => "Auto-Fix",
            Self::SuggestionReview => "Suggestion Review",
            Self::AgreementFinalized => "Agreement Finalized",
            Self::AgreementSent => "Agreement Sent",
            Self::AgreementSigned => "Agreement Signed",
            Self::PaymentProcessed => "Payment Processed",
            Self::RulesUpdated => "Rules Updated",
        }
    }
}

impl fmt::Display for LedgerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Event identifier.
    pub event: String,
    /// Per-gate sequence number.
    pub sequence: u64,
    /// Time the event was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
    /// Actor responsible for the decision.
    pub actor: String,
    /// Decision kind.
    pub action: LedgerAction,
    /// Optional subject (patient or agreement reference).
    pub subject: Option<String>,
    /// Free-form decision details.
    pub details: String,
}

/// Inputs required to construct an audit event.
pub struct AuditEventParams {
    /// Per-gate sequence number.
    pub sequence: u64,
    /// Actor responsible for the decision.
    pub actor: String,
    /// Decision kind.
    pub action: LedgerAction,
    /// Optional subject reference.
    pub subject: Option<String>,
    /// Free-form decision details.
    pub details: String,
}

impl AuditEvent {
    /// Creates a new audit event stamped with the current UTC time.
    #[must_use]
    pub fn new(params: AuditEventParams) -> Self {
        Self {
            event: "plan_gate_audit".to_string(),
            sequence: params.sequence,
            recorded_at: OffsetDateTime::now_utc(),
            actor: params.actor,
            action: params.action,
            subject: params.subject,
            details: params.details,
        }
    }
}
