// crates/plan-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Plan Gate Runtime
// Description: Constraint engine, plan gate, quotes, and audit sinks.
// Purpose: Evaluate, repair and gate payment plan proposals.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the constraint engine, the gate built on it,
//! and the agreement lifecycle the gate drives. All entry points (library
//! callers, CLI) go through the same [`engine`] functions.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod agreement;
pub mod engine;
pub mod gate;
pub mod ledger;
pub mod quote;
pub mod sinks;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use agreement::Agreement;
pub use agreement::AgreementStatus;
pub use agreement::DEFAULT_PAYMENT_KIND;
pub use agreement::PaymentReceipt;
pub use agreement::PaymentRecord;
pub use engine::repair_payment_plan;
pub use engine::repair_proposal;
pub use engine::validate_payment_plan;
pub use engine::validate_proposal;
pub use gate::DEFAULT_GATE_ACTOR;
pub use gate::Evaluation;
pub use gate::FinalizedPlan;
pub use gate::GateError;
pub use gate::PlanGate;
pub use gate::RepairOutcome;
pub use gate::SuggestionReview;
pub use ledger::InMemoryLedger;
pub use ledger::LedgerOrder;
pub use ledger::LedgerQuery;
pub use quote::PlanQuote;
pub use sinks::FileAuditSink;
pub use sinks::NoopAuditSink;
pub use sinks::StderrAuditSink;
