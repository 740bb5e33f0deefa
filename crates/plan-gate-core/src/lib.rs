// crates/plan-gate-core/src/lib.rs
// ============================================================================
// Module: Plan Gate Core Library
// Description: Public API surface for the Plan Gate constraint engine.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Plan Gate core provides deterministic validation and repair of patient
//! payment plans against clinic financing rules, plus a gate that blocks
//! non-compliant plans and records every decision to an audit sink. It has
//! no UI or framework dependency; rules are passed in explicitly.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::AuditSink;
pub use runtime::Agreement;
pub use runtime::AgreementStatus;
pub use runtime::DEFAULT_GATE_ACTOR;
pub use runtime::DEFAULT_PAYMENT_KIND;
pub use runtime::Evaluation;
pub use runtime::FileAuditSink;
pub use runtime::FinalizedPlan;
pub use runtime::GateError;
pub use runtime::InMemoryLedger;
pub use runtime::LedgerOrder;
pub use runtime::LedgerQuery;
pub use runtime::NoopAuditSink;
pub use runtime::PaymentReceipt;
pub use runtime::PaymentRecord;
pub use runtime::PlanGate;
pub use runtime::PlanQuote;
pub use runtime::RepairOutcome;
pub use runtime::StderrAuditSink;
pub use runtime::SuggestionReview;
pub use runtime::repair_payment_plan;
pub use runtime::validate_payment_plan;
