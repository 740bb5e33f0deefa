// crates/plan-gate-core/src/core/mod.rs
// ============================================================================
// Module: Plan Gate Core Types
// Description: Data model for payment plan rules, proposals, and audit events.
// Purpose: Define the values exchanged between callers and the engine.
// Dependencies: bigdecimal, serde, thiserror, time
// ============================================================================

//! ## Overview
//! Core types are plain data: money, rule sets, proposals, violations,
//! presets and audit events. Behavior lives in [`crate::runtime`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod money;
pub mod plan;
pub mod presets;
pub mod rules;
pub mod violation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditEvent;
pub use audit::AuditEventParams;
pub use audit::LedgerAction;
pub use money::MAX_MONEY_CENTS;
pub use money::Money;
pub use money::MoneyError;
pub use plan::Consultation;
pub use plan::PaymentPlanProposal;
pub use presets::PaymentPreset;
pub use presets::PresetError;
pub use presets::default_presets;
pub use rules::MAX_DISCOUNT_PERCENT;
pub use rules::MAX_INSTALLMENT_MONTHS;
pub use rules::RuleSet;
pub use rules::RuleSetError;
pub use rules::RuleSetSpec;
pub use rules::RuleSetUpdate;
pub use violation::PlanField;
pub use violation::Violation;
pub use violation::ViolationCode;
