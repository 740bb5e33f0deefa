// crates/plan-gate-config/src/lib.rs
// ============================================================================
// Module: Plan Gate Config Library
// Description: Canonical config model, validation, and example generation.
// Purpose: Single source of truth for plan-gate.toml semantics.
// Dependencies: plan-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `plan-gate-config` defines the configuration model for Plan Gate: the
//! financing rule set, audit output, and payment presets. Validation is
//! strict and fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
