// crates/plan-gate-core/tests/quotes.rs
// ============================================================================
// Module: Quote, Preset, and Consultation Tests
// Description: Tests for monthly quotes, payment presets, and insurance netting.
// Purpose: Keep advisory figures informational and presets within the engine.
// ============================================================================

//! Quote, preset, and consultation tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use plan_gate_core::Consultation;
use plan_gate_core::Money;
use plan_gate_core::PaymentPlanProposal;
use plan_gate_core::PaymentPreset;
use plan_gate_core::PlanQuote;
use plan_gate_core::PresetError;
use plan_gate_core::RuleSet;
use plan_gate_core::default_presets;

// ============================================================================
// SECTION: Quotes
// ============================================================================

#[test]
fn quote_divides_financed_amount() {
    let proposal =
        PaymentPlanProposal::new(Money::from_dollars(1_000), 12, Money::from_dollars(5_000));
    let quote = PlanQuote::compute(&proposal, &RuleSet::default());
    assert_eq!(quote.financed_amount, Money::from_dollars(4_000));
    assert_eq!(quote.monthly_payment, Money::from_cents(33_333));
    assert!(!quote.below_min_monthly);
}

#[test]
fn quote_flags_small_monthly_payment_without_violation() {
    let rules = RuleSet::default();
    let proposal =
        PaymentPlanProposal::new(Money::from_dollars(4_900), 12, Money::from_dollars(5_000));
    let quote = PlanQuote::compute(&proposal, &rules);
    assert_eq!(quote.monthly_payment, Money::from_cents(833));
    assert!(quote.below_min_monthly);
    assert!(proposal.validate(&rules).is_empty());
}

#[test]
fn quote_without_installments_is_zero() {
    let proposal =
        PaymentPlanProposal::new(Money::from_dollars(1_000), 0, Money::from_dollars(5_000));
    let quote = PlanQuote::compute(&proposal, &RuleSet::default());
    assert_eq!(quote.monthly_payment, Money::zero());
    assert!(!quote.below_min_monthly);
}

// ============================================================================
// SECTION: Presets
// ============================================================================

#[test]
fn default_presets_are_valid() {
    let presets = default_presets();
    assert_eq!(presets.len(), 3);
    for preset in &presets {
        preset.validate().unwrap();
    }
}

#[test]
fn preset_apply_rounds_to_whole_dollars() {
    let standard = &default_presets()[0];
    let proposal = standard.apply(Money::from_dollars(5_000));
    assert_eq!(proposal.down_payment, Money::from_dollars(1_000));
    assert_eq!(proposal.installments, 12);
    assert!(proposal.validate(&RuleSet::default()).is_empty());

    let odd = standard.apply(Money::from_cents(123_456));
    assert_eq!(odd.down_payment, Money::from_dollars(247));
}

#[test]
fn preset_validation_rejects_bad_templates() {
    let mut preset = PaymentPreset {
        id: "custom".to_string(),
        name: "Custom".to_string(),
        down_payment_percent: 101,
        installments: 12,
        description: String::new(),
    };
    assert!(matches!(preset.validate(), Err(PresetError::PercentOutOfRange { .. })));
    preset.down_payment_percent = 10;
    preset.installments = 0;
    assert!(matches!(preset.validate(), Err(PresetError::InstallmentsOutOfRange { .. })));
    preset.installments = 12;
    preset.id = " ".to_string();
    assert_eq!(preset.validate(), Err(PresetError::MissingId));
}

// ============================================================================
// SECTION: Consultations
// ============================================================================

#[test]
fn consultation_nets_insurance_from_total() {
    let mut consultation = Consultation {
        treatment_name: "Invisalign Full Treatment".to_string(),
        total_cost: Money::from_dollars(6_500),
        insurance_coverage: Money::from_dollars(1_500),
        down_payment: Money::from_dollars(500),
        installments: 30,
    };
    assert_eq!(consultation.patient_cost(), Money::from_dollars(5_000));

    let proposal = consultation.proposal();
    assert_eq!(proposal.total_cost, Money::from_dollars(5_000));

    let repaired = proposal.repair(&RuleSet::default());
    consultation.apply(&repaired);
    assert_eq!(consultation.down_payment, Money::from_dollars(1_000));
    assert_eq!(consultation.installments, 24);
}

#[test]
fn insurance_above_total_floors_at_zero() {
    let consultation = Consultation {
        treatment_name: "Retainer".to_string(),
        total_cost: Money::from_dollars(400),
        insurance_coverage: Money::from_dollars(900),
        down_payment: Money::zero(),
        installments: 1,
    };
    assert_eq!(consultation.patient_cost(), Money::zero());
}
