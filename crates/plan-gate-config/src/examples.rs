// crates/plan-gate-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and `plan-gate config example`.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for Plan Gate configuration. The example loads and
//! validates cleanly.

/// Returns a canonical example `plan-gate.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[rules]
min_down_payment = "1000.00"
max_installment_months = 24
allow_zero_down_payment = false
# Advisory only; reported in quotes, never enforced.
max_discount_percent = 10
min_monthly_payment = "100.00"

[audit]
enabled = true
# path = "plan-gate-audit.jsonl"

[[presets]]
id = "standard"
name = "Standard"
down_payment_percent = 20
installments = 12
description = "20% down, one year of payments"

[[presets]]
id = "low-monthly"
name = "Low Monthly"
down_payment_percent = 20
installments = 24
description = "Smallest monthly payment over two years"

[[presets]]
id = "fast-track"
name = "Fast Track"
down_payment_percent = 40
installments = 6
description = "Larger down payment, paid off in six months"
"#,
    )
}
