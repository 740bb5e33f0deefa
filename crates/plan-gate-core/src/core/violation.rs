// crates/plan-gate-core/src/core/violation.rs
// ============================================================================
// Module: Plan Gate Violations
// Description: Field-level rule violations reported by the validator.
// Purpose: Represent rule failures as data rather than errors.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`Violation`] ties one rule failure to one field of a payment plan
//! proposal. Violations are returned, never raised.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Proposal field a violation pertains to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanField {
    /// Upfront portion of the total cost.
    DownPayment,
    /// Count of monthly payments.
    Installments,
}

impl PlanField {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DownPayment => "down_payment",
            Self::Installments => "installments",
        }
    }
}

impl fmt::Display for PlanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies which rule produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// Down payment below the configured minimum.
    MinDownPayment,
    /// Zero down payment while zero-down is disallowed.
    ZeroDownPayment,
    /// Installments above the configured maximum.
    MaxInstallments,
    /// Down payment greater than the total cost.
    DownPaymentExceedsTotal,
    /// Fewer than one installment.
    MinInstallments,
}

impl ViolationCode {
    /// Returns the field this rule constrains.
    #[must_use]
    pub const fn field(self) -> PlanField {
        match self {
            Self::MinDownPayment | Self::ZeroDownPayment | Self::DownPaymentExceedsTotal => {
                PlanField::DownPayment
            }
            Self::MaxInstallments | Self::MinInstallments => PlanField::Installments,
        }
    }
}

/// A single rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Offending proposal field.
    pub field: PlanField,
    /// Rule that failed.
    pub code: ViolationCode,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    /// Creates a violation for `code`; the field is derived from the code.
    #[must_use]
    pub fn new(code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field: code.field(),
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
