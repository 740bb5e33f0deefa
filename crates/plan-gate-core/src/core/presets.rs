// crates/plan-gate-core/src/core/presets.rs
// ============================================================================
// Module: Plan Gate Payment Presets
// Description: Named down-payment/term templates for quick plan selection.
// Purpose: Turn a preset and a cost basis into a proposal for validation.
// Dependencies: crate::core::{money, plan}, serde, thiserror
// ============================================================================

//! ## Overview
//! Presets are templates, not pre-approved plans: the proposal a preset
//! produces still has to pass the constraint engine.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::money::Money;
use crate::core::plan::PaymentPlanProposal;
use crate::core::rules::MAX_INSTALLMENT_MONTHS;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Payment plan template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPreset {
    /// Stable preset identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Down payment as a percentage of the cost basis.
    pub down_payment_percent: u8,
    /// Installment count.
    pub installments: i32,
    /// Short description.
    #[serde(default)]
    pub description: String,
}

/// Preset validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetError {
    /// Preset identifier is blank.
    #[error("preset id must be set")]
    MissingId,
    /// Down payment percentage above 100.
    #[error("preset {id}: down_payment_percent must be at most 100 (got {percent})")]
    PercentOutOfRange {
        /// Preset identifier.
        id: String,
        /// Offending percentage.
        percent: u8,
    },
    /// Installment count outside the supported range.
    #[error("preset {id}: installments must be between 1 and {max} (got {installments})", max = MAX_INSTALLMENT_MONTHS)]
    InstallmentsOutOfRange {
        /// Preset identifier.
        id: String,
        /// Offending installment count.
        installments: i32,
    },
}

impl PaymentPreset {
    /// Checks preset fields.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError`] when the id is blank or a value is out of range.
    pub fn validate(&self) -> Result<(), PresetError> {
        if self.id.trim().is_empty() {
            return Err(PresetError::MissingId);
        }
        if self.down_payment_percent > 100 {
            return Err(PresetError::PercentOutOfRange {
                id: self.id.clone(),
                percent: self.down_payment_percent,
            });
        }
        if !(1 ..= MAX_INSTALLMENT_MONTHS).contains(&self.installments) {
            return Err(PresetError::InstallmentsOutOfRange {
                id: self.id.clone(),
                installments: self.installments,
            });
        }
        Ok(())
    }

    /// Builds the proposal this preset yields for `total_cost`.
    ///
    /// The down payment is rounded to whole dollars.
    #[must_use]
    pub fn apply(&self, total_cost: Money) -> PaymentPlanProposal {
        let down_payment =
            total_cost.percent_of_whole_dollars(self.down_payment_percent).unwrap_or(total_cost);
        PaymentPlanProposal::new(down_payment, self.installments, total_cost)
    }
}

/// Returns the stock presets offered by the consultation screen.
#[must_use]
pub fn default_presets() -> Vec<PaymentPreset> {
    vec![
        PaymentPreset {
            id: "standard".to_string(),
            name: "Standard".to_string(),
            down_payment_percent: 20,
            installments: 12,
            description: "20% down, one year of payments".to_string(),
        },
        PaymentPreset {
            id: "low-monthly".to_string(),
            name: "Low Monthly".to_string(),
            down_payment_percent: 20,
            installments: 24,
            description: "Smallest monthly payment over two years".to_string(),
        },
        PaymentPreset {
            id: "fast-track".to_string(),
            name: "Fast Track".to_string(),
            down_payment_percent: 40,
            installments: 6,
            description: "Larger down payment, paid off in six months".to_string(),
        },
    ]
}
