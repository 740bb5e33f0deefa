// crates/plan-gate-core/src/core/rules.rs
// ============================================================================
// Module: Plan Gate Rule Set
// Description: Financial constraints applied to payment plan proposals.
// Purpose: Provide an immutable, validated-at-construction rule set.
// Dependencies: crate::core::money, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`RuleSet`] is the configuration the constraint engine evaluates
//! against. Every constructor path (including deserialization through
//! [`RuleSetSpec`]) validates the fields, so engine calls never re-check
//! configuration.
//!
//! `max_discount_percent` and `min_monthly_payment` are carried for callers
//! and quotes but are never enforced as violations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use thiserror::Error;

use crate::core::money::Money;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Largest configurable installment term in months.
pub const MAX_INSTALLMENT_MONTHS: i32 = 600;
/// Largest configurable discount percentage.
pub const MAX_DISCOUNT_PERCENT: u8 = 100;

// ============================================================================
// SECTION: Rule Set
// ============================================================================

/// Validated financial constraints for payment plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleSetSpec", into = "RuleSetSpec")]
pub struct RuleSet {
    /// Minimum acceptable down payment.
    min_down_payment: Money,
    /// Maximum acceptable installment count.
    max_installment_months: i32,
    /// Whether a down payment of exactly zero is permitted.
    allow_zero_down_payment: bool,
    /// Advisory maximum discount percentage.
    max_discount_percent: Option<u8>,
    /// Advisory minimum monthly payment.
    min_monthly_payment: Option<Money>,
}

impl RuleSet {
    /// Builds a rule set from the enforced constraints.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError`] when the minimum down payment is negative or
    /// the installment term is outside `1..=MAX_INSTALLMENT_MONTHS`.
    pub fn new(
        min_down_payment: Money,
        max_installment_months: i32,
        allow_zero_down_payment: bool,
    ) -> Result<Self, RuleSetError> {
        let rules = Self {
            min_down_payment,
            max_installment_months,
            allow_zero_down_payment,
            max_discount_percent: None,
            min_monthly_payment: None,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Sets the advisory maximum discount percentage.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::DiscountPercentOutOfRange`] above 100.
    pub fn with_max_discount_percent(mut self, percent: u8) -> Result<Self, RuleSetError> {
        self.max_discount_percent = Some(percent);
        self.validate()?;
        Ok(self)
    }

    /// Sets the advisory minimum monthly payment.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::NegativeMinMonthlyPayment`] for negative amounts.
    pub fn with_min_monthly_payment(mut self, amount: Money) -> Result<Self, RuleSetError> {
        self.min_monthly_payment = Some(amount);
        self.validate()?;
        Ok(self)
    }

    /// Returns the minimum acceptable down payment.
    #[must_use]
    pub const fn min_down_payment(&self) -> Money {
        self.min_down_payment
    }

    /// Returns the maximum installment count.
    #[must_use]
    pub const fn max_installment_months(&self) -> i32 {
        self.max_installment_months
    }

    /// Returns whether a zero down payment is allowed.
    #[must_use]
    pub const fn allow_zero_down_payment(&self) -> bool {
        self.allow_zero_down_payment
    }

    /// Returns the advisory maximum discount percentage.
    #[must_use]
    pub const fn max_discount_percent(&self) -> Option<u8> {
        self.max_discount_percent
    }

    /// Returns the advisory minimum monthly payment.
    #[must_use]
    pub const fn min_monthly_payment(&self) -> Option<Money> {
        self.min_monthly_payment
    }

    /// Returns true when repair cannot lift a zero down payment out of violation.
    ///
    /// With a zero minimum and zero-down disallowed, the zero-down clamp
    /// raises the down payment to the minimum, which is still zero.
    #[must_use]
    pub const fn zero_down_is_unrepairable(&self) -> bool {
        self.min_down_payment.is_zero() && !self.allow_zero_down_payment
    }

    /// Returns a new rule set with `update` merged over the current values.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError`] when the merged rule set is invalid.
    pub fn updated(&self, update: &RuleSetUpdate) -> Result<Self, RuleSetError> {
        let merged = Self {
            min_down_payment: update.min_down_payment.unwrap_or(self.min_down_payment),
            max_installment_months: update
                .max_installment_months
                .unwrap_or(self.max_installment_months),
            allow_zero_down_payment: update
                .allow_zero_down_payment
                .unwrap_or(self.allow_zero_down_payment),
            max_discount_percent: update.max_discount_percent.unwrap_or(self.max_discount_percent),
            min_monthly_payment: update.min_monthly_payment.unwrap_or(self.min_monthly_payment),
        };
        merged.validate()?;
        Ok(merged)
    }

    /// Checks field ranges.
    fn validate(&self) -> Result<(), RuleSetError> {
        if self.min_down_payment.is_negative() {
            return Err(RuleSetError::NegativeMinDownPayment(self.min_down_payment));
        }
        if !(1 ..= MAX_INSTALLMENT_MONTHS).contains(&self.max_installment_months) {
            return Err(RuleSetError::InstallmentMonthsOutOfRange(self.max_installment_months));
        }
        if let Some(percent) = self.max_discount_percent
            && percent > MAX_DISCOUNT_PERCENT
        {
            return Err(RuleSetError::DiscountPercentOutOfRange(percent));
        }
        if let Some(amount) = self.min_monthly_payment
            && amount.is_negative()
        {
            return Err(RuleSetError::NegativeMinMonthlyPayment(amount));
        }
        Ok(())
    }
}

impl Default for RuleSet {
    /// Demo clinic rules: $1,000.00 minimum, 24 months, zero down disallowed.
    fn default() -> Self {
        Self {
            min_down_payment: Money::from_dollars(1_000),
            max_installment_months: 24,
            allow_zero_down_payment: false,
            max_discount_percent: Some(10),
            min_monthly_payment: Some(Money::from_dollars(100)),
        }
    }
}

// ============================================================================
// SECTION: Wire Form
// ============================================================================

/// Serializable rule set form; converted into [`RuleSet`] with validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetSpec {
    /// Minimum acceptable down payment.
    pub min_down_payment: Money,
    /// Maximum acceptable installment count.
    pub max_installment_months: i32,
    /// Whether a down payment of exactly zero is permitted.
    #[serde(default)]
    pub allow_zero_down_payment: bool,
    /// Advisory maximum discount percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount_percent: Option<u8>,
    /// Advisory minimum monthly payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_monthly_payment: Option<Money>,
}

impl TryFrom<RuleSetSpec> for RuleSet {
    type Error = RuleSetError;

    fn try_from(spec: RuleSetSpec) -> Result<Self, Self::Error> {
        let rules = Self {
            min_down_payment: spec.min_down_payment,
            max_installment_months: spec.max_installment_months,
            allow_zero_down_payment: spec.allow_zero_down_payment,
            max_discount_percent: spec.max_discount_percent,
            min_monthly_payment: spec.min_monthly_payment,
        };
        rules.validate()?;
        Ok(rules)
    }
}

impl From<RuleSet> for RuleSetSpec {
    fn from(rules: RuleSet) -> Self {
        Self {
            min_down_payment: rules.min_down_payment,
            max_installment_months: rules.max_installment_months,
            allow_zero_down_payment: rules.allow_zero_down_payment,
            max_discount_percent: rules.max_discount_percent,
            min_monthly_payment: rules.min_monthly_payment,
        }
    }
}

/// Partial rule set update; unset fields keep their current values.
///
/// Advisory fields take a nested option: `Some(None)` (JSON `null`) clears
/// the advisory, `None` (field absent) keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(clippy::option_option, reason = "Outer option marks presence; inner option clears.")]
pub struct RuleSetUpdate {
    /// New minimum down payment.
    #[serde(default)]
    pub min_down_payment: Option<Money>,
    /// New maximum installment count.
    #[serde(default)]
    pub max_installment_months: Option<i32>,
    /// New zero-down policy.
    #[serde(default)]
    pub allow_zero_down_payment: Option<bool>,
    /// New advisory maximum discount percentage.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub max_discount_percent: Option<Option<u8>>,
    /// New advisory minimum monthly payment.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub min_monthly_payment: Option<Option<Money>>,
}

/// Marks a field that appeared in the input, so an explicit `null` becomes `Some(None)`.
#[allow(clippy::option_option, reason = "Outer option marks presence; inner option clears.")]
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rule set construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    /// Minimum down payment below zero.
    #[error("min_down_payment must not be negative (got {0})")]
    NegativeMinDownPayment(Money),
    /// Installment term outside the supported range.
    #[error("max_installment_months must be between 1 and {max} (got {0})", max = MAX_INSTALLMENT_MONTHS)]
    InstallmentMonthsOutOfRange(i32),
    /// Discount percentage above 100.
    #[error("max_discount_percent must be at most {max} (got {0})", max = MAX_DISCOUNT_PERCENT)]
    DiscountPercentOutOfRange(u8),
    /// Minimum monthly payment below zero.
    #[error("min_monthly_payment must not be negative (got {0})")]
    NegativeMinMonthlyPayment(Money),
}
