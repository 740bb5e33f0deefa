// crates/plan-gate-config/src/config.rs
// ============================================================================
// Module: Plan Gate Configuration
// Description: Configuration loading and validation for Plan Gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: plan-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The `[rules]` section becomes the [`RuleSet`] passed into every engine
//! call; it is validated here so the engine never sees an invalid rule set.
//! Missing sections fall back to the clinic defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use plan_gate_core::Money;
use plan_gate_core::PaymentPreset;
use plan_gate_core::RuleSet;
use plan_gate_core::RuleSetSpec;
use plan_gate_core::default_presets;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "plan-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "PLAN_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of configured presets.
pub(crate) const MAX_PRESETS: usize = 64;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Plan Gate configuration root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlanGateConfig {
    /// Financing rules applied to every proposal.
    #[serde(default)]
    pub rules: RulesConfig,
    /// Audit output configuration.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Payment presets; the built-in presets are used when empty.
    #[serde(default)]
    pub presets: Vec<PaymentPreset>,
}

impl PlanGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.to_rule_set()?;
        self.audit.validate()?;
        if self.presets.len() > MAX_PRESETS {
            return Err(ConfigError::Invalid(format!(
                "presets exceeds max entries ({MAX_PRESETS})"
            )));
        }
        let mut seen = BTreeSet::new();
        for preset in &self.presets {
            preset.validate().map_err(|err| ConfigError::Invalid(err.to_string()))?;
            if !seen.insert(preset.id.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate preset id: {}", preset.id)));
            }
        }
        Ok(())
    }

    /// Returns the configured rule set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the rules section is invalid.
    pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
        self.rules.to_rule_set()
    }

    /// Returns the configured presets, or the built-in presets when none are set.
    #[must_use]
    pub fn presets(&self) -> Vec<PaymentPreset> {
        if self.presets.is_empty() { default_presets() } else { self.presets.clone() }
    }
}

/// Financing rules section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Minimum down payment.
    pub min_down_payment: Money,
    /// Maximum number of monthly installments.
    pub max_installment_months: i32,
    /// Allow a zero down payment.
    pub allow_zero_down_payment: bool,
    /// Maximum discount percent (advisory).
    pub max_discount_percent: Option<u8>,
    /// Minimum monthly payment (advisory).
    pub min_monthly_payment: Option<Money>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        let defaults = RuleSet::default();
        Self {
            min_down_payment: defaults.min_down_payment(),
            max_installment_months: defaults.max_installment_months(),
            allow_zero_down_payment: defaults.allow_zero_down_payment(),
            max_discount_percent: defaults.max_discount_percent(),
            min_monthly_payment: defaults.min_monthly_payment(),
        }
    }
}

impl RulesConfig {
    /// Builds the validated rule set.
    fn to_rule_set(&self) -> Result<RuleSet, ConfigError> {
        RuleSet::try_from(RuleSetSpec {
            min_down_payment: self.min_down_payment,
            max_installment_months: self.max_installment_months,
            allow_zero_down_payment: self.allow_zero_down_payment,
            max_discount_percent: self.max_discount_percent,
            min_monthly_payment: self.min_monthly_payment,
        })
        .map_err(|err| ConfigError::Invalid(format!("rules: {err}")))
    }
}

/// Audit logging configuration for gate decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Enable structured audit logging.
    #[serde(default)]
    pub enabled: bool,
    /// Optional audit log path (JSON lines); stderr when unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
