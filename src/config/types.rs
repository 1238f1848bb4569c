//! Configuration types for settlement calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus the built-in rule
//! table used when no files are loaded.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::GratuityBracket;
use crate::error::{EngineError, EngineResult};
use crate::models::FreeZoneRule;

/// Metadata about the jurisdiction the rules belong to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short identifying code (e.g., "AE-EOS").
    pub code: String,
    /// The human-readable name of the rule set.
    pub name: String,
    /// The version or legal basis of the rule set.
    pub version: String,
    /// URL to the official documentation.
    pub source_url: String,
}

impl Default for JurisdictionMetadata {
    fn default() -> Self {
        Self {
            code: "AE-EOS".to_string(),
            name: "UAE End of Service Gratuity".to_string(),
            version: "2021-33".to_string(),
            source_url: "https://www.mohre.gov.ae".to_string(),
        }
    }
}

/// Gratuity parameters for one free zone rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleConfig {
    /// The human-readable name of the rule.
    pub name: String,
    /// Reference to the law or regulation defining the rule.
    pub legal_ref: String,
    /// Tenure in years up to which the lower rate applies.
    pub threshold_years: Decimal,
    /// Gratuity days per year up to the threshold.
    pub rate_before: Decimal,
    /// Gratuity days per year beyond the threshold.
    pub rate_after: Decimal,
    /// Round tenure to whole months before bracketing.
    #[serde(default)]
    pub round_to_months: bool,
}

impl RuleConfig {
    /// Returns the built-in parameters for a rule.
    pub fn builtin(rule: FreeZoneRule) -> Self {
        let (name, legal_ref) = match rule {
            FreeZoneRule::Federal => (
                "Federal UAE Labour Law",
                "Federal Decree-Law No. 33 of 2021, Art. 51",
            ),
            FreeZoneRule::Dmcc => ("DMCC Free Zone", "DMCC Employment Regulations"),
            FreeZoneRule::Custom1 => ("Custom Rule 1", "Employer gratuity policy"),
        };
        let bracket = GratuityBracket::for_rule(rule);

        Self {
            name: name.to_string(),
            legal_ref: legal_ref.to_string(),
            threshold_years: bracket.threshold_years,
            rate_before: bracket.rate_before,
            rate_after: bracket.rate_after,
            round_to_months: bracket.round_to_months,
        }
    }

    /// Returns the bracket parameters of this rule.
    pub fn bracket(&self) -> GratuityBracket {
        GratuityBracket {
            threshold_years: self.threshold_years,
            rate_before: self.rate_before,
            rate_after: self.rate_after,
            round_to_months: self.round_to_months,
        }
    }
}

/// Rules configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    /// Map of rule name to rule parameters.
    pub rules: HashMap<String, RuleConfig>,
}

/// The complete settlement configuration.
///
/// `EosConfig::default()` holds the built-in federal, DMCC and custom rule
/// table, so calculations work without any configuration files.
#[derive(Debug, Clone)]
pub struct EosConfig {
    /// Jurisdiction metadata.
    metadata: JurisdictionMetadata,
    /// Rule parameters keyed by rule.
    rules: HashMap<FreeZoneRule, RuleConfig>,
}

impl EosConfig {
    /// Creates a new EosConfig from its component parts.
    pub fn new(metadata: JurisdictionMetadata, rules: HashMap<FreeZoneRule, RuleConfig>) -> Self {
        Self { metadata, rules }
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns all configured rules.
    pub fn rules(&self) -> &HashMap<FreeZoneRule, RuleConfig> {
        &self.rules
    }

    /// Gets the parameters for a rule.
    ///
    /// Returns `RuleNotConfigured` if the rule is absent from the table.
    pub fn rule(&self, rule: FreeZoneRule) -> EngineResult<&RuleConfig> {
        self.rules
            .get(&rule)
            .ok_or_else(|| EngineError::RuleNotConfigured {
                rule: rule.to_string(),
            })
    }
}

impl Default for EosConfig {
    fn default() -> Self {
        let rules = FreeZoneRule::ALL
            .into_iter()
            .map(|rule| (rule, RuleConfig::builtin(rule)))
            .collect();
        Self::new(JurisdictionMetadata::default(), rules)
    }
}
