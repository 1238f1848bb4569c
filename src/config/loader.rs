//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading settlement
//! rule configurations from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::models::FreeZoneRule;

use super::types::{EosConfig, JurisdictionMetadata, RuleConfig, RulesConfig};

/// Loads and provides access to settlement configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query the gratuity rule table.
///
/// # Directory Structure
///
/// ```text
/// config/uae_eos/
/// ├── jurisdiction.yaml  # Rule set metadata
/// └── rules.yaml         # Gratuity bracket per free zone rule
/// ```
///
/// # Example
///
/// ```no_run
/// use eos_engine::config::ConfigLoader;
/// use eos_engine::models::FreeZoneRule;
///
/// let loader = ConfigLoader::load("./config/uae_eos").unwrap();
/// let dmcc = loader.config().rule(FreeZoneRule::Dmcc).unwrap();
/// println!("DMCC threshold: {} years", dmcc.threshold_years);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EosConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or an unknown rule name (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;

        let rules_path = path.join("rules.yaml");
        let rules_config = Self::load_yaml::<RulesConfig>(&rules_path)?;
        let rules = Self::key_rules(&rules_path, rules_config)?;

        tracing::debug!(
            path = %path.display(),
            code = %metadata.code,
            rules = rules.len(),
            "Loaded settlement configuration"
        );

        Ok(Self {
            config: EosConfig::new(metadata, rules),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Converts rule names from the file into typed keys.
    ///
    /// Names are matched case-insensitively and `none` means `federal`, so
    /// two names in the file can denote the same rule. That is rejected.
    fn key_rules(
        path: &Path,
        rules_config: RulesConfig,
    ) -> EngineResult<HashMap<FreeZoneRule, RuleConfig>> {
        let parse_error = |message: String| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };

        let mut rules = HashMap::with_capacity(rules_config.rules.len());
        for (name, rule) in rules_config.rules {
            let key = FreeZoneRule::from_str(&name).map_err(|e| parse_error(e.to_string()))?;
            if rules.insert(key, rule).is_some() {
                return Err(parse_error(format!("rule '{}' defined more than once", key)));
            }
        }
        Ok(rules)
    }

    /// Returns the underlying settlement configuration.
    pub fn config(&self) -> &EosConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EosConfig {
        self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        self.config.metadata()
    }
}
