//! Configuration loading and management for the End-of-Service engine.
//!
//! This module loads the gratuity rule table from YAML files. Every rule
//! also has built-in parameters, available through [`EosConfig::default`].
//!
//! # Example
//!
//! ```no_run
//! use eos_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/uae_eos").unwrap();
//! println!("Loaded rules: {}", loader.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EosConfig, JurisdictionMetadata, RuleConfig, RulesConfig};
