//! Free zone rule selector.
//!
//! UAE mainland employers follow the federal labour law gratuity formula,
//! while some free zones publish their own variants. [`FreeZoneRule`] selects
//! which formula a settlement is calculated under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The jurisdiction whose gratuity formula applies to a settlement.
///
/// Serialized names are `federal`, `dmcc` and `custom1`. The legacy selector
/// value `none` is accepted as an alias for [`FreeZoneRule::Federal`].
///
/// # Example
///
/// ```
/// use eos_engine::models::FreeZoneRule;
/// use std::str::FromStr;
///
/// assert_eq!(FreeZoneRule::default(), FreeZoneRule::Federal);
/// assert_eq!(FreeZoneRule::from_str("none").unwrap(), FreeZoneRule::Federal);
/// assert_eq!(FreeZoneRule::Dmcc.as_str(), "dmcc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeZoneRule {
    /// Federal UAE labour law (no free zone override).
    #[default]
    #[serde(alias = "none")]
    Federal,
    /// Dubai Multi Commodities Centre free zone.
    Dmcc,
    /// Employer-defined custom rule.
    Custom1,
}

impl FreeZoneRule {
    /// All supported rules, in display order.
    pub const ALL: [FreeZoneRule; 3] = [Self::Federal, Self::Dmcc, Self::Custom1];

    /// Returns the canonical wire name of the rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Federal => "federal",
            Self::Dmcc => "dmcc",
            Self::Custom1 => "custom1",
        }
    }
}

impl fmt::Display for FreeZoneRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FreeZoneRule {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "federal" | "none" => Ok(Self::Federal),
            "dmcc" => Ok(Self::Dmcc),
            "custom1" => Ok(Self::Custom1),
            other => Err(EngineError::InvalidInput {
                field: "free_zone_rule".to_string(),
                message: format!("unknown rule '{}'", other),
            }),
        }
    }
}
