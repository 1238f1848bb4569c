//! Settlement input model.
//!
//! This module contains [`SettlementInput`], the set of figures a settlement
//! is calculated from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{Contract, FreeZoneRule};

/// The inputs to an End-of-Service settlement calculation.
///
/// Service dates are optional: a settlement without both dates has zero
/// years of service. Economic figures that are zero or negative contribute
/// nothing; only the service date range and the ancillary amounts are
/// validated.
///
/// # Example
///
/// ```
/// use eos_engine::models::{FreeZoneRule, SettlementInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = SettlementInput::new(
///     NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     Decimal::new(9000, 0),
/// )
/// .with_rule(FreeZoneRule::Dmcc)
/// .with_unused_leave_days(Decimal::new(5, 0));
///
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettlementInput {
    /// First day of service.
    #[serde(default)]
    pub service_start: Option<NaiveDate>,
    /// Last day of service.
    #[serde(default)]
    pub service_end: Option<NaiveDate>,
    /// Monthly basic wage used for gratuity and leave payout.
    pub monthly_wage: Decimal,
    /// The gratuity formula to apply.
    #[serde(default)]
    pub free_zone_rule: FreeZoneRule,
    /// Remaining annual leave days to be paid out.
    #[serde(default)]
    pub unused_leave_days: Decimal,
    /// Bonuses, commissions or other allowances to include.
    #[serde(default)]
    pub other_payments: Decimal,
    /// Amounts to withhold from the settlement.
    #[serde(default)]
    pub deductions: Decimal,
}

impl SettlementInput {
    /// Creates an input for a federal settlement with no leave or ancillary amounts.
    pub fn new(service_start: NaiveDate, service_end: NaiveDate, monthly_wage: Decimal) -> Self {
        Self {
            service_start: Some(service_start),
            service_end: Some(service_end),
            monthly_wage,
            ..Self::default()
        }
    }

    /// Pre-fills an input from a contract's start date and wage.
    pub fn from_contract(contract: &Contract, service_end: NaiveDate) -> Self {
        Self::new(contract.date_start, service_end, contract.wage)
    }

    /// Sets the free zone rule.
    pub fn with_rule(mut self, rule: FreeZoneRule) -> Self {
        self.free_zone_rule = rule;
        self
    }

    /// Sets the unused leave balance in days.
    pub fn with_unused_leave_days(mut self, days: Decimal) -> Self {
        self.unused_leave_days = days;
        self
    }

    /// Sets the other payments amount.
    pub fn with_other_payments(mut self, amount: Decimal) -> Self {
        self.other_payments = amount;
        self
    }

    /// Sets the deductions amount.
    pub fn with_deductions(mut self, amount: Decimal) -> Self {
        self.deductions = amount;
        self
    }

    /// Validates the input.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidRange`] if the service end precedes the start
    /// - [`EngineError::InvalidInput`] if other payments or deductions are negative
    pub fn validate(&self) -> EngineResult<()> {
        if let (Some(start), Some(end)) = (self.service_start, self.service_end) {
            if end < start {
                return Err(EngineError::InvalidRange { start, end });
            }
        }

        for (field, amount) in [
            ("other_payments", self.other_payments),
            ("deductions", self.deductions),
        ] {
            if amount < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", amount),
                });
            }
        }

        Ok(())
    }
}
