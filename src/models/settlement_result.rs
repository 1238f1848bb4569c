//! Settlement result models for the End-of-Service engine.
//!
//! This module contains the [`SettlementResult`] type and the
//! [`CalculationStep`] entries that explain how each figure was reached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FreeZoneRule, ServicePeriod};

/// A single step in a settlement calculation.
///
/// Each step captures the input, output, and reasoning for one rule
/// application so a settlement can be explained line by line.
///
/// # Example
///
/// ```
/// use eos_engine::models::CalculationStep;
///
/// let step = CalculationStep {
///     step_number: 2,
///     rule_id: "daily_wage".to_string(),
///     rule_name: "Daily Wage".to_string(),
///     legal_ref: "30-day month convention".to_string(),
///     input: serde_json::json!({"monthly_wage": "9000"}),
///     output: serde_json::json!({"daily_wage": "300"}),
///     reasoning: "$9000 / 30 = $300".to_string(),
/// };
/// assert_eq!(step.rule_id, "daily_wage");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the law or regulation behind this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of an End-of-Service settlement calculation.
///
/// A result is fully determined by its [`SettlementInput`](super::SettlementInput)
/// and the rule configuration; recomputing from the same inputs yields an
/// identical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// The rule the gratuity was calculated under.
    pub free_zone_rule: FreeZoneRule,
    /// The service period decomposed into years, months and days.
    pub service_period: ServicePeriod,
    /// Fractional years of service.
    pub years_of_service: Decimal,
    /// Monthly wage divided by 30.
    pub daily_wage: Decimal,
    /// Gratuity days accrued before the wage cap is applied.
    pub gratuity_days: Decimal,
    /// The gratuity payable, never negative.
    pub gratuity_amount: Decimal,
    /// Whether the 24-month wage ceiling limited the gratuity.
    pub cap_applied: bool,
    /// Payout for unused leave days, never negative.
    pub leave_payout_amount: Decimal,
    /// Other payments included in the total.
    pub other_payments: Decimal,
    /// Deductions withheld from the total.
    pub deductions: Decimal,
    /// Gratuity plus leave payout plus other payments, minus deductions.
    /// May be negative.
    pub total_settlement: Decimal,
    /// Step-by-step explanation of the calculation.
    pub breakdown: Vec<CalculationStep>,
}

impl SettlementResult {
    /// Returns true if the deductions exceed everything owed to the employee.
    pub fn is_net_payable_by_employee(&self) -> bool {
        self.total_settlement < Decimal::ZERO
    }
}
