//! Settlement aggregation.
//!
//! This module ties the individual calculators together: it validates a
//! [`SettlementInput`], runs tenure, daily wage, gratuity and leave payout,
//! and totals them with other payments and deductions.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EosConfig;
use crate::error::EngineResult;
use crate::models::{CalculationStep, SettlementInput, SettlementResult};

use super::daily_wage::calculate_daily_wage;
use super::gratuity::calculate_gratuity;
use super::leave_payout::calculate_leave_payout;
use super::out_of_range;
use super::tenure::calculate_tenure;

/// Returns `gratuity + leave_payout + other_payments - deductions`.
///
/// The total is not floored; deductions larger than everything owed give a
/// negative total. Returns `None` if the sum overflows.
///
/// # Examples
///
/// ```
/// use eos_engine::calculation::settlement_total;
/// use rust_decimal::Decimal;
///
/// let total = settlement_total(
///     Decimal::new(1000, 0),
///     Decimal::new(200, 0),
///     Decimal::ZERO,
///     Decimal::new(1500, 0),
/// );
/// assert_eq!(total, Some(Decimal::new(-300, 0)));
/// ```
pub fn settlement_total(
    gratuity: Decimal,
    leave_payout: Decimal,
    other_payments: Decimal,
    deductions: Decimal,
) -> Option<Decimal> {
    gratuity
        .checked_add(leave_payout)?
        .checked_add(other_payments)?
        .checked_sub(deductions)
}

/// Calculates a complete End-of-Service settlement.
///
/// The calculation is pure: identical inputs and configuration always give
/// an identical result.
///
/// # Errors
///
/// - `InvalidRange` if the service end date precedes the start date
/// - `InvalidInput` if other payments or deductions are negative, or if an
///   amount grows beyond what a `Decimal` can hold
/// - `RuleNotConfigured` if the configuration lacks the selected rule
///
/// # Examples
///
/// ```
/// use eos_engine::calculation::calculate_settlement;
/// use eos_engine::config::EosConfig;
/// use eos_engine::models::SettlementInput;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = SettlementInput::new(
///     NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     Decimal::new(9000, 0),
/// )
/// .with_unused_leave_days(Decimal::new(5, 0));
///
/// let result = calculate_settlement(&input, &EosConfig::default()).unwrap();
/// assert_eq!(result.gratuity_amount, Decimal::new(31500, 0));
/// assert_eq!(result.leave_payout_amount, Decimal::new(1500, 0));
/// assert_eq!(result.total_settlement, Decimal::new(33000, 0));
/// ```
pub fn calculate_settlement(
    input: &SettlementInput,
    config: &EosConfig,
) -> EngineResult<SettlementResult> {
    input.validate()?;
    let rule = config.rule(input.free_zone_rule)?;

    let mut breakdown: Vec<CalculationStep> = Vec::with_capacity(5);
    let mut step_number: u32 = 1;

    let tenure = calculate_tenure(input.service_start, input.service_end, step_number)?;
    debug!(
        years_of_service = %tenure.years_of_service,
        years = tenure.service_period.years,
        months = tenure.service_period.months,
        days = tenure.service_period.days,
        "Calculated years of service"
    );
    breakdown.push(tenure.step);
    step_number += 1;

    let daily = calculate_daily_wage(input.monthly_wage, step_number);
    debug!(daily_wage = %daily.daily_wage, "Calculated daily wage");
    breakdown.push(daily.step);
    step_number += 1;

    let gratuity = calculate_gratuity(
        tenure.years_of_service,
        daily.daily_wage,
        input.monthly_wage,
        rule,
        step_number,
    )?;
    debug!(
        rule = %input.free_zone_rule,
        gratuity_days = %gratuity.gratuity_days,
        gratuity_amount = %gratuity.amount,
        cap_applied = gratuity.cap_applied,
        "Calculated gratuity"
    );
    breakdown.push(gratuity.step);
    step_number += 1;

    let leave = calculate_leave_payout(input.unused_leave_days, daily.daily_wage, step_number)?;
    debug!(leave_payout_amount = %leave.amount, "Calculated leave payout");
    breakdown.push(leave.step);
    step_number += 1;

    let total = settlement_total(
        gratuity.amount,
        leave.amount,
        input.other_payments,
        input.deductions,
    )
    .ok_or_else(|| out_of_range("other_payments"))?;
    breakdown.push(CalculationStep {
        step_number,
        rule_id: "settlement_total".to_string(),
        rule_name: "Settlement Total".to_string(),
        legal_ref: "Gratuity + leave payout + other payments - deductions".to_string(),
        input: serde_json::json!({
            "gratuity_amount": gratuity.amount.normalize().to_string(),
            "leave_payout_amount": leave.amount.normalize().to_string(),
            "other_payments": input.other_payments.normalize().to_string(),
            "deductions": input.deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_settlement": total.normalize().to_string()
        }),
        reasoning: format!(
            "${} + ${} + ${} - ${} = ${}",
            gratuity.amount.round_dp(2).normalize(),
            leave.amount.round_dp(2).normalize(),
            input.other_payments.normalize(),
            input.deductions.normalize(),
            total.round_dp(2).normalize()
        ),
    });
    debug!(total_settlement = %total, "Calculated settlement total");

    Ok(SettlementResult {
        free_zone_rule: input.free_zone_rule,
        service_period: tenure.service_period,
        years_of_service: tenure.years_of_service,
        daily_wage: daily.daily_wage,
        gratuity_days: gratuity.gratuity_days,
        gratuity_amount: gratuity.amount,
        cap_applied: gratuity.cap_applied,
        leave_payout_amount: leave.amount,
        other_payments: input.other_payments,
        deductions: input.deductions,
        total_settlement: total,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::FreeZoneRule;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn federal_five_years() -> SettlementInput {
        SettlementInput::new(date(2019, 1, 1), date(2024, 1, 1), dec("9000"))
    }

    #[test]
    fn test_federal_five_years_with_leave() {
        let input = federal_five_years().with_unused_leave_days(dec("5"));
        let result = calculate_settlement(&input, &EosConfig::default()).unwrap();

        assert_eq!(result.years_of_service, dec("5"));
        assert_eq!(result.daily_wage, dec("300"));
        assert_eq!(result.gratuity_amount, dec("31500"));
        assert_eq!(result.leave_payout_amount, dec("1500"));
        assert!(result.total_settlement > Decimal::ZERO);
        assert_eq!(result.total_settlement, dec("33000"));
    }

    #[test]
    fn test_dmcc_seven_years() {
        let input = SettlementInput::new(date(2019, 1, 1), date(2026, 1, 1), dec("9000"))
            .with_rule(FreeZoneRule::Dmcc);
        let result = calculate_settlement(&input, &EosConfig::default()).unwrap();

        assert_eq!(result.free_zone_rule, FreeZoneRule::Dmcc);
        assert_eq!(result.gratuity_days, dec("165"));
        assert_eq!(result.gratuity_amount, dec("49500"));
    }

    #[test]
    fn test_other_payments_and_deductions() {
        let input = federal_five_years()
            .with_other_payments(dec("2000"))
            .with_deductions(dec("500.50"));
        let result = calculate_settlement(&input, &EosConfig::default()).unwrap();

        assert_eq!(result.total_settlement, dec("32999.50"));
    }

    #[test]
    fn test_negative_total_is_not_clamped() {
        let input = SettlementInput::new(date(2024, 1, 1), date(2024, 1, 1), dec("9000"))
            .with_deductions(dec("1200"));
        let result = calculate_settlement(&input, &EosConfig::default()).unwrap();

        assert_eq!(result.gratuity_amount, Decimal::ZERO);
        assert_eq!(result.total_settlement, dec("-1200"));
    }

    #[test]
    fn test_invalid_range_for_every_rule() {
        for rule in FreeZoneRule::ALL {
            let input = SettlementInput::new(date(2024, 1, 2), date(2024, 1, 1), dec("9000"))
                .with_rule(rule);
            let result = calculate_settlement(&input, &EosConfig::default());
            assert!(
                matches!(result, Err(EngineError::InvalidRange { .. })),
                "rule {} accepted an inverted range",
                rule
            );
        }
    }

    #[test]
    fn test_missing_dates_give_zero_gratuity() {
        let input = SettlementInput {
            monthly_wage: dec("9000"),
            unused_leave_days: dec("2"),
            ..SettlementInput::default()
        };
        let result = calculate_settlement(&input, &EosConfig::default()).unwrap();

        assert_eq!(result.years_of_service, Decimal::ZERO);
        assert_eq!(result.gratuity_amount, Decimal::ZERO);
        assert_eq!(result.leave_payout_amount, dec("600"));
    }

    #[test]
    fn test_zero_wage_clamps_everything_to_zero() {
        let input = SettlementInput::new(date(2010, 1, 1), date(2024, 1, 1), Decimal::ZERO)
            .with_unused_leave_days(dec("20"))
            .with_other_payments(dec("100"));
        let result = calculate_settlement(&input, &EosConfig::default()).unwrap();

        assert_eq!(result.daily_wage, Decimal::ZERO);
        assert_eq!(result.gratuity_amount, Decimal::ZERO);
        assert_eq!(result.leave_payout_amount, Decimal::ZERO);
        assert_eq!(result.total_settlement, dec("100"));
    }

    #[test]
    fn test_breakdown_has_steps_in_order() {
        let result = calculate_settlement(&federal_five_years(), &EosConfig::default()).unwrap();

        let rule_ids: Vec<&str> = result.breakdown.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec![
                "years_of_service",
                "daily_wage",
                "gratuity",
                "leave_payout",
                "settlement_total"
            ]
        );
        for (i, step) in result.breakdown.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_recalculation_is_identical() {
        let input = SettlementInput::new(date(2016, 3, 17), date(2024, 11, 2), dec("12345.67"))
            .with_rule(FreeZoneRule::Dmcc)
            .with_unused_leave_days(dec("12.5"))
            .with_other_payments(dec("800"))
            .with_deductions(dec("150"));
        let config = EosConfig::default();

        let first = calculate_settlement(&input, &config).unwrap();
        let second = calculate_settlement(&input, &config).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_unconfigured_rule_fails() {
        let config = EosConfig::new(Default::default(), Default::default());
        let result = calculate_settlement(&federal_five_years(), &config);

        assert!(matches!(result, Err(EngineError::RuleNotConfigured { .. })));
    }

    // ==========================================================================
    // Amounts beyond the Decimal range
    // ==========================================================================

    fn assert_out_of_range(input: &SettlementInput, expected_field: &str) {
        match calculate_settlement(input, &EosConfig::default()) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, expected_field);
                assert_eq!(message, "amount out of range");
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_wage_is_rejected_for_every_rule() {
        for rule in FreeZoneRule::ALL {
            let input = SettlementInput::new(
                date(2019, 1, 1),
                date(2024, 1, 1),
                dec("10000000000000000000000000000"),
            )
            .with_rule(rule);
            assert_out_of_range(&input, "monthly_wage");
        }
    }

    #[test]
    fn test_huge_leave_balance_is_rejected() {
        let input = federal_five_years().with_unused_leave_days(Decimal::MAX);
        assert_out_of_range(&input, "unused_leave_days");
    }

    #[test]
    fn test_huge_other_payments_are_rejected() {
        let input = federal_five_years().with_other_payments(Decimal::MAX);
        assert_out_of_range(&input, "other_payments");
    }

    #[test]
    fn test_settlement_total_overflow_is_none() {
        assert_eq!(
            settlement_total(Decimal::MAX, Decimal::ONE, Decimal::ZERO, Decimal::ZERO),
            None
        );
    }
}
