//! Daily wage calculation functionality.
//!
//! UAE practice derives the daily wage from the monthly basic wage using a
//! fixed 30-day month, regardless of how many days the calendar month has.

use rust_decimal::Decimal;

use crate::models::CalculationStep;

/// Days in a month under the UAE wage convention.
pub const UAE_DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// The result of a daily wage calculation, including the breakdown step.
#[derive(Debug, Clone)]
pub struct DailyWageResult {
    /// The monthly wage divided by 30, or zero.
    pub daily_wage: Decimal,
    /// The step recording this calculation.
    pub step: CalculationStep,
}

/// Returns `monthly_wage / 30`, or zero if the wage is not positive.
///
/// # Examples
///
/// ```
/// use eos_engine::calculation::daily_wage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(daily_wage(Decimal::new(9000, 0)), Decimal::new(300, 0));
/// assert_eq!(daily_wage(Decimal::new(-9000, 0)), Decimal::ZERO);
/// ```
pub fn daily_wage(monthly_wage: Decimal) -> Decimal {
    if monthly_wage <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    monthly_wage / UAE_DAYS_PER_MONTH
}

/// Calculates the daily wage and records a breakdown step.
pub fn calculate_daily_wage(monthly_wage: Decimal, step_number: u32) -> DailyWageResult {
    let daily = daily_wage(monthly_wage);

    let reasoning = if monthly_wage > Decimal::ZERO {
        format!(
            "${} / {} days = ${}",
            monthly_wage.normalize(),
            UAE_DAYS_PER_MONTH,
            daily.round_dp(4).normalize()
        )
    } else {
        format!(
            "Monthly wage ${} is not positive, daily wage is 0",
            monthly_wage.normalize()
        )
    };

    let step = CalculationStep {
        step_number,
        rule_id: "daily_wage".to_string(),
        rule_name: "Daily Wage".to_string(),
        legal_ref: "30-day month convention".to_string(),
        input: serde_json::json!({
            "monthly_wage": monthly_wage.normalize().to_string()
        }),
        output: serde_json::json!({
            "daily_wage": daily.normalize().to_string()
        }),
        reasoning,
    };

    DailyWageResult {
        daily_wage: daily,
        step,
    }
}
