//! Gratuity calculation functionality.
//!
//! Every supported rule accrues gratuity days in two brackets: a lower
//! day-rate up to a tenure threshold and a higher day-rate beyond it. The
//! accrued days are paid at the daily wage and capped at 24 months of the
//! monthly wage.
//!
//! Rules differ only in their [`GratuityBracket`] parameters:
//!
//! | Rule    | Threshold | Before | After | Rounds to months |
//! |---------|-----------|--------|-------|------------------|
//! | Federal | 5 years   | 21     | 30    | no               |
//! | DMCC    | 60 months | 21     | 30    | yes              |
//! | Custom1 | 3 years   | 20     | 30    | no               |

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::RuleConfig;
use crate::error::EngineResult;
use crate::models::{CalculationStep, FreeZoneRule, MONTHS_PER_YEAR};

use super::out_of_range;

/// Gratuity may not exceed this many months of the monthly wage.
pub const GRATUITY_CAP_MONTHS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Parameters of a two-bracket gratuity accrual.
///
/// # Example
///
/// ```
/// use eos_engine::calculation::GratuityBracket;
/// use rust_decimal::Decimal;
///
/// let federal = GratuityBracket::FEDERAL;
/// // 5 years at 21 days, then 2 years at 30 days
/// assert_eq!(federal.accrued_days(Decimal::new(7, 0)), Some(Decimal::new(165, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratuityBracket {
    /// Tenure in years up to which the lower rate applies.
    pub threshold_years: Decimal,
    /// Gratuity days per year of service up to the threshold.
    pub rate_before: Decimal,
    /// Gratuity days per year of service beyond the threshold.
    pub rate_after: Decimal,
    /// Round tenure to whole months (half up) before bracketing.
    pub round_to_months: bool,
}

impl GratuityBracket {
    /// Federal UAE labour law: 21 days for the first 5 years, 30 thereafter.
    pub const FEDERAL: Self = Self {
        threshold_years: Decimal::from_parts(5, 0, 0, false, 0),
        rate_before: Decimal::from_parts(21, 0, 0, false, 0),
        rate_after: Decimal::from_parts(30, 0, 0, false, 0),
        round_to_months: false,
    };

    /// DMCC: federal rates applied to tenure rounded to whole months.
    pub const DMCC: Self = Self {
        threshold_years: Decimal::from_parts(5, 0, 0, false, 0),
        rate_before: Decimal::from_parts(21, 0, 0, false, 0),
        rate_after: Decimal::from_parts(30, 0, 0, false, 0),
        round_to_months: true,
    };

    /// Custom rule 1: 20 days for the first 3 years, 30 thereafter.
    pub const CUSTOM1: Self = Self {
        threshold_years: Decimal::from_parts(3, 0, 0, false, 0),
        rate_before: Decimal::from_parts(20, 0, 0, false, 0),
        rate_after: Decimal::from_parts(30, 0, 0, false, 0),
        round_to_months: false,
    };

    /// Returns the built-in bracket for a rule.
    pub const fn for_rule(rule: FreeZoneRule) -> Self {
        match rule {
            FreeZoneRule::Federal => Self::FEDERAL,
            FreeZoneRule::Dmcc => Self::DMCC,
            FreeZoneRule::Custom1 => Self::CUSTOM1,
        }
    }

    /// Returns the gratuity days accrued for a tenure, before any cap.
    ///
    /// Tenure exactly at the threshold accrues entirely at the lower rate.
    /// Returns `None` if the bracket arithmetic overflows.
    pub fn accrued_days(&self, years: Decimal) -> Option<Decimal> {
        if years <= Decimal::ZERO {
            return Some(Decimal::ZERO);
        }

        if self.round_to_months {
            let months = rounded_months(years)?;
            let threshold_months = self.threshold_years.checked_mul(MONTHS_PER_YEAR)?;
            let before = months.min(threshold_months).checked_mul(self.rate_before)?;
            let after = months
                .checked_sub(threshold_months)?
                .max(Decimal::ZERO)
                .checked_mul(self.rate_after)?;
            before.checked_add(after).map(|days| days / MONTHS_PER_YEAR)
        } else {
            let before = years.min(self.threshold_years).checked_mul(self.rate_before)?;
            let after = years
                .checked_sub(self.threshold_years)?
                .max(Decimal::ZERO)
                .checked_mul(self.rate_after)?;
            before.checked_add(after)
        }
    }
}

/// Converts fractional years to whole months, rounding ties up.
///
/// # Examples
///
/// ```
/// use eos_engine::calculation::rounded_months;
/// use rust_decimal::Decimal;
///
/// // 0.375 years is 4.5 months, which rounds up to 5
/// assert_eq!(rounded_months(Decimal::new(375, 3)), Some(Decimal::new(5, 0)));
/// ```
pub fn rounded_months(years: Decimal) -> Option<Decimal> {
    years
        .checked_mul(MONTHS_PER_YEAR)
        .map(|months| months.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Returns the gratuity ceiling: 24 months of the monthly wage.
///
/// Returns `None` if the ceiling overflows.
pub fn gratuity_cap(monthly_wage: Decimal) -> Option<Decimal> {
    monthly_wage.max(Decimal::ZERO).checked_mul(GRATUITY_CAP_MONTHS)
}

/// Computes gratuity for arbitrary bracket parameters.
///
/// Returns zero if `years <= 0` or `daily_wage <= 0`; otherwise the accrued
/// days times the daily wage, limited to [`gratuity_cap`]. Returns `None`
/// if any intermediate amount overflows.
pub fn compute_bracketed_gratuity(
    years: Decimal,
    daily_wage: Decimal,
    monthly_wage: Decimal,
    bracket: &GratuityBracket,
) -> Option<Decimal> {
    if years <= Decimal::ZERO || daily_wage <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    let amount = bracket.accrued_days(years)?.checked_mul(daily_wage)?;
    Some(amount.min(gratuity_cap(monthly_wage)?).max(Decimal::ZERO))
}

/// Computes gratuity under one of the built-in rules.
///
/// # Examples
///
/// ```
/// use eos_engine::calculation::compute_gratuity;
/// use eos_engine::models::FreeZoneRule;
/// use rust_decimal::Decimal;
///
/// let amount = compute_gratuity(
///     Decimal::new(5, 0),
///     Decimal::new(300, 0),
///     Decimal::new(9000, 0),
///     FreeZoneRule::Federal,
/// );
/// assert_eq!(amount, Some(Decimal::new(31500, 0)));
/// ```
pub fn compute_gratuity(
    years: Decimal,
    daily_wage: Decimal,
    monthly_wage: Decimal,
    rule: FreeZoneRule,
) -> Option<Decimal> {
    compute_bracketed_gratuity(years, daily_wage, monthly_wage, &GratuityBracket::for_rule(rule))
}

/// The result of a gratuity calculation, including the breakdown step.
#[derive(Debug, Clone)]
pub struct GratuityResult {
    /// Gratuity days accrued before the cap.
    pub gratuity_days: Decimal,
    /// The 24-month wage ceiling.
    pub cap_amount: Decimal,
    /// The gratuity payable.
    pub amount: Decimal,
    /// Whether the ceiling reduced the amount.
    pub cap_applied: bool,
    /// The step recording this calculation.
    pub step: CalculationStep,
}

/// Calculates gratuity under a configured rule and records a breakdown step.
///
/// # Arguments
///
/// * `years` - Fractional years of service
/// * `daily_wage` - Monthly wage divided by 30
/// * `monthly_wage` - Monthly basic wage, used for the cap
/// * `rule` - The configured rule parameters
/// * `step_number` - The step number for breakdown sequencing
///
/// # Errors
///
/// Returns `InvalidInput` if the accrued days, the uncapped amount or the
/// cap overflow.
pub fn calculate_gratuity(
    years: Decimal,
    daily_wage: Decimal,
    monthly_wage: Decimal,
    rule: &RuleConfig,
    step_number: u32,
) -> EngineResult<GratuityResult> {
    let bracket = rule.bracket();
    let guarded = years <= Decimal::ZERO || daily_wage <= Decimal::ZERO;

    let gratuity_days = if guarded {
        Decimal::ZERO
    } else {
        bracket
            .accrued_days(years)
            .ok_or_else(|| out_of_range("years_of_service"))?
    };
    let uncapped = gratuity_days
        .checked_mul(daily_wage)
        .ok_or_else(|| out_of_range("monthly_wage"))?;
    let cap_amount = gratuity_cap(monthly_wage).ok_or_else(|| out_of_range("monthly_wage"))?;
    let amount = compute_bracketed_gratuity(years, daily_wage, monthly_wage, &bracket)
        .ok_or_else(|| out_of_range("monthly_wage"))?;
    let cap_applied = !guarded && uncapped > cap_amount;

    let reasoning = if guarded {
        format!(
            "{}: years of service {} and daily wage ${} must both be positive, gratuity is 0",
            rule.name,
            years.round_dp(4).normalize(),
            daily_wage.round_dp(4).normalize()
        )
    } else if cap_applied {
        format!(
            "{}: {} days x ${} = ${} exceeds 24-month cap, capped at ${}",
            rule.name,
            gratuity_days.round_dp(4).normalize(),
            daily_wage.round_dp(4).normalize(),
            uncapped.round_dp(2).normalize(),
            cap_amount.normalize()
        )
    } else {
        format!(
            "{}: {} days x ${} = ${}",
            rule.name,
            gratuity_days.round_dp(4).normalize(),
            daily_wage.round_dp(4).normalize(),
            amount.round_dp(2).normalize()
        )
    };

    let mut input = serde_json::json!({
        "years_of_service": years.normalize().to_string(),
        "daily_wage": daily_wage.normalize().to_string(),
        "monthly_wage": monthly_wage.normalize().to_string(),
        "threshold_years": bracket.threshold_years.normalize().to_string(),
        "rate_before": bracket.rate_before.normalize().to_string(),
        "rate_after": bracket.rate_after.normalize().to_string(),
        "round_to_months": bracket.round_to_months
    });
    if bracket.round_to_months && !guarded {
        if let Some(months) = rounded_months(years) {
            input["rounded_months"] = serde_json::json!(months.to_string());
        }
    }

    let step = CalculationStep {
        step_number,
        rule_id: "gratuity".to_string(),
        rule_name: format!("Gratuity ({})", rule.name),
        legal_ref: rule.legal_ref.clone(),
        input,
        output: serde_json::json!({
            "gratuity_days": gratuity_days.normalize().to_string(),
            "cap_amount": cap_amount.normalize().to_string(),
            "cap_applied": cap_applied,
            "gratuity_amount": amount.normalize().to_string()
        }),
        reasoning,
    };

    Ok(GratuityResult {
        gratuity_days,
        cap_amount,
        amount,
        cap_applied,
        step,
    })
}
