//! Unused leave payout calculation functionality.
//!
//! Annual leave that has not been taken by the end of service is paid out
//! at the daily wage.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::CalculationStep;

use super::out_of_range;

/// Legal reference for paying out untaken annual leave.
pub const LEAVE_PAYOUT_REF: &str = "Federal Decree-Law No. 33 of 2021, Art. 29";

/// The result of a leave payout calculation, including the breakdown step.
#[derive(Debug, Clone)]
pub struct LeavePayoutResult {
    /// The payout amount, never negative.
    pub amount: Decimal,
    /// The step recording this calculation.
    pub step: CalculationStep,
}

/// Returns `unused_days * daily_wage` when both are positive, otherwise zero.
///
/// Returns `None` if the product overflows.
///
/// # Examples
///
/// ```
/// use eos_engine::calculation::leave_payout;
/// use rust_decimal::Decimal;
///
/// let payout = leave_payout(Decimal::new(5, 0), Decimal::new(300, 0));
/// assert_eq!(payout, Some(Decimal::new(1500, 0)));
/// ```
pub fn leave_payout(unused_days: Decimal, daily_wage: Decimal) -> Option<Decimal> {
    if unused_days <= Decimal::ZERO || daily_wage <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    unused_days.checked_mul(daily_wage)
}

/// Calculates the leave payout and records a breakdown step.
///
/// # Errors
///
/// Returns `InvalidInput` for `unused_leave_days` if the payout overflows.
pub fn calculate_leave_payout(
    unused_days: Decimal,
    daily_wage: Decimal,
    step_number: u32,
) -> EngineResult<LeavePayoutResult> {
    let amount =
        leave_payout(unused_days, daily_wage).ok_or_else(|| out_of_range("unused_leave_days"))?;

    let reasoning = if amount > Decimal::ZERO {
        format!(
            "{} days x ${} = ${}",
            unused_days.normalize(),
            daily_wage.round_dp(4).normalize(),
            amount.round_dp(2).normalize()
        )
    } else {
        "No unused leave to pay out".to_string()
    };

    let step = CalculationStep {
        step_number,
        rule_id: "leave_payout".to_string(),
        rule_name: "Unused Leave Payout".to_string(),
        legal_ref: LEAVE_PAYOUT_REF.to_string(),
        input: serde_json::json!({
            "unused_leave_days": unused_days.normalize().to_string(),
            "daily_wage": daily_wage.normalize().to_string()
        }),
        output: serde_json::json!({
            "leave_payout_amount": amount.normalize().to_string()
        }),
        reasoning,
    };

    Ok(LeavePayoutResult { amount, step })
}
