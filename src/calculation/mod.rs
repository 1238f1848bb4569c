//! Calculation logic for the End-of-Service engine.
//!
//! This module contains the pure settlement calculations: years of service
//! from the service dates, the 30-day daily wage, rule-dispatched gratuity
//! with the 24-month wage cap, unused leave payout, and the settlement total.

use crate::error::EngineError;

mod daily_wage;
mod gratuity;
mod leave_payout;
mod settlement;
mod tenure;

pub use daily_wage::{DailyWageResult, UAE_DAYS_PER_MONTH, calculate_daily_wage, daily_wage};
pub use gratuity::{
    GRATUITY_CAP_MONTHS, GratuityBracket, GratuityResult, calculate_gratuity,
    compute_bracketed_gratuity, compute_gratuity, gratuity_cap, rounded_months,
};
pub use leave_payout::{LEAVE_PAYOUT_REF, LeavePayoutResult, calculate_leave_payout, leave_payout};
pub use settlement::{calculate_settlement, settlement_total};
pub use tenure::{TenureResult, calculate_tenure, decompose_service_period, years_of_service};

/// The error reported when an amount derived from `field` leaves the range
/// a `Decimal` can hold.
fn out_of_range(field: &str) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: "amount out of range".to_string(),
    }
}
