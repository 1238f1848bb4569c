//! Calendar decomposition of a service period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Days in a year for fractional-year conversion. Leap years are not
/// distinguished.
pub const DAYS_PER_YEAR: Decimal = Decimal::from_parts(365, 0, 0, false, 0);

/// Months in a year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// A service period split into whole years, whole months and remaining days.
///
/// # Example
///
/// ```
/// use eos_engine::models::ServicePeriod;
/// use rust_decimal::Decimal;
///
/// let period = ServicePeriod { years: 5, months: 0, days: 0 };
/// assert_eq!(period.fractional_years(), Decimal::new(5, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePeriod {
    /// Whole years of service.
    pub years: u32,
    /// Whole months beyond the years (0-11).
    pub months: u32,
    /// Remaining days beyond the months.
    pub days: u32,
}

impl ServicePeriod {
    /// Converts the period to fractional years as `years + months/12 + days/365`.
    pub fn fractional_years(&self) -> Decimal {
        Decimal::from(self.years)
            + Decimal::from(self.months) / MONTHS_PER_YEAR
            + Decimal::from(self.days) / DAYS_PER_YEAR
    }

    /// Returns true if the period has no length.
    pub fn is_empty(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }
}
