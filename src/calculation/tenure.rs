//! Tenure calculation functionality.
//!
//! This module converts a service start and end date into fractional years
//! of service. The calendar difference is split into whole years, whole
//! months and remaining days, then combined as `years + months/12 + days/365`.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationStep, ServicePeriod};

/// The result of a tenure calculation, including the breakdown step.
#[derive(Debug, Clone)]
pub struct TenureResult {
    /// The service period split into years, months and days.
    pub service_period: ServicePeriod,
    /// Fractional years of service.
    pub years_of_service: Decimal,
    /// The step recording this calculation.
    pub step: CalculationStep,
}

/// Splits the span between two dates into whole years, months and days.
///
/// Months are stepped on the calendar: adding a month to the 31st lands on
/// the last day of a shorter month, so 31 January to 28 February is exactly
/// one month.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRange`] if `end` is before `start`.
///
/// # Examples
///
/// ```
/// use eos_engine::calculation::decompose_service_period;
/// use chrono::NaiveDate;
///
/// let period = decompose_service_period(
///     NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!((period.years, period.months, period.days), (1, 2, 5));
/// ```
pub fn decompose_service_period(start: NaiveDate, end: NaiveDate) -> EngineResult<ServicePeriod> {
    if end < start {
        return Err(EngineError::InvalidRange { start, end });
    }

    let mut total_months =
        (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let mut anchor = add_months(start, total_months)?;
    while anchor > end {
        total_months -= 1;
        anchor = add_months(start, total_months)?;
    }

    let days = (end - anchor).num_days();

    Ok(ServicePeriod {
        years: (total_months / 12) as u32,
        months: (total_months % 12) as u32,
        days: days as u32,
    })
}

fn add_months(date: NaiveDate, months: i32) -> EngineResult<NaiveDate> {
    date.checked_add_months(Months::new(months.max(0) as u32))
        .ok_or_else(|| EngineError::InvalidInput {
            field: "service_end".to_string(),
            message: format!("{} months after {} is out of range", months, date),
        })
}

/// Returns fractional years of service between two optional dates.
///
/// Returns zero if either date is absent. The `days/365` term ignores leap
/// years.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRange`] if the end date is before the start.
///
/// # Examples
///
/// ```
/// use eos_engine::calculation::years_of_service;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2019, 1, 1);
/// let end = NaiveDate::from_ymd_opt(2024, 1, 1);
///
/// assert_eq!(years_of_service(start, end).unwrap(), Decimal::new(5, 0));
/// assert_eq!(years_of_service(start, None).unwrap(), Decimal::ZERO);
/// ```
pub fn years_of_service(start: Option<NaiveDate>, end: Option<NaiveDate>) -> EngineResult<Decimal> {
    match (start, end) {
        (Some(start), Some(end)) => {
            Ok(decompose_service_period(start, end)?.fractional_years())
        }
        _ => Ok(Decimal::ZERO),
    }
}

/// Calculates years of service and records a breakdown step.
///
/// # Arguments
///
/// * `start` - First day of service, if known
/// * `end` - Last day of service, if known
/// * `step_number` - The step number for breakdown sequencing
pub fn calculate_tenure(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    step_number: u32,
) -> EngineResult<TenureResult> {
    let service_period = match (start, end) {
        (Some(start), Some(end)) => decompose_service_period(start, end)?,
        _ => ServicePeriod::default(),
    };
    let years_of_service = service_period.fractional_years();

    let reasoning = match (start, end) {
        (Some(_), Some(_)) => format!(
            "{} years + {} months / 12 + {} days / 365 = {} years",
            service_period.years,
            service_period.months,
            service_period.days,
            years_of_service.round_dp(4).normalize()
        ),
        _ => "Service dates incomplete, years of service is 0".to_string(),
    };

    let step = CalculationStep {
        step_number,
        rule_id: "years_of_service".to_string(),
        rule_name: "Years of Service".to_string(),
        legal_ref: "Calendar service period".to_string(),
        input: serde_json::json!({
            "service_start": start.map(|d| d.to_string()),
            "service_end": end.map(|d| d.to_string())
        }),
        output: serde_json::json!({
            "years": service_period.years,
            "months": service_period.months,
            "days": service_period.days,
            "years_of_service": years_of_service.normalize().to_string()
        }),
        reasoning,
    };

    Ok(TenureResult {
        service_period,
        years_of_service,
        step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exact_five_years() {
        let years = years_of_service(Some(date(2019, 1, 1)), Some(date(2024, 1, 1))).unwrap();
        assert_eq!(years, dec("5"));
    }

    #[test]
    fn test_exact_seven_years() {
        let years = years_of_service(Some(date(2019, 1, 1)), Some(date(2026, 1, 1))).unwrap();
        assert_eq!(years, dec("7"));
    }

    #[test]
    fn test_years_months_and_days() {
        let period = decompose_service_period(date(2023, 1, 15), date(2024, 3, 20)).unwrap();
        assert_eq!(
            period,
            ServicePeriod {
                years: 1,
                months: 2,
                days: 5
            }
        );

        let expected = dec("1") + dec("2") / dec("12") + dec("5") / dec("365");
        assert_eq!(period.fractional_years(), expected);
    }

    #[test]
    fn test_end_day_before_start_day_borrows_a_month() {
        // 20 Jan -> 20 Feb is one month, then 19 days to 10 Mar in a leap year.
        let period = decompose_service_period(date(2024, 1, 20), date(2024, 3, 10)).unwrap();
        assert_eq!((period.years, period.months, period.days), (0, 1, 19));
    }

    #[test]
    fn test_month_end_clamps_to_shorter_month() {
        let period = decompose_service_period(date(2023, 1, 31), date(2023, 2, 28)).unwrap();
        assert_eq!((period.years, period.months, period.days), (0, 1, 0));
    }

    #[test]
    fn test_leap_year_uses_365_day_convention() {
        // 2024 has 366 days but trailing days still divide by 365.
        let years = years_of_service(Some(date(2024, 1, 1)), Some(date(2024, 12, 31))).unwrap();
        let expected = dec("11") / dec("12") + dec("30") / dec("365");
        assert_eq!(years, expected);
    }

    #[test]
    fn test_same_day_is_zero() {
        let years = years_of_service(Some(date(2024, 5, 1)), Some(date(2024, 5, 1))).unwrap();
        assert_eq!(years, Decimal::ZERO);
    }

    #[test]
    fn test_missing_dates_give_zero() {
        assert_eq!(years_of_service(None, Some(date(2024, 1, 1))).unwrap(), Decimal::ZERO);
        assert_eq!(years_of_service(Some(date(2024, 1, 1)), None).unwrap(), Decimal::ZERO);
        assert_eq!(years_of_service(None, None).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_end_before_start_is_invalid_range() {
        let result = years_of_service(Some(date(2024, 1, 2)), Some(date(2024, 1, 1)));
        match result {
            Err(EngineError::InvalidRange { start, end }) => {
                assert_eq!(start, date(2024, 1, 2));
                assert_eq!(end, date(2024, 1, 1));
            }
            other => panic!("Expected InvalidRange error, got {:?}", other),
        }
    }

    #[test]
    fn test_calculate_tenure_records_step() {
        let result = calculate_tenure(Some(date(2019, 1, 1)), Some(date(2024, 1, 1)), 1).unwrap();

        assert_eq!(result.years_of_service, dec("5"));
        assert_eq!(result.step.step_number, 1);
        assert_eq!(result.step.rule_id, "years_of_service");
        assert_eq!(
            result.step.input["service_start"].as_str().unwrap(),
            "2019-01-01"
        );
        assert_eq!(
            result.step.output["years_of_service"].as_str().unwrap(),
            "5"
        );
        assert!(result.step.reasoning.contains("5 years"));
    }

    #[test]
    fn test_calculate_tenure_without_dates_explains_zero() {
        let result = calculate_tenure(None, None, 1).unwrap();

        assert_eq!(result.years_of_service, Decimal::ZERO);
        assert!(result.step.input["service_start"].is_null());
        assert!(result.step.reasoning.contains("incomplete"));
    }
}
