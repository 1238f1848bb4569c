//! Request types for the settlement API.
//!
//! This module defines the JSON request structure for the
//! `/settlements/calculate` endpoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FreeZoneRule, SettlementInput};

/// Request body for the `/settlements/calculate` endpoint.
///
/// Only `monthly_wage` is required. Omitted service dates give zero years
/// of service and omitted amounts default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRequest {
    /// Optional identifier echoed back in the response.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// First day of service.
    #[serde(default)]
    pub service_start: Option<NaiveDate>,
    /// Last day of service.
    #[serde(default)]
    pub service_end: Option<NaiveDate>,
    /// Monthly basic wage.
    pub monthly_wage: Decimal,
    /// The gratuity formula (`federal`, `none`, `dmcc` or `custom1`).
    #[serde(default)]
    pub free_zone_rule: FreeZoneRule,
    /// Remaining annual leave days.
    #[serde(default)]
    pub unused_leave_days: Decimal,
    /// Bonuses or allowances to include.
    #[serde(default)]
    pub other_payments: Decimal,
    /// Amounts to withhold.
    #[serde(default)]
    pub deductions: Decimal,
}

impl From<SettlementRequest> for SettlementInput {
    fn from(req: SettlementRequest) -> Self {
        SettlementInput {
            service_start: req.service_start,
            service_end: req.service_end,
            monthly_wage: req.monthly_wage,
            free_zone_rule: req.free_zone_rule,
            unused_leave_days: req.unused_leave_days,
            other_payments: req.other_payments,
            deductions: req.deductions,
        }
    }
}
