//! Core data models for the End-of-Service engine.
//!
//! This module contains the settlement inputs and results, the service
//! period decomposition, the free zone rule selector and the lifecycle
//! record that ties them together.

mod employee;
mod free_zone_rule;
mod service_period;
mod settlement_input;
mod settlement_record;
mod settlement_result;

pub use employee::{Contract, Employee};
pub use free_zone_rule::FreeZoneRule;
pub use service_period::{DAYS_PER_YEAR, MONTHS_PER_YEAR, ServicePeriod};
pub use settlement_input::SettlementInput;
pub use settlement_record::{DEFAULT_CURRENCY, SettlementRecord, SettlementState};
pub use settlement_result::{CalculationStep, SettlementResult};
