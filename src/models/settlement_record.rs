//! Settlement record and lifecycle.
//!
//! A [`SettlementRecord`] holds the inputs of one employee's settlement,
//! the result last calculated from them, a reference identifier and a
//! status label.
//!
//! ```text
//! Draft ──confirm()──▶ Confirmed ──mark_done()──▶ Done
//!   │                     │
//!   └──cancel()──▶ Cancelled ◀──cancel()──┘
//!
//! Confirmed / Cancelled ──reset_to_draft()──▶ Draft
//! ```
//!
//! Transitions never recalculate. The result is refreshed only by
//! [`SettlementRecord::recompute`] or [`SettlementRecord::update_input`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::calculate_settlement;
use crate::config::EosConfig;
use crate::error::{EngineError, EngineResult};
use crate::sequence::{EOS_SEQUENCE_CODE, SequenceGenerator};

use super::{Contract, Employee, SettlementInput, SettlementResult};

/// The currency used when none is given.
pub const DEFAULT_CURRENCY: &str = "AED";

/// The lifecycle state of a settlement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementState {
    /// Being prepared; inputs may change freely.
    #[default]
    Draft,
    /// Reviewed and given a reference.
    Confirmed,
    /// Paid out. Terminal.
    Done,
    /// Abandoned.
    Cancelled,
}

impl SettlementState {
    /// Returns the canonical name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if inputs can no longer be edited in this state.
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

impl fmt::Display for SettlementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle-tracked End-of-Service settlement.
///
/// The stored result always corresponds to the stored input: inputs are
/// only changed through [`update_input`](Self::update_input), which
/// recalculates before committing.
///
/// # Example
///
/// ```
/// use eos_engine::config::EosConfig;
/// use eos_engine::models::{SettlementInput, SettlementRecord, SettlementState};
/// use eos_engine::sequence::PrefixedSequence;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let config = EosConfig::default();
/// let input = SettlementInput::new(
///     NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     Decimal::new(9000, 0),
/// );
///
/// let mut record = SettlementRecord::new(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     input,
///     &config,
/// )
/// .unwrap();
/// assert_eq!(record.reference(), None);
///
/// record.confirm(&PrefixedSequence::default()).unwrap();
/// assert_eq!(record.state(), SettlementState::Confirmed);
/// assert_eq!(record.reference(), Some("EOS/00001"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    reference: Option<String>,
    employee_id: String,
    contract_id: Option<String>,
    settlement_date: NaiveDate,
    currency: String,
    note: Option<String>,
    state: SettlementState,
    input: SettlementInput,
    result: SettlementResult,
}

impl SettlementRecord {
    /// Creates a draft record and calculates its result.
    ///
    /// # Errors
    ///
    /// Returns any error from [`calculate_settlement`], such as `InvalidRange`.
    pub fn new(
        employee_id: impl Into<String>,
        settlement_date: NaiveDate,
        input: SettlementInput,
        config: &EosConfig,
    ) -> EngineResult<Self> {
        let result = calculate_settlement(&input, config)?;

        Ok(Self {
            reference: None,
            employee_id: employee_id.into(),
            contract_id: None,
            settlement_date,
            currency: DEFAULT_CURRENCY.to_string(),
            note: None,
            state: SettlementState::Draft,
            input,
            result,
        })
    }

    /// Creates a draft record pre-filled from an employee's contract.
    ///
    /// The contract supplies the service start date and monthly wage.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the contract belongs to another employee,
    /// or any error from [`calculate_settlement`].
    pub fn for_employee(
        employee: &Employee,
        contract: &Contract,
        service_end: NaiveDate,
        settlement_date: NaiveDate,
        config: &EosConfig,
    ) -> EngineResult<Self> {
        if !contract.belongs_to(&employee.id) {
            return Err(EngineError::InvalidInput {
                field: "contract_id".to_string(),
                message: format!(
                    "contract '{}' belongs to employee '{}', not '{}'",
                    contract.id, contract.employee_id, employee.id
                ),
            });
        }

        let input = SettlementInput::from_contract(contract, service_end);
        let mut record = Self::new(employee.id.clone(), settlement_date, input, config)?;
        record.contract_id = Some(contract.id.clone());
        Ok(record)
    }

    /// Sets the settlement currency code.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Returns the reference, once one has been assigned.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Returns the employee the settlement is for.
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// Returns the contract the settlement was pre-filled from, if any.
    pub fn contract_id(&self) -> Option<&str> {
        self.contract_id.as_deref()
    }

    /// Returns the settlement date.
    pub fn settlement_date(&self) -> NaiveDate {
        self.settlement_date
    }

    /// Returns the currency code.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Returns the free-text note.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Replaces the free-text note.
    pub fn set_note(&mut self, note: Option<String>) {
        self.note = note;
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> SettlementState {
        self.state
    }

    /// Returns the current inputs.
    pub fn input(&self) -> &SettlementInput {
        &self.input
    }

    /// Returns the result calculated from the current inputs.
    pub fn result(&self) -> &SettlementResult {
        &self.result
    }

    /// Recalculates the result from the stored inputs.
    ///
    /// Use this after the rule configuration changes.
    pub fn recompute(&mut self, config: &EosConfig) -> EngineResult<&SettlementResult> {
        self.result = calculate_settlement(&self.input, config)?;
        Ok(&self.result)
    }

    /// Applies a change to the inputs and recalculates.
    ///
    /// The change is committed only if the recalculation succeeds, so a
    /// rejected edit (for example an inverted date range) leaves the record
    /// untouched.
    ///
    /// # Errors
    ///
    /// - `RecordLocked` if the record is done or cancelled
    /// - any error from [`calculate_settlement`]
    pub fn update_input<F>(&mut self, config: &EosConfig, change: F) -> EngineResult<&SettlementResult>
    where
        F: FnOnce(&mut SettlementInput),
    {
        if self.state.is_locked() {
            return Err(EngineError::RecordLocked {
                state: self.state.to_string(),
            });
        }

        let mut candidate = self.input.clone();
        change(&mut candidate);
        let result = calculate_settlement(&candidate, config)?;

        self.input = candidate;
        self.result = result;
        Ok(&self.result)
    }

    /// Confirms a draft, assigning a reference if it has none.
    ///
    /// The reference is obtained from `sequence` before the state changes.
    /// If the sequence fails, the record stays a draft without a reference.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the record is not a draft
    /// - any error from the sequence generator
    pub fn confirm<S>(&mut self, sequence: &S) -> EngineResult<()>
    where
        S: SequenceGenerator + ?Sized,
    {
        self.check_transition(&[SettlementState::Draft], SettlementState::Confirmed)?;

        if self.reference.is_none() {
            let reference = sequence.next_by_code(EOS_SEQUENCE_CODE).map_err(|err| {
                warn!(
                    employee_id = %self.employee_id,
                    error = %err,
                    "Settlement confirmation blocked by sequence failure"
                );
                err
            })?;
            self.reference = Some(reference);
        }

        self.state = SettlementState::Confirmed;
        info!(
            employee_id = %self.employee_id,
            reference = self.reference.as_deref().unwrap_or_default(),
            total_settlement = %self.result.total_settlement,
            "Settlement confirmed"
        );
        Ok(())
    }

    /// Marks a confirmed settlement as done.
    pub fn mark_done(&mut self) -> EngineResult<()> {
        self.move_to(&[SettlementState::Confirmed], SettlementState::Done)
    }

    /// Cancels a draft or confirmed settlement.
    pub fn cancel(&mut self) -> EngineResult<()> {
        self.move_to(
            &[SettlementState::Draft, SettlementState::Confirmed],
            SettlementState::Cancelled,
        )
    }

    /// Returns a confirmed or cancelled settlement to draft.
    ///
    /// An assigned reference is kept and reused on the next confirmation.
    pub fn reset_to_draft(&mut self) -> EngineResult<()> {
        self.move_to(
            &[SettlementState::Confirmed, SettlementState::Cancelled],
            SettlementState::Draft,
        )
    }

    fn move_to(&mut self, allowed_from: &[SettlementState], to: SettlementState) -> EngineResult<()> {
        self.check_transition(allowed_from, to)?;
        let from = self.state;
        self.state = to;
        info!(
            employee_id = %self.employee_id,
            reference = self.reference.as_deref().unwrap_or_default(),
            from = %from,
            to = %to,
            "Settlement state changed"
        );
        Ok(())
    }

    fn check_transition(&self, allowed_from: &[SettlementState], to: SettlementState) -> EngineResult<()> {
        if allowed_from.contains(&self.state) {
            return Ok(());
        }
        warn!(
            employee_id = %self.employee_id,
            from = %self.state,
            to = %to,
            "Rejected settlement state change"
        );
        Err(EngineError::InvalidTransition {
            from: self.state.to_string(),
            to: to.to_string(),
        })
    }
}
