//! Error types for the End-of-Service engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while calculating or tracking
//! a settlement.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the End-of-Service engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use eos_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::InvalidRange {
///     start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     end: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Service end date 2023-01-01 is before start date 2024-01-01"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The service end date precedes the service start date.
    #[error("Service end date {end} is before start date {start}")]
    InvalidRange {
        /// The service start date.
        start: NaiveDate,
        /// The service end date.
        end: NaiveDate,
    },

    /// A settlement input field held a value that cannot be accepted.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A lifecycle transition is not allowed from the current state.
    #[error("Cannot move settlement from '{from}' to '{to}'")]
    InvalidTransition {
        /// The current state.
        from: String,
        /// The requested state.
        to: String,
    },

    /// The settlement can no longer be edited.
    #[error("Settlement is locked in state '{state}'")]
    RecordLocked {
        /// The state that locks the record.
        state: String,
    },

    /// The sequence generator could not provide a reference.
    #[error("Sequence '{code}' unavailable: {message}")]
    SequenceUnavailable {
        /// The sequence code that was requested.
        code: String,
        /// A description of the failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No bracket parameters are configured for a free zone rule.
    #[error("Gratuity rule not configured: {rule}")]
    RuleNotConfigured {
        /// The rule name that was missing.
        rule: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
