//! Error types for the Time & Compensation Ledger Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur in the engine. Errors are plain
//! values returned to the caller; the engine never maps them to transport
//! concerns such as HTTP status codes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Time & Compensation Ledger Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use comp_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An input value was malformed or missing.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// Submitted hours were not a positive multiple of half an hour.
    #[error("Hours must be a positive multiple of 0.5, got {hours}")]
    HoursPrecision {
        /// The hours value that was rejected.
        hours: Decimal,
    },

    /// The daily logged-hours cap would be exceeded.
    #[error(
        "Daily cap of {cap} hours exceeded for {date}: {logged} already logged, {requested} requested"
    )]
    DailyCapExceeded {
        /// The date the entry was submitted for.
        date: NaiveDate,
        /// Hours already logged on that date.
        logged: Decimal,
        /// Hours requested in the new entry.
        requested: Decimal,
        /// The configured daily cap.
        cap: Decimal,
    },

    /// The work type is not allowed in the context of the given date.
    #[error("Work type '{work_type}' is not valid for {date}: {message}")]
    InvalidWorkTypeForContext {
        /// The work type code that was rejected.
        work_type: String,
        /// The date of the submission.
        date: NaiveDate,
        /// A description of the mismatch.
        message: String,
    },

    /// A leave type restricted to one gender was requested by the other.
    #[error("Leave type '{leave_type}' is restricted to gender {required}")]
    GenderRestriction {
        /// The leave type code.
        leave_type: String,
        /// The gender the leave type is restricted to ("M" or "F").
        required: String,
    },

    /// The requested leave dates overlap an existing application.
    #[error("Leave from {start} to {end} overlaps an existing application ({conflict_start} to {conflict_end})")]
    LeaveOverlap {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
        /// Start date of the conflicting application.
        conflict_start: NaiveDate,
        /// End date of the conflicting application.
        conflict_end: NaiveDate,
    },

    /// Not enough active compensatory-leave hours to satisfy a consumption.
    #[error("Insufficient compensatory leave: requested {requested} hours, {available} available")]
    InsufficientCompensatoryLeave {
        /// Hours requested.
        requested: Decimal,
        /// Hours available across active, unexpired grants.
        available: Decimal,
    },

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "work type", "employee", "grant").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A concurrent writer modified the ledger between read and commit.
    ///
    /// The operation left no partial state; the caller may retry.
    #[error("Concurrent modification of {resource}, retry the operation")]
    ConcurrencyConflict {
        /// The resource that was contended (e.g. "compensatory leave ledger").
        resource: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
