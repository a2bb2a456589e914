//! Error types for the Payroll Processing Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report: fatal store and configuration
//! errors, per-line parse rejections, and the reason-code table exposed to
//! callers of the ingestion API.

use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

/// The main error type for the Payroll Processing Engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
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
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The event store or its containing directory could not be created,
    /// read, or written.
    #[error("Failed to access event store '{path}': {message}")]
    FileAccess {
        /// The path of the backing file or directory.
        path: String,
        /// A description of the I/O failure.
        message: String,
    },

    /// The event store exists but its content could not be decoded.
    #[error("Failed to decode event store '{path}': {message}")]
    StoreDecode {
        /// The path of the backing file.
        path: String,
        /// A description of the decode failure.
        message: String,
    },

    /// A report total does not fit the supported decimal range.
    #[error("Report total for '{group}' exceeds the supported amount range")]
    AmountOverflow {
        /// The report group whose total overflowed.
        group: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Why a single input line did not produce an event.
///
/// Rejections are recoverable: the line is dropped and ingestion continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRejection {
    /// The line is a column header rather than data.
    #[error("header line")]
    Header,

    /// The line split into fewer fields than a record needs.
    #[error("incomplete data line: expected 9 fields, found {found}")]
    IncompleteLine {
        /// The number of comma-separated fields found.
        found: usize,
    },

    /// The employee id field is empty.
    #[error("missing employee id")]
    MissingEmployeeId,

    /// The value field is not a decimal number.
    #[error("invalid value '{value}': not a decimal number")]
    InvalidValue {
        /// The offending field text.
        value: String,
    },

    /// The event date does not match `dd-MM-yyyy`.
    #[error("invalid event date '{value}': expected dd-MM-yyyy")]
    InvalidDate {
        /// The offending field text.
        value: String,
    },
}

impl ParseRejection {
    /// Returns true for header lines, which are dropped without being
    /// reported as a failure.
    pub fn is_header(&self) -> bool {
        matches!(self, ParseRejection::Header)
    }
}

/// Reason codes reported to callers of the ingestion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// An unexpected internal failure.
    InternalException,
    /// The upload carried no files.
    NoFileFound,
    /// A file could not be decoded or stored.
    ErrorProcessingFile,
}

static ERROR_CODES: LazyLock<HashMap<&'static str, ErrorCode>> =
    LazyLock::new(|| ErrorCode::ALL.iter().map(|code| (code.code(), *code)).collect());

impl ErrorCode {
    /// Every known reason code.
    pub const ALL: [ErrorCode; 3] = [
        ErrorCode::InternalException,
        ErrorCode::NoFileFound,
        ErrorCode::ErrorProcessingFile,
    ];

    /// The wire code, e.g. `"400-002"`.
    pub fn code(self) -> &'static str {
        match self {
            ErrorCode::InternalException => "400-001",
            ErrorCode::NoFileFound => "400-002",
            ErrorCode::ErrorProcessingFile => "400-003",
        }
    }

    /// The human-readable description for this code.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::InternalException => "Internal Error has been occurred.",
            ErrorCode::NoFileFound => "No file uploaded or file is empty",
            ErrorCode::ErrorProcessingFile => "Error processing file",
        }
    }

    /// Looks up a reason code by its wire code.
    ///
    /// ```
    /// use payroll_engine::error::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::from_code("400-002"), Some(ErrorCode::NoFileFound));
    /// assert_eq!(ErrorCode::from_code("999-999"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        ERROR_CODES.get(code).copied()
    }
}
