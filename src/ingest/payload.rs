//! Payload splitting for uploaded files.
//!
//! An uploaded file is a sequence of lines whose first line is always a
//! header. This module applies [`parse_line`] to the rest and separates
//! the valid events from the lines that must be reported back.

use std::fmt;

use tracing::debug;

use crate::error::ParseRejection;
use crate::models::Event;

use super::parse_line;

/// One file from an upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name, used in rejection descriptions.
    pub name: String,
    /// Raw file content. Must be UTF-8 to be ingested.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Creates an uploaded file from its name and raw content.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// A data line that was dropped during ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRejection {
    /// 1-based line number within the file.
    pub line_number: usize,
    /// Why the line was dropped.
    pub reason: ParseRejection,
}

impl fmt::Display for LineRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.reason)
    }
}

/// The result of parsing one file's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPayload {
    /// Valid events in file order.
    pub events: Vec<Event>,
    /// Reportable rejections in file order. Header lines are never listed.
    pub rejections: Vec<LineRejection>,
}

impl ParsedPayload {
    /// Returns true when no line needs to be reported.
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty()
    }
}

/// Parses every line after the first.
///
/// The first line is discarded whatever it contains. Blank lines and lines
/// that look like headers are skipped silently.
///
/// # Examples
///
/// ```
/// use payroll_engine::ingest::parse_payload;
///
/// let content = "SequenceNo,EmpId,FirstName,LastName,Designation,Event,Value,EventDate,Notes\n\
///                1,100,John,Doe,Engineer,SALARY,5000,01-01-2021,Jan salary\n\
///                2,100,John,Doe,Engineer,BONUS,oops,15-01-2021,Bonus\n";
/// let parsed = parse_payload(content);
///
/// assert_eq!(parsed.events.len(), 1);
/// assert_eq!(parsed.rejections.len(), 1);
/// assert_eq!(parsed.rejections[0].line_number, 3);
/// ```
pub fn parse_payload(content: &str) -> ParsedPayload {
    let mut parsed = ParsedPayload::default();

    for (index, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(event) => {
                debug!(sequence_no = %event.sequence_no, emp_id = %event.emp_id, "Parsed event");
                parsed.events.push(event);
            }
            Err(reason) if reason.is_header() => {}
            Err(reason) => parsed.rejections.push(LineRejection {
                line_number: index + 1,
                reason,
            }),
        }
    }

    parsed
}
