//! Ingestion of uploaded payroll files.
//!
//! This module contains the line parser and the payload splitter that turns
//! one uploaded file into valid events plus per-line rejections.

mod parser;
mod payload;

pub use parser::{DATE_FORMAT, FIELD_COUNT, HEADER_TOKEN, parse_line};
pub use payload::{LineRejection, ParsedPayload, UploadedFile, parse_payload};
