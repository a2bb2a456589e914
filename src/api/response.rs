//! Response types for the Payroll Processing Engine API.
//!
//! This module defines the upload response body and the error response
//! used when a request cannot be served.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::models::Event;
use crate::service::IngestionOutcome;

/// Response body for the upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResponse {
    /// True only if every file was parsed and stored cleanly.
    pub success: bool,
    /// Identifier of this upload, also used as the log correlation id.
    pub transaction_id: Uuid,
    /// Reason code on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,
    /// Reason description on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_desc: Option<String>,
    /// Stored events, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,
    /// Problem descriptions, present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_descriptions: Option<Vec<String>>,
}

impl ProcessingResponse {
    /// Builds the response for a completed ingestion.
    pub fn from_outcome(transaction_id: Uuid, outcome: IngestionOutcome) -> Self {
        if outcome.success {
            Self {
                success: true,
                transaction_id,
                reason_code: None,
                reason_desc: None,
                events: Some(outcome.events),
                error_descriptions: None,
            }
        } else {
            Self {
                error_descriptions: Some(outcome.error_descriptions),
                ..Self::rejected(transaction_id, ErrorCode::ErrorProcessingFile)
            }
        }
    }

    /// Builds a failure response carrying only `code`.
    pub fn rejected(transaction_id: Uuid, code: ErrorCode) -> Self {
        Self {
            success: false,
            transaction_id,
            reason_code: Some(code.code().to_string()),
            reason_desc: Some(code.description().to_string()),
            events: None,
            error_descriptions: Some(vec![code.description().to_string()]),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates an API error from a reason code.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code: code.code().to_string(),
            message: code.description().to_string(),
            details: None,
        }
    }

    /// Attaches details to the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// An internal failure while serving the request.
    pub fn internal(details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: ApiError::from_code(ErrorCode::InternalException).with_details(details),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}
