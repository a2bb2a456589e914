//! HTTP request handlers for the Payroll Processing Engine API.
//!
//! This module contains the handler functions for all API endpoints. Core
//! calls touch the filesystem, so they run on the blocking thread pool.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineResult, ErrorCode};
use crate::ingest::UploadedFile;
use crate::service::PayrollService;

use super::response::{ApiErrorResponse, ProcessingResponse};
use super::state::AppState;

/// Multipart field name carrying uploaded files.
pub const FILES_FIELD: &str = "files";

const UNNAMED_FILE: &str = "upload";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/payroll/upload", post(upload_handler))
        .route("/api/payroll/total-employees", get(total_employees_handler))
        .route("/api/payroll/monthly-salary", get(monthly_salary_handler))
        .route("/api/payroll/yearly-financial", get(yearly_financial_handler))
        .route(
            "/api/payroll/employee-financial-report",
            get(employee_financial_handler),
        )
        .route("/api/payroll/monthly-amount", get(monthly_amount_handler))
        .route("/api/payroll/monthly-joins", get(monthly_joins_handler))
        .route("/api/payroll/monthly-exits", get(monthly_exits_handler))
        .route("/api/payroll/events/:event_type", get(events_by_type_handler))
        .with_state(state)
}

/// Handler for POST /api/payroll/upload.
///
/// Accepts one or more `files` parts and ingests them in order.
async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let transaction_id = Uuid::new_v4();
    info!(correlation_id = %transaction_id, "Processing upload request");

    let files = match multipart {
        Ok(multipart) => match read_files(multipart).await {
            Ok(files) => files,
            Err(err) => {
                warn!(correlation_id = %transaction_id, error = %err, "Malformed multipart body");
                let mut response =
                    ProcessingResponse::rejected(transaction_id, ErrorCode::ErrorProcessingFile);
                response.error_descriptions = Some(vec![err.body_text()]);
                return (StatusCode::BAD_REQUEST, Json(response)).into_response();
            }
        },
        Err(rejection) => {
            warn!(correlation_id = %transaction_id, error = %rejection, "Upload is not multipart");
            Vec::new()
        }
    };

    if files.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ProcessingResponse::rejected(
                transaction_id,
                ErrorCode::NoFileFound,
            )),
        )
            .into_response();
    }

    let file_count = files.len();
    let service = state.service();
    let started = Instant::now();
    let outcome = match tokio::task::spawn_blocking(move || service.ingest(&files)).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(correlation_id = %transaction_id, error = %err, "Ingestion task failed");
            return ApiErrorResponse::internal(err.to_string()).into_response();
        }
    };

    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    info!(
        correlation_id = %transaction_id,
        files = file_count,
        success = outcome.success,
        events = outcome.events.len(),
        errors = outcome.error_descriptions.len(),
        duration_us = started.elapsed().as_micros(),
        "Upload completed"
    );

    (
        status,
        Json(ProcessingResponse::from_outcome(transaction_id, outcome)),
    )
        .into_response()
}

/// Collects the non-empty `files` parts of a multipart body.
async fn read_files(mut multipart: Multipart) -> Result<Vec<UploadedFile>, MultipartError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or(UNNAMED_FILE).to_string();
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            continue;
        }
        files.push(UploadedFile::new(name, bytes.to_vec()));
    }

    Ok(files)
}

/// Runs a report on the blocking pool and renders it as JSON.
///
/// A report that cannot be computed answers 500 with `400-001`.
async fn run_report<T, F>(state: AppState, report: &'static str, build: F) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce(&PayrollService) -> EngineResult<T> + Send + 'static,
{
    let correlation_id = Uuid::new_v4();
    let service = state.service();
    let started = Instant::now();

    match tokio::task::spawn_blocking(move || build(service.as_ref())).await {
        Ok(Ok(view)) => {
            info!(
                correlation_id = %correlation_id,
                report,
                duration_us = started.elapsed().as_micros(),
                "Report generated"
            );
            (StatusCode::OK, Json(view)).into_response()
        }
        Ok(Err(err)) => {
            warn!(correlation_id = %correlation_id, report, error = %err, "Report could not be computed");
            ApiErrorResponse::internal(err.to_string()).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, report, error = %err, "Report failed");
            ApiErrorResponse::internal(err.to_string()).into_response()
        }
    }
}

async fn total_employees_handler(State(state): State<AppState>) -> Response {
    run_report(state, "total-employees", |service| {
        Ok(service.total_employees())
    })
    .await
}

async fn monthly_salary_handler(State(state): State<AppState>) -> Response {
    run_report(state, "monthly-salary", PayrollService::monthly_salary_report).await
}

async fn yearly_financial_handler(State(state): State<AppState>) -> Response {
    run_report(state, "yearly-financial", |service| {
        Ok(service.yearly_financial_report())
    })
    .await
}

async fn employee_financial_handler(State(state): State<AppState>) -> Response {
    run_report(
        state,
        "employee-financial-report",
        PayrollService::employee_financial_report,
    )
    .await
}

async fn monthly_amount_handler(State(state): State<AppState>) -> Response {
    run_report(state, "monthly-amount", PayrollService::monthly_amount_report).await
}

async fn monthly_joins_handler(State(state): State<AppState>) -> Response {
    run_report(state, "monthly-joins", |service| Ok(service.monthly_joins())).await
}

async fn monthly_exits_handler(State(state): State<AppState>) -> Response {
    run_report(state, "monthly-exits", |service| Ok(service.monthly_exits())).await
}

async fn events_by_type_handler(
    State(state): State<AppState>,
    Path(event_type): Path<String>,
) -> Response {
    run_report(state, "events-by-type", move |service| {
        Ok(service.events_by_month(&event_type))
    })
    .await
}
