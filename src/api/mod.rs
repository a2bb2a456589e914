//! HTTP API module for the Payroll Processing Engine.
//!
//! This module exposes upload and report endpoints over the
//! [`PayrollService`](crate::service::PayrollService). It only translates
//! between HTTP and the service; all behavior lives in the core.

mod handlers;
mod response;
mod state;

pub use handlers::{FILES_FIELD, create_router};
pub use response::{ApiError, ApiErrorResponse, ProcessingResponse};
pub use state::AppState;
