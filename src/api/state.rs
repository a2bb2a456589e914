//! Application state for the Payroll Processing Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::service::PayrollService;

/// Shared application state.
///
/// Holds the payroll service shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    service: Arc<PayrollService>,
}

impl AppState {
    /// Creates a new application state around `service`.
    pub fn new(service: PayrollService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates application state from loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::new(PayrollService::from_config(config))
    }

    /// Returns a shared handle to the payroll service.
    pub fn service(&self) -> Arc<PayrollService> {
        Arc::clone(&self.service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_one_service() {
        let state = AppState::from_config(&ConfigLoader::default());
        let other = state.clone();

        assert!(Arc::ptr_eq(&state.service(), &other.service()));
        assert_eq!(
            state.service().store().path(),
            Path::new("data/EmployeeData.json")
        );
    }
}
