//! Configuration types for the payroll engine.
//!
//! These structures are deserialized from the YAML configuration file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Location of the event store relative to the process working directory.
pub const DEFAULT_DATA_FILE: &str = "data/EmployeeData.json";

/// Event store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the file holding the persisted event collection.
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Event store settings.
    pub storage: StorageConfig,
}
