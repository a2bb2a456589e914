//! Configuration loading for the Payroll Processing Engine.
//!
//! This module loads engine settings from a YAML file. Every setting has a
//! default, so an empty file (or [`ConfigLoader::default`]) yields a working
//! configuration that stores events at the well-known path.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Event store: {}", loader.data_file().display());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, DEFAULT_DATA_FILE, StorageConfig};
