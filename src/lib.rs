//! Payroll Processing Engine
//!
//! This crate ingests payroll event records (salary payments, bonuses,
//! reimbursements, onboarding and exit events) from delimited text uploads,
//! persists them to a durable append-only store, and derives aggregate
//! reports over the stored history on demand.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod reports;
pub mod service;
pub mod store;
