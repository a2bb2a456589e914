//! Durable storage for payroll events.
//!
//! The [`EventStore`] holds the ordered event collection in a single file
//! and guarantees that concurrent appends never interleave.

mod event_store;

pub use event_store::EventStore;
