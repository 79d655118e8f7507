//! Intake service layer
//!
//! Hosts the intake ledger, which turns raw uploads into idempotent import
//! records. HTTP and CLI concerns stay in the API and CLI crates.

pub mod services;

pub use services::IntakeLedger;
