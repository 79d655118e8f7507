//! Intake persistence layer
//!
//! Exposes the [`ImportStore`] contract consumed by the intake ledger together
//! with its PostgreSQL implementation and an in-process test double.

pub mod db;

pub use db::*;
