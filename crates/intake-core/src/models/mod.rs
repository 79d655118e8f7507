//! Data models for the intake domain

mod import;

pub use import::*;
