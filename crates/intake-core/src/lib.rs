//! Intake Core Library
//!
//! Domain models, content fingerprinting, error types and configuration
//! shared by every intake component.

pub mod config;
pub mod constants;
pub mod error;
pub mod fingerprint;
pub mod models;
pub mod store_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use fingerprint::{fingerprint, Fingerprint};
pub use store_types::StoreBackend;
