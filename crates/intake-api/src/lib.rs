//! Intake API Library
//!
//! HTTP boundary for the intake service: routes, multipart extraction,
//! error rendering and application setup.

mod api_doc;
pub mod constants;
mod handlers;
mod middleware;
pub mod setup;
mod telemetry;
mod utils;

pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
