//! Error types module
//!
//! All intake failures are unified under [`AppError`]. Each variant describes
//! how it should be presented to a client through [`ErrorMetadata`], so the
//! HTTP layer only has to render what the error says about itself.
//!
//! The store variants wrap `sqlx::Error` when the `sqlx` feature is enabled
//! and carry a plain message otherwise. Connectivity failures become
//! `StoreUnavailable`; errors the database returns for a statement become
//! `StoreRejected`, which retrying will not fix.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors such as oversized uploads or unknown ids
    Debug,
    /// Unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "PAYLOAD_TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the whole operation may succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File too large (>{limit} bytes)")]
    PayloadTooLarge { limit: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    /// A conditional insert was rejected but the conflicting record could not be read back.
    #[error("Idempotency lookup failed for submitter {submitter_id} and fingerprint {fingerprint}")]
    IdempotencyLookupFailed {
        submitter_id: String,
        fingerprint: String,
    },

    #[cfg(feature = "sqlx")]
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[cfg(feature = "sqlx")]
    #[error("Store rejected operation: {0}")]
    StoreRejected(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Store rejected operation: {0}")]
    StoreRejected(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::Database(_)
            | SqlxError::RowNotFound
            | SqlxError::TypeNotFound { .. }
            | SqlxError::ColumnNotFound(_)
            | SqlxError::ColumnIndexOutOfBounds { .. }
            | SqlxError::ColumnDecode { .. }
            | SqlxError::Encode(_)
            | SqlxError::Decode(_) => AppError::StoreRejected(err),
            other => AppError::StoreUnavailable(other),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::PayloadTooLarge { .. } => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size and upload again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the import ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::IdempotencyLookupFailed { .. } => (
            500,
            "IDEMPOTENCY_LOOKUP_FAILED",
            false,
            Some("Contact support if this error persists"),
            true,
            LogLevel::Error,
        ),
        AppError::StoreUnavailable(_) => (
            503,
            "STORE_UNAVAILABLE",
            true,
            Some("Retry the upload after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::StoreRejected(_) => (
            500,
            "STORE_REJECTED",
            false,
            Some("Contact support if this error persists"),
            true,
            LogLevel::Error,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request format and parameters"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::PayloadTooLarge { .. } => "PayloadTooLarge",
            AppError::NotFound(_) => "NotFound",
            AppError::IdempotencyLookupFailed { .. } => "IdempotencyLookupFailed",
            AppError::StoreUnavailable(_) => "StoreUnavailable",
            AppError::StoreRejected(_) => "StoreRejected",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::PayloadTooLarge { limit } => {
                format!("file too large (>{} bytes)", limit)
            }
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::IdempotencyLookupFailed { .. } => "Internal server error".to_string(),
            AppError::StoreUnavailable(_) => "Import store is unavailable".to_string(),
            AppError::StoreRejected(_) => "Internal server error".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
