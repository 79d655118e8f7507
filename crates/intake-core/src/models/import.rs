use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use crate::constants::ANONYMOUS_SUBMITTER;
use crate::error::AppError;
use crate::fingerprint::Fingerprint;

/// Lifecycle state of an import.
///
/// Only `received` is produced here; later processing stages own any
/// further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "import_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ImportStatus {
    Received,
}

impl Display for ImportStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ImportStatus::Received => write!(f, "received"),
        }
    }
}

/// Durable record of one accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ImportRecord {
    pub id: Uuid,
    /// Label supplied by the uploader, stored verbatim
    pub filename: String,
    /// Content length in bytes
    pub size: i64,
    pub fingerprint: Fingerprint,
    pub submitter_id: String,
    pub status: ImportStatus,
    /// RFC 3339 with explicit UTC offset
    pub created_at: DateTime<Utc>,
    /// Diagnostics appended by downstream processing
    pub errors: Vec<String>,
}

impl ImportRecord {
    /// Build a fresh `received` record with a newly generated id.
    pub fn new_received(
        key: &IdempotencyKey,
        filename: impl Into<String>,
        size: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            size: size as i64,
            fingerprint: key.fingerprint.clone(),
            submitter_id: key.submitter_id.as_str().to_string(),
            status: ImportStatus::Received,
            created_at: Utc::now(),
            errors: Vec::new(),
        }
    }

    pub fn idempotency_key(&self) -> IdempotencyKey {
        IdempotencyKey {
            submitter_id: SubmitterId(self.submitter_id.clone()),
            fingerprint: self.fingerprint.clone(),
        }
    }
}

/// Opaque identity of the uploading party. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmitterId(String);

impl SubmitterId {
    /// Normalise a boundary-supplied identity; absent or blank becomes `anon`.
    ///
    /// Identities containing NUL are rejected since the store cannot hold them.
    pub fn from_optional(raw: Option<&str>) -> Result<Self, AppError> {
        match raw {
            Some(s) if s.contains('\0') => Err(AppError::InvalidInput(
                "user_id must not contain NUL bytes".to_string(),
            )),
            Some(s) if !s.trim().is_empty() => Ok(SubmitterId(s.to_string())),
            _ => Ok(Self::anonymous()),
        }
    }

    pub fn anonymous() -> Self {
        SubmitterId(ANONYMOUS_SUBMITTER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for SubmitterId {
    type Error = AppError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        SubmitterId::from_optional(Some(s))
    }
}

impl Display for SubmitterId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// The pair that identifies a logically distinct submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey {
    pub submitter_id: SubmitterId,
    pub fingerprint: Fingerprint,
}

impl IdempotencyKey {
    pub fn new(submitter_id: SubmitterId, fingerprint: Fingerprint) -> Self {
        Self {
            submitter_id,
            fingerprint,
        }
    }
}

impl Display for IdempotencyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.submitter_id, self.fingerprint)
    }
}

/// Whether a submission created a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmitOutcome {
    Received,
    Duplicate,
}

impl Display for SubmitOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SubmitOutcome::Received => write!(f, "received"),
            SubmitOutcome::Duplicate => write!(f, "duplicate"),
        }
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub record_id: Uuid,
    pub outcome: SubmitOutcome,
}

/// Response body for an accepted upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportAcceptedResponse {
    /// Canonical id for this (submitter, content) pair
    pub import_id: Uuid,
    /// `received` for a new record, `duplicate` when one already existed
    pub status: SubmitOutcome,
}

impl From<SubmitReceipt> for ImportAcceptedResponse {
    fn from(receipt: SubmitReceipt) -> Self {
        Self {
            import_id: receipt.record_id,
            status: receipt.outcome,
        }
    }
}
