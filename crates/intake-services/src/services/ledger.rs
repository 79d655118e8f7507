//! Intake ledger
//!
//! Owns the mapping from `(submitter_id, fingerprint)` to import record. A
//! submission either creates the record for its key or resolves to the record
//! that already holds it; the store's atomic insert-if-absent decides which.

use std::sync::Arc;

use intake_core::constants::MAX_UPLOAD_BYTES;
use intake_core::models::{
    IdempotencyKey, ImportRecord, SubmitOutcome, SubmitReceipt, SubmitterId,
};
use intake_core::{AppError, Fingerprint};
use intake_db::ImportStore;
use uuid::Uuid;

#[derive(Clone)]
pub struct IntakeLedger {
    store: Arc<dyn ImportStore>,
    max_upload_bytes: usize,
}

impl IntakeLedger {
    pub fn new(store: Arc<dyn ImportStore>) -> Self {
        Self {
            store,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }

    /// Lower the size limit. Values above [`MAX_UPLOAD_BYTES`] are clamped to it.
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes.min(MAX_UPLOAD_BYTES);
        self
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Record an upload, or resolve it to the existing record for the same
    /// submitter and content.
    ///
    /// Fails with [`AppError::PayloadTooLarge`] before touching the store when
    /// `content` exceeds the configured limit. Safe to retry end to end.
    #[tracing::instrument(skip(self, content), fields(submitter_id = %submitter, size = content.len()))]
    pub async fn submit(
        &self,
        submitter: &SubmitterId,
        content: &[u8],
        filename: &str,
    ) -> Result<SubmitReceipt, AppError> {
        if content.len() > self.max_upload_bytes {
            return Err(AppError::PayloadTooLarge {
                limit: self.max_upload_bytes,
            });
        }
        if filename.contains('\0') {
            return Err(AppError::InvalidInput(
                "filename must not contain NUL bytes".to_string(),
            ));
        }

        let key = IdempotencyKey::new(submitter.clone(), Fingerprint::of(content));
        let candidate = ImportRecord::new_received(&key, filename, content.len());

        if self.store.create_if_absent(&key, &candidate).await? {
            tracing::info!(
                import_id = %candidate.id,
                fingerprint = %key.fingerprint,
                "Import received"
            );
            return Ok(SubmitReceipt {
                record_id: candidate.id,
                outcome: SubmitOutcome::Received,
            });
        }

        match self.store.find_by_key(&key).await? {
            Some(existing) => {
                tracing::debug!(
                    import_id = %existing.id,
                    fingerprint = %key.fingerprint,
                    "Duplicate import resolved to existing record"
                );
                Ok(SubmitReceipt {
                    record_id: existing.id,
                    outcome: SubmitOutcome::Duplicate,
                })
            }
            None => {
                tracing::error!(
                    fingerprint = %key.fingerprint,
                    "Insert was rejected but no record exists for the key"
                );
                Err(AppError::IdempotencyLookupFailed {
                    submitter_id: key.submitter_id.to_string(),
                    fingerprint: key.fingerprint.to_string(),
                })
            }
        }
    }

    /// Fetch a record by its identifier. Only the canonical lowercase
    /// hyphenated form issued by `submit` matches; anything else is not found.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, record_id: &str) -> Result<ImportRecord, AppError> {
        let id = Uuid::parse_str(record_id)
            .ok()
            .filter(|id| id.to_string() == record_id)
            .ok_or_else(|| AppError::NotFound("not found".to_string()))?;

        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("not found".to_string()))
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}
