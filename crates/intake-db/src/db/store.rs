use intake_core::models::{IdempotencyKey, ImportRecord};
use intake_core::AppError;
use uuid::Uuid;

/// Persistence contract for import records.
///
/// Implementations must enforce uniqueness of `(submitter_id, fingerprint)`
/// themselves: [`create_if_absent`](ImportStore::create_if_absent) is the only
/// way a record comes into existence and must be a single atomic
/// insert-if-absent with respect to concurrent callers using the same key.
/// After it returns `false`, [`find_by_key`](ImportStore::find_by_key) must
/// observe the conflicting record.
#[async_trait::async_trait]
pub trait ImportStore: Send + Sync {
    /// Insert `record` under `key` unless a record with that key exists.
    ///
    /// Returns `true` when inserted, `false` when the key was already taken.
    /// Nothing is written on failure.
    async fn create_if_absent(
        &self,
        key: &IdempotencyKey,
        record: &ImportRecord,
    ) -> Result<bool, AppError>;

    async fn find_by_key(&self, key: &IdempotencyKey) -> Result<Option<ImportRecord>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ImportRecord>, AppError>;

    /// Non-mutating liveness probe of the underlying store.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Reject a record whose own key fields disagree with the key it is filed under.
pub(crate) fn ensure_record_matches_key(
    key: &IdempotencyKey,
    record: &ImportRecord,
) -> Result<(), AppError> {
    if record.submitter_id != key.submitter_id.as_str() || record.fingerprint != key.fingerprint {
        return Err(AppError::Internal(format!(
            "record {} does not match idempotency key {}",
            record.id, key
        )));
    }
    Ok(())
}
