use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use intake_core::models::{IdempotencyKey, ImportRecord};
use intake_core::AppError;
use uuid::Uuid;

use super::store::{ensure_record_matches_key, ImportStore};

#[derive(Default)]
struct Records {
    by_id: HashMap<Uuid, ImportRecord>,
    by_key: HashMap<IdempotencyKey, Uuid>,
}

/// Process-local import store.
///
/// Both indexes sit behind one lock, so insert-if-absent is atomic within a
/// single process. It offers no guarantee across processes and is refused as
/// a backend in production.
#[derive(Clone, Default)]
pub struct InMemoryImportStore {
    records: Arc<Mutex<Records>>,
}

impl InMemoryImportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().map(|r| r.by_id.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, AppError> {
        self.records
            .lock()
            .map_err(|_| AppError::Internal("in-memory import store lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl ImportStore for InMemoryImportStore {
    async fn create_if_absent(
        &self,
        key: &IdempotencyKey,
        record: &ImportRecord,
    ) -> Result<bool, AppError> {
        ensure_record_matches_key(key, record)?;

        let mut records = self.lock()?;
        if records.by_key.contains_key(key) {
            return Ok(false);
        }
        records.by_key.insert(key.clone(), record.id);
        records.by_id.insert(record.id, record.clone());
        Ok(true)
    }

    async fn find_by_key(&self, key: &IdempotencyKey) -> Result<Option<ImportRecord>, AppError> {
        let records = self.lock()?;
        Ok(records
            .by_key
            .get(key)
            .and_then(|id| records.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ImportRecord>, AppError> {
        Ok(self.lock()?.by_id.get(&id).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(drop)
    }
}
