use intake_core::models::{IdempotencyKey, ImportRecord};
use intake_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::store::{ensure_record_matches_key, ImportStore};

/// Import repository backed by the `imports` table.
///
/// Duplicate detection relies on the `UNIQUE (submitter_id, fingerprint)`
/// constraint; inserts use `ON CONFLICT DO NOTHING` so a losing writer sees
/// zero affected rows instead of an error.
#[derive(Clone)]
pub struct PostgresImportRepository {
    pool: PgPool,
}

impl PostgresImportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl ImportStore for PostgresImportRepository {
    #[tracing::instrument(skip(self, record), fields(
        db.system = "postgresql",
        db.table = "imports",
        db.operation = "insert",
        import_id = %record.id
    ))]
    async fn create_if_absent(
        &self,
        key: &IdempotencyKey,
        record: &ImportRecord,
    ) -> Result<bool, AppError> {
        ensure_record_matches_key(key, record)?;

        let result = sqlx::query(
            r#"
            INSERT INTO imports (
                id, submitter_id, fingerprint, filename, size, status, errors, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (submitter_id, fingerprint) DO NOTHING
            "#,
        )
        .bind(record.id)
        .bind(key.submitter_id.as_str())
        .bind(&key.fingerprint)
        .bind(&record.filename)
        .bind(record.size)
        .bind(record.status)
        .bind(&record.errors)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    #[tracing::instrument(skip(self), fields(db.system = "postgresql", db.table = "imports", db.operation = "select"))]
    async fn find_by_key(&self, key: &IdempotencyKey) -> Result<Option<ImportRecord>, AppError> {
        let record = sqlx::query_as::<Postgres, ImportRecord>(
            r#"
            SELECT id, filename, size, fingerprint, submitter_id, status, created_at, errors
            FROM imports
            WHERE submitter_id = $1 AND fingerprint = $2
            "#,
        )
        .bind(key.submitter_id.as_str())
        .bind(&key.fingerprint)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.system = "postgresql", db.table = "imports", db.operation = "select"))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ImportRecord>, AppError> {
        let record = sqlx::query_as::<Postgres, ImportRecord>(
            r#"
            SELECT id, filename, size, fingerprint, submitter_id, status, created_at, errors
            FROM imports
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
