//! Store selection and application state setup

use crate::state::AppState;
use anyhow::Result;
use intake_core::{Config, StoreBackend};
use intake_db::{ImportStore, InMemoryImportStore, PostgresImportRepository};
use intake_services::IntakeLedger;
use std::sync::Arc;

use super::database::setup_database;

/// Build the import store named by the configuration and wrap it in a ledger.
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let store: Arc<dyn ImportStore> = match config.store_backend() {
        StoreBackend::Postgres => {
            let pool = setup_database(config).await?;
            Arc::new(PostgresImportRepository::new(pool))
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory import store");
            Arc::new(InMemoryImportStore::new())
        }
    };

    let ledger = IntakeLedger::new(store).with_max_upload_bytes(config.max_upload_bytes());
    tracing::info!(
        max_upload_bytes = ledger.max_upload_bytes(),
        "Intake ledger initialized"
    );

    Ok(Arc::new(AppState::new(ledger, config.clone())))
}
