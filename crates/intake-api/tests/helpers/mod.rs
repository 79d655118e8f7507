//! Test helpers: build the router over an in-process store.
//!
//! Run with: `cargo test -p intake-api`

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use intake_api::setup::routes::setup_routes;
use intake_api::state::AppState;
use intake_core::models::{IdempotencyKey, ImportRecord};
use intake_core::{AppError, Config};
use intake_db::{ImportStore, InMemoryImportStore};
use intake_services::IntakeLedger;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Upload limit used by most tests; small enough to exceed cheaply.
pub const TEST_MAX_UPLOAD_BYTES: usize = 1024;

pub struct TestApp {
    pub server: TestServer,
    pub store: InMemoryImportStore,
}

pub fn test_config(max_upload_bytes: usize) -> Config {
    let vars: HashMap<String, String> = [
        ("STORE_BACKEND", "memory".to_string()),
        ("MAX_UPLOAD_BYTES", max_upload_bytes.to_string()),
        ("ENVIRONMENT", "test".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    Config::from_vars(&vars).expect("Failed to build test config")
}

pub fn server_for(store: Arc<dyn ImportStore>, max_upload_bytes: usize) -> TestServer {
    let config = test_config(max_upload_bytes);
    let ledger = IntakeLedger::new(store).with_max_upload_bytes(config.max_upload_bytes());
    let state = Arc::new(AppState::new(ledger, config.clone()));
    let app = setup_routes(&config, state).expect("Failed to setup routes");
    TestServer::new(app).expect("Failed to create test server")
}

/// Setup test app backed by a fresh in-memory store.
pub fn setup_test_app() -> TestApp {
    let store = InMemoryImportStore::new();
    let server = server_for(Arc::new(store.clone()), TEST_MAX_UPLOAD_BYTES);
    TestApp { server, store }
}

pub fn file_form(filename: &str, content: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part("file", Part::bytes(content.to_vec()).file_name(filename))
}

/// Store that behaves as if the database were unreachable.
pub struct UnreachableStore;

fn unavailable() -> AppError {
    AppError::from(sqlx::Error::PoolTimedOut)
}

#[async_trait::async_trait]
impl ImportStore for UnreachableStore {
    async fn create_if_absent(
        &self,
        _key: &IdempotencyKey,
        _record: &ImportRecord,
    ) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn find_by_key(&self, _key: &IdempotencyKey) -> Result<Option<ImportRecord>, AppError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<ImportRecord>, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}
