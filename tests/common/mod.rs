#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use named_links::infrastructure::persistence::JsonEntryRepository;
use named_links::routes::app_router;
use named_links::state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

pub fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("db.json")
}

pub async fn open_repository(dir: &TempDir) -> Arc<JsonEntryRepository> {
    Arc::new(
        JsonEntryRepository::open(store_path(dir), LOCK_TIMEOUT)
            .await
            .unwrap(),
    )
}

pub async fn create_test_state(dir: &TempDir) -> (AppState, Arc<JsonEntryRepository>) {
    let repository = open_repository(dir).await;
    (AppState::new(repository.clone()), repository)
}

/// Full application router with its middleware, as served in production.
pub async fn create_test_server(dir: &TempDir) -> (TestServer, Arc<JsonEntryRepository>) {
    let (state, repository) = create_test_state(dir).await;
    let app = Router::new().fallback_service(app_router(state));
    (TestServer::new(app).unwrap(), repository)
}

pub fn write_raw_store(dir: &TempDir, contents: &str) {
    std::fs::write(store_path(dir), contents).unwrap();
}
