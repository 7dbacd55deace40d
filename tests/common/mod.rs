#![allow(dead_code)]

use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use link_shortener::application::services::TokenPolicy;
use link_shortener::domain::notifier::ChangeNotifier;
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use link_shortener::routes::router;
use link_shortener::state::AppState;

pub fn create_test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryLinkRepository::new()),
        ChangeNotifier::default(),
        TokenPolicy::default(),
    )
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    let repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    AppState::new(repository, ChangeNotifier::default(), TokenPolicy::default())
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// Creates a link through the HTTP API and returns its token.
pub async fn shorten(server: &TestServer, long_url: &str) -> String {
    let response = server
        .post("/links")
        .json(&serde_json::json!({ "longUrl": long_url }))
        .await;

    response.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}
