//! API route configuration for link endpoints.

use crate::api::handlers::{
    link_events_handler, list_links_handler, resolve_link_handler, resolve_query_handler,
    shorten_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Link creation, resolution and listing routes.
///
/// # Endpoints
///
/// - `POST /links`          - Shorten a URL
/// - `GET  /links`          - List all links, least recently updated first
/// - `GET  /links/events`   - One-shot change notification stream (SSE)
/// - `GET  /links/{token}`  - Resolve a token, counting one use
/// - `GET  /resolve`        - Resolve `?token=`, counting one use
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(shorten_handler))
        .route("/links/events", get(link_events_handler))
        .route("/links/{token}", get(resolve_link_handler))
        .route("/resolve", get(resolve_query_handler))
}
