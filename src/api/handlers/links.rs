//! Handlers for resolving and listing links.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::link::{LinkDto, LinkListResponse, ResolveQuery, ResolveResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a token and counts one use.
///
/// # Endpoint
///
/// `GET /links/{token}`
///
/// # Errors
///
/// Returns 404 Not Found if no link uses the token.
pub async fn resolve_link_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolveResponse>, AppError> {
    let link = state.redirect_service.resolve(Some(&token)).await?;

    Ok(Json(ResolveResponse {
        long_url: link.long_url,
    }))
}

/// Resolves a token passed as a query parameter.
///
/// # Endpoint
///
/// `GET /resolve?token=abc123`
///
/// # Errors
///
/// Returns 400 Bad Request if `token` is missing or blank, 404 Not Found if
/// no link uses it.
pub async fn resolve_query_handler(
    Query(query): Query<ResolveQuery>,
    State(state): State<AppState>,
) -> Result<Json<ResolveResponse>, AppError> {
    let link = state
        .redirect_service
        .resolve(query.token.as_deref())
        .await?;

    Ok(Json(ResolveResponse {
        long_url: link.long_url,
    }))
}

/// Lists every link, least recently updated first.
///
/// # Endpoint
///
/// `GET /links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.redirect_service.list_all().await?;

    Ok(Json(LinkListResponse {
        items: links.into_iter().map(LinkDto::from).collect(),
    }))
}
