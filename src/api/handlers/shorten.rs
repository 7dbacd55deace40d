//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "example.com/page",
///   "customToken": "promo"
/// }
/// ```
///
/// # Response
///
/// **201 Created** for a new record, **200 OK** if the URL was already shortened:
///
/// ```json
/// {
///   "token": "promo",
///   "longUrl": "http://example.com/page",
///   "status": "created"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for invalid URLs, disallowed tokens, or a taken
/// custom token. Returns 500 on store failures or token generation exhaustion.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let outcome = state
        .shorten_service
        .shorten(&payload.long_url, payload.custom_token.as_deref())
        .await?;

    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome.into())))
}
