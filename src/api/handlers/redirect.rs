//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short token to its original URL.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// Counts one use, like `GET /links/{token}`, and returns
/// 307 Temporary Redirect. The `Location` header carries the URL in its
/// percent-encoded ASCII form.
///
/// # Errors
///
/// Returns 404 Not Found if the token doesn't exist.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.redirect_service.resolve(Some(&token)).await?;

    let location = Url::parse(&link.long_url)
        .map_err(|e| AppError::Internal(format!("stored URL does not parse: {e}")))?;

    Ok(Redirect::temporary(location.as_str()))
}
