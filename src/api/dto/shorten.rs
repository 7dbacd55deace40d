//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::ShortenOutcome;

/// Request to shorten a single URL.
///
/// Content checks (scheme, host, disallowed patterns) run in the service;
/// only size bounds are enforced here.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(length(max = 8192, message = "URL is too long"))]
    pub long_url: String,

    /// Optional caller-chosen token; blank means none.
    #[validate(length(max = 128, message = "Custom token is too long"))]
    pub custom_token: Option<String>,
}

/// Whether the shorten call stored a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortenStatus {
    Created,
    AlreadyExists,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub token: String,
    pub long_url: String,
    pub status: ShortenStatus,
}

impl From<ShortenOutcome> for ShortenResponse {
    fn from(outcome: ShortenOutcome) -> Self {
        let status = if outcome.is_created() {
            ShortenStatus::Created
        } else {
            ShortenStatus::AlreadyExists
        };
        let link = outcome.into_link();

        Self {
            token: link.token,
            long_url: link.long_url,
            status,
        }
    }
}
