//! DTOs for resolving and listing links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Full link record as exposed over HTTP.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDto {
    pub id: i64,
    pub long_url: String,
    pub token: String,
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkDto {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            long_url: link.long_url,
            token: link.token,
            usage_count: link.usage_count,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// All links, least recently updated first.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub items: Vec<LinkDto>,
}

/// Target of a resolved token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub long_url: String,
}

/// Query parameters for `GET /resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub token: Option<String>,
}
