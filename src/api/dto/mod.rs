//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization with camelCase
//! field names, and validator for request bounds.

pub mod health;
pub mod link;
pub mod shorten;
