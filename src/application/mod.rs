//! Application layer services implementing business logic.
//!
//! Services consume the [`LinkRepository`](crate::domain::repositories::LinkRepository)
//! trait and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Short link creation
//! - [`services::redirect_service::RedirectService`] - Token resolution and listing
//! - [`read_model::LinkListView`] - Most-recent-first listing kept by a caller

pub mod read_model;
pub mod services;
