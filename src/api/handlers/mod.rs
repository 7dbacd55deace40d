//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod events;
pub mod health;
pub mod links;
pub mod redirect;
pub mod shorten;

pub use events::link_events_handler;
pub use health::health_handler;
pub use links::{list_links_handler, resolve_link_handler, resolve_query_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
