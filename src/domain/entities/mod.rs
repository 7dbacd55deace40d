//! Core domain entities.
//!
//! Entities are plain data structures. Creation input uses a separate struct:
//! [`NewLink`] carries only what the caller chooses, the store assigns the rest.

pub mod link;

pub use link::{Link, NewLink};
