//! Infrastructure layer for external integrations.
//!
//! Implements the store gateway defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-process repository implementations

pub mod persistence;
