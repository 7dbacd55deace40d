//! Input validation and token generation helpers.
//!
//! - [`url_validator`] - Long URL sanitization and validation
//! - [`token_generator`] - Random token generation and custom token validation

pub mod token_generator;
pub mod url_validator;
