//! Utility functions shared across layers.
//!
//! - [`key_generator`] - Short key derivation and validation
//! - [`url_validator`] - Original URL checks
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod key_generator;
pub mod url_validator;
