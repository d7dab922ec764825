//! Core domain entities.
//!
//! - [`UrlRecord`] - A persisted short key mapping
//! - [`NewUrlRecord`] - Input for inserting a record

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord};
