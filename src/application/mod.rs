//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! cache access, validation, and background tasks. Services consume repository
//! and cache traits and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short key creation, resolution and lazy expiry

pub mod services;
