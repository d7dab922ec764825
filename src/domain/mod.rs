//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`task_coordinator`] - Fire-and-forget background task dispatch
//!
//! # Lifecycle
//!
//! 1. A shorten request persists a [`entities::UrlRecord`] through
//!    [`repositories::UrlRepository`]
//! 2. The cache is populated by a detached task on
//!    [`task_coordinator::TaskCoordinator`]
//! 3. A resolve that finds the record expired or missing schedules deletes
//!    from both the store and the cache on the same coordinator

pub mod entities;
pub mod repositories;
pub mod task_coordinator;
