//! HTTP middleware for request processing.
//!
//! Provides observability and background task settling middleware.

pub mod task_drain;
pub mod tracing;
