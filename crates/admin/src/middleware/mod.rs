//! HTTP middleware and extractors for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Route-level guards via the [`auth::RequireAdmin`] extractor

pub mod auth;

pub use auth::{CurrentIdentity, RequireAdmin};
