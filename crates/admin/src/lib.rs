//! UFSBD 34 Admin library.
//!
//! Access control for the blog admin panel: an admin email allow-list read
//! from a persisted store with configured fallbacks, a fixed set of
//! privileged roles, and the HTTP guard and management endpoints built on
//! top of them.
//!
//! # Modules
//!
//! - [`access`] - The two access predicates and list resolution
//! - [`store`] - Persisted key-value store contract and backends
//! - [`services`] - Admin list management
//! - [`middleware`] - Identity extraction and the admin guard
//! - [`routes`] - HTTP handlers and router assembly
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use access::{AccessControl, has_admin_role};
pub use config::{AccessConfig, AdminConfig};
pub use state::AppState;
