//! UFSBD 34 Admin Core - Shared access-control types.
//!
//! This crate provides the types used across all admin components:
//! - `admin` - Access checks, persisted store, HTTP guard
//! - `cli` - Command-line tools for managing the admin list
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage backends,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Email, admin allow-list, privileged roles and caller identity

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
