//! Business logic services for admin.
//!
//! # Services
//!
//! - `admin_emails` - Editing the persisted admin email list

pub mod admin_emails;

pub use admin_emails::{AdminEmailRegistry, RegistryError};
