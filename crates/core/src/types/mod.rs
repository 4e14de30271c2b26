//! Core types for the UFSBD 34 admin panel.
//!
//! This module provides type-safe wrappers for the access-control domain.

pub mod admin_list;
pub mod email;
pub mod identity;
pub mod role;

pub use admin_list::AdminEmailList;
pub use email::{Email, EmailError, normalize_email};
pub use identity::UserIdentity;
pub use role::PrivilegedRole;
