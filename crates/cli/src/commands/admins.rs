//! Admin email list commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the effective list and where it comes from
//! ufsbd-cli admins list
//!
//! # Add or remove an admin email
//! ufsbd-cli admins add tresorier@ufsbd34.fr
//! ufsbd-cli admins remove tresorier@ufsbd34.fr
//!
//! # Drop the stored list so the defaults apply again
//! ufsbd-cli admins reset
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_STORE_PATH` - JSON store file (default: data/admin-store.json)
//! - `ADMIN_STORE_KEY` - Key holding the admin list (default: adminEmails)
//! - `ADMIN_DEFAULT_EMAILS` - Comma separated fallback admin list

use thiserror::Error;
use ufsbd_admin::access::{AccessControl, FallbackReason, ListSource};
use ufsbd_admin::config::ConfigError;
use ufsbd_admin::services::{AdminEmailRegistry, RegistryError};
use ufsbd_admin::store::FileStore;

/// Errors that can occur during admin list operations.
#[derive(Debug, Error)]
pub enum AdminsError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The list could not be edited.
    #[error("{0}")]
    Registry(#[from] RegistryError),
}

/// Open the file store named by the environment.
///
/// # Errors
///
/// Returns `AdminsError::Config` if the environment is invalid.
pub fn open_from_env() -> Result<AccessControl<FileStore>, AdminsError> {
    let (path, access) = ufsbd_admin::config::store_settings_from_env()?;
    tracing::debug!(path = %path.display(), "Opening admin list store");
    Ok(AccessControl::new(FileStore::new(path), access))
}

/// Log the effective admin list.
///
/// Returns the listed emails.
pub fn list(access: &AccessControl<FileStore>) -> Vec<String> {
    let resolved = AdminEmailRegistry::new(access).list();

    match &resolved.source {
        ListSource::Stored => {
            tracing::info!("Admin list (stored in {}):", access.store().path().display());
        }
        ListSource::Defaults(FallbackReason::Absent) => {
            tracing::info!("Admin list (defaults, nothing stored):");
        }
        ListSource::Defaults(FallbackReason::Malformed(e)) => {
            tracing::warn!("Stored admin list is malformed ({e}), showing defaults:");
        }
        ListSource::Defaults(FallbackReason::Unavailable(e)) => {
            tracing::warn!("Admin list store unavailable ({e}), showing defaults:");
        }
    }

    let emails: Vec<String> = resolved.emails.into();
    if emails.is_empty() {
        tracing::info!("  (empty)");
    }
    for email in &emails {
        tracing::info!("  {email}");
    }
    emails
}

/// Add an admin email.
///
/// # Errors
///
/// Returns an error if the email is invalid or the store cannot be written.
pub fn add(access: &AccessControl<FileStore>, email: &str) -> Result<bool, AdminsError> {
    let added = AdminEmailRegistry::new(access).add(email)?;
    if added {
        tracing::info!("Added {email} to the admin list");
    } else {
        tracing::warn!("{email} is already an admin");
    }
    Ok(added)
}

/// Remove an admin email.
///
/// # Errors
///
/// Returns an error if the email is blank or the store cannot be written.
pub fn remove(access: &AccessControl<FileStore>, email: &str) -> Result<bool, AdminsError> {
    let removed = AdminEmailRegistry::new(access).remove(email)?;
    if removed {
        tracing::info!("Removed {email} from the admin list");
    } else {
        tracing::warn!("{email} is not in the admin list");
    }
    Ok(removed)
}

/// Drop the stored list.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn reset(access: &AccessControl<FileStore>) -> Result<(), AdminsError> {
    AdminEmailRegistry::new(access).reset()?;
    tracing::info!("Admin list reset, defaults apply");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ufsbd_admin::config::AccessConfig;

    use super::*;

    fn open(dir: &tempfile::TempDir) -> AccessControl<FileStore> {
        AccessControl::new(
            FileStore::new(dir.path().join("store.json")),
            AccessConfig::default(),
        )
    }

    #[test]
    fn test_add_list_remove_reset() {
        let dir = tempfile::tempdir().unwrap();
        let access = open(&dir);

        assert_eq!(list(&access), vec!["admin@ufsbd34.fr".to_string()]);

        assert!(add(&access, "Doctor@UFSBD34.fr").unwrap());
        assert!(!add(&access, "doctor@ufsbd34.fr").unwrap());
        assert_eq!(
            list(&access),
            vec!["admin@ufsbd34.fr".to_string(), "doctor@ufsbd34.fr".to_string()]
        );

        assert!(remove(&access, "admin@ufsbd34.fr").unwrap());
        assert_eq!(list(&access), vec!["doctor@ufsbd34.fr".to_string()]);

        reset(&access).unwrap();
        assert_eq!(list(&access), vec!["admin@ufsbd34.fr".to_string()]);
    }

    #[test]
    fn test_add_invalid_email() {
        let dir = tempfile::tempdir().unwrap();
        let access = open(&dir);
        assert!(matches!(
            add(&access, "nope"),
            Err(AdminsError::Registry(RegistryError::InvalidEmail(_)))
        ));
    }
}
