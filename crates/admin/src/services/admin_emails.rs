//! Admin email list management.
//!
//! The write side of the admin list: adding, removing and resetting the
//! persisted entries. Edits interpret the stored value exactly as the checks
//! do, so management always starts from the same effective list. Each edit is
//! one atomic store update, so concurrent edits through one store never drop
//! each other's changes.

use thiserror::Error;
use ufsbd_admin_core::{AdminEmailList, Email, EmailError, normalize_email};

use crate::access::{AccessControl, FallbackReason, ListSource, ResolvedAdminList};
use crate::store::{StoreError, WritableStore};

/// Errors that can occur while editing the admin list.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The email to add is not a valid address, or the entry to remove is
    /// blank.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The store rejected the write.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Edits the persisted admin list behind an [`AccessControl`].
pub struct AdminEmailRegistry<'a, S> {
    access: &'a AccessControl<S>,
}

impl<'a, S: WritableStore> AdminEmailRegistry<'a, S> {
    /// Create a registry editing the list `access` reads.
    #[must_use]
    pub const fn new(access: &'a AccessControl<S>) -> Self {
        Self { access }
    }

    /// The effective admin list and where it came from.
    #[must_use]
    pub fn list(&self) -> ResolvedAdminList {
        self.access.resolve_admin_list()
    }

    /// Add an email to the list.
    ///
    /// The first edit on top of the defaults persists the defaults plus the
    /// new entry. Returns `true` if the email was not already present.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidEmail` if `email` does not parse, or
    /// `RegistryError::Store` if the list cannot be written.
    pub fn add(&self, email: &str) -> Result<bool, RegistryError> {
        let email = Email::parse(email)?;
        let added = self.edit(|emails| emails.insert(&email))?;

        if added {
            tracing::info!(email = %email, "Added admin email");
        } else {
            tracing::debug!(email = %email, "Admin email already listed");
        }
        Ok(added)
    }

    /// Remove an entry from the list.
    ///
    /// The entry is normalized but not validated, so entries that are not
    /// well-formed emails can be removed too. Returns `true` if the entry
    /// was present.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidEmail` if `email` is blank, or
    /// `RegistryError::Store` if the list cannot be written.
    pub fn remove(&self, email: &str) -> Result<bool, RegistryError> {
        let entry = normalize_email(email);
        if entry.is_empty() {
            return Err(EmailError::Empty.into());
        }
        let removed = self.edit(|emails| emails.remove(&entry))?;

        if removed {
            tracing::info!(email = %entry, "Removed admin email");
        } else {
            tracing::debug!(email = %entry, "Admin email not listed");
        }
        Ok(removed)
    }

    /// Delete the persisted list so the configured defaults apply again.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Store` if the key cannot be removed.
    pub fn reset(&self) -> Result<(), RegistryError> {
        self.access
            .store()
            .remove(&self.access.config().store_key)?;
        tracing::info!("Reset admin email list to defaults");
        Ok(())
    }

    /// Apply `change` to the effective list in one store update, and persist
    /// the result if `change` reports a change.
    fn edit(
        &self,
        mut change: impl FnMut(&mut AdminEmailList) -> bool,
    ) -> Result<bool, StoreError> {
        let mut changed = false;
        self.access
            .store()
            .update(&self.access.config().store_key, &mut |raw| {
                let resolved = self.access.resolve_stored_value(raw);
                if let ListSource::Defaults(FallbackReason::Malformed(_)) = &resolved.source {
                    tracing::warn!("Overwriting malformed stored admin list");
                }
                let mut emails = resolved.emails;
                changed = change(&mut emails);
                changed.then(|| emails.to_json())
            })?;
        Ok(changed)
    }
}
