//! Admin access checks.
//!
//! Two independent predicates decide whether a caller may use the admin
//! panel:
//!
//! - [`AccessControl::check_admin_access`] - the caller's email is in the
//!   admin email list (persisted list, or the configured defaults)
//! - [`has_admin_role`] - the caller's role is one of the privileged roles
//!
//! Callers OR the two together ([`AccessControl::is_admin`] does exactly
//! that). Neither predicate ever fails: absent input is a denial, and any
//! problem reading the persisted list falls back to the defaults.

use ufsbd_admin_core::{AdminEmailList, PrivilegedRole, UserIdentity, normalize_email};

use crate::config::AccessConfig;
use crate::store::KeyValueStore;

/// Why the configured defaults were used instead of the persisted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Nothing is stored under the list key.
    Absent,
    /// The stored value is not a JSON array of strings.
    Malformed(String),
    /// The store could not be read.
    Unavailable(String),
}

/// Where a resolved admin list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSource {
    /// Parsed from the persisted store.
    Stored,
    /// The configured default list.
    Defaults(FallbackReason),
}

impl ListSource {
    /// Returns `true` if the list came from the store.
    #[must_use]
    pub const fn is_stored(&self) -> bool {
        matches!(self, Self::Stored)
    }
}

/// An admin list together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAdminList {
    /// The effective list.
    pub emails: AdminEmailList,
    /// Where it came from.
    pub source: ListSource,
}

/// Admin access checks over an injected persisted store.
///
/// Holds no mutable state of its own: every check re-reads the store, so
/// changes made by the admin list management surface apply immediately.
#[derive(Debug)]
pub struct AccessControl<S> {
    store: S,
    config: AccessConfig,
}

impl<S: KeyValueStore> AccessControl<S> {
    /// Create access checks reading the admin list from `store`.
    pub const fn new(store: S, config: AccessConfig) -> Self {
        Self { store, config }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The access settings.
    pub const fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Returns `true` if `email` is in the effective admin list.
    ///
    /// Absent or blank input is denied without touching the store. Both the
    /// input and the list entries are trimmed and lower-cased before
    /// comparison.
    pub fn check_admin_access(&self, email: Option<&str>) -> bool {
        let Some(email) = email.map(normalize_email).filter(|e| !e.is_empty()) else {
            return false;
        };

        let resolved = self.resolve_admin_list();
        let allowed = resolved.emails.contains(&email);
        tracing::debug!(
            email = %email,
            allowed,
            from_store = resolved.source.is_stored(),
            "Checked admin email"
        );
        allowed
    }

    /// Returns `true` if the role is privileged. See [`has_admin_role`].
    pub fn has_admin_role(&self, role: Option<&str>) -> bool {
        has_admin_role(role)
    }

    /// Returns `true` if either the email or the role grants admin access.
    pub fn is_admin(&self, identity: &UserIdentity) -> bool {
        has_admin_role(identity.role()) || self.check_admin_access(identity.email())
    }

    /// Read the effective admin list.
    ///
    /// Never fails: an absent, unreadable, or malformed stored value yields
    /// the configured defaults, and the reason is logged.
    pub fn resolve_admin_list(&self) -> ResolvedAdminList {
        let key = self.config.store_key.as_str();
        match self.store.get(key) {
            Ok(raw) => self.resolve_stored_value(raw.as_deref()),
            Err(e) => {
                tracing::warn!(key, error = %e, "Admin list store unavailable, using defaults");
                self.defaults(FallbackReason::Unavailable(e.to_string()))
            }
        }
    }

    /// Interpret a raw stored value the same way the checks do.
    pub(crate) fn resolve_stored_value(&self, raw: Option<&str>) -> ResolvedAdminList {
        let key = self.config.store_key.as_str();
        let Some(raw) = raw else {
            tracing::debug!(key, "No stored admin list, using defaults");
            return self.defaults(FallbackReason::Absent);
        };

        match AdminEmailList::parse_json(raw) {
            Ok(emails) => ResolvedAdminList {
                emails,
                source: ListSource::Stored,
            },
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored admin list is malformed, using defaults");
                self.defaults(FallbackReason::Malformed(e.to_string()))
            }
        }
    }

    fn defaults(&self, reason: FallbackReason) -> ResolvedAdminList {
        ResolvedAdminList {
            emails: self.config.default_admin_emails.clone(),
            source: ListSource::Defaults(reason),
        }
    }
}

/// Returns `true` if `role` names a privileged role, in any casing.
///
/// Absent input is denied.
///
/// ```
/// use ufsbd_admin::access::has_admin_role;
///
/// assert!(has_admin_role(Some("Secretaire")));
/// assert!(!has_admin_role(Some("guest")));
/// assert!(!has_admin_role(None));
/// ```
#[must_use]
pub fn has_admin_role(role: Option<&str>) -> bool {
    role.and_then(PrivilegedRole::from_name).is_some()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError, WritableStore};

    const KEY: &str = "adminEmails";

    fn checks(store: MemoryStore) -> AccessControl<MemoryStore> {
        AccessControl::new(store, AccessConfig::default())
    }

    /// A store whose reads always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("backend down".to_string()))
        }
    }

    #[test]
    fn test_absent_or_empty_email_is_denied() {
        let access = checks(MemoryStore::new());
        assert!(!access.check_admin_access(None));
        assert!(!access.check_admin_access(Some("")));
        assert!(!access.check_admin_access(Some("   ")));
    }

    #[test]
    fn test_default_list_is_case_insensitive() {
        let access = checks(MemoryStore::new());
        assert!(access.check_admin_access(Some("admin@ufsbd34.fr")));
        assert!(access.check_admin_access(Some("ADMIN@UFSBD34.FR")));
        assert!(access.check_admin_access(Some(" Admin@Ufsbd34.fr ")));
    }

    #[test]
    fn test_unknown_email_is_denied() {
        let access = checks(MemoryStore::new());
        assert!(!access.check_admin_access(Some("nobody@example.com")));
    }

    #[test]
    fn test_stored_list_replaces_defaults() {
        let store = MemoryStore::with_value(KEY, r#"["secretaire@ufsbd34.fr"]"#);
        let access = checks(store);

        assert!(access.check_admin_access(Some("secretaire@ufsbd34.fr")));
        assert!(!access.check_admin_access(Some("admin@ufsbd34.fr")));
    }

    #[test]
    fn test_stored_entries_are_normalized() {
        let store = MemoryStore::with_value(KEY, r#"["  Tresorier@UFSBD34.FR"]"#);
        let access = checks(store);
        assert!(access.check_admin_access(Some("tresorier@ufsbd34.fr")));
    }

    #[test]
    fn test_malformed_store_value_falls_back_to_defaults() {
        for bad in ["not json", "{\"a\":1}", "[1,2,3]", "\"admin@ufsbd34.fr\""] {
            let access = checks(MemoryStore::with_value(KEY, bad));
            assert!(access.check_admin_access(Some("ADMIN@UFSBD34.FR")), "{bad}");
            assert!(!access.check_admin_access(Some("nobody@example.com")), "{bad}");

            let resolved = access.resolve_admin_list();
            assert!(matches!(
                resolved.source,
                ListSource::Defaults(FallbackReason::Malformed(_))
            ));
        }
    }

    #[test]
    fn test_unavailable_store_falls_back_to_defaults() {
        let access = AccessControl::new(BrokenStore, AccessConfig::default());
        assert!(access.check_admin_access(Some("admin@ufsbd34.fr")));

        let resolved = access.resolve_admin_list();
        assert!(matches!(
            resolved.source,
            ListSource::Defaults(FallbackReason::Unavailable(_))
        ));
    }

    #[test]
    fn test_absent_value_reports_absent() {
        let access = checks(MemoryStore::new());
        assert_eq!(
            access.resolve_admin_list().source,
            ListSource::Defaults(FallbackReason::Absent)
        );
    }

    #[test]
    fn test_stored_empty_array_denies_everyone() {
        let access = checks(MemoryStore::with_value(KEY, "[]"));
        assert!(!access.check_admin_access(Some("admin@ufsbd34.fr")));
        assert!(access.resolve_admin_list().source.is_stored());
    }

    #[test]
    fn test_custom_defaults_and_key() {
        let config = AccessConfig {
            default_admin_emails: AdminEmailList::from_entries(["President@UFSBD34.fr"]),
            store_key: "admins".to_string(),
        };
        // Value under the default key is ignored
        let store = MemoryStore::with_value(KEY, r#"["other@ufsbd34.fr"]"#);
        let access = AccessControl::new(store, config);

        assert!(access.check_admin_access(Some("president@ufsbd34.fr")));
        assert!(!access.check_admin_access(Some("other@ufsbd34.fr")));
    }

    #[test]
    fn test_roles() {
        for role in ["admin", "doctor", "president", "secretaire", "tresorier"] {
            assert!(has_admin_role(Some(role)), "{role}");
            assert!(has_admin_role(Some(&role.to_uppercase())), "{role}");
        }
        for role in ["guest", "user", ""] {
            assert!(!has_admin_role(Some(role)), "{role}");
        }
        assert!(!has_admin_role(None));
    }

    #[test]
    fn test_is_admin_ors_both_paths() {
        let access = checks(MemoryStore::new());

        let by_email = UserIdentity::new(Some("admin@ufsbd34.fr".to_string()), Some("guest".to_string()));
        let by_role = UserIdentity::new(Some("nobody@example.com".to_string()), Some("Doctor".to_string()));
        let neither = UserIdentity::new(Some("nobody@example.com".to_string()), Some("user".to_string()));

        assert!(access.is_admin(&by_email));
        assert!(access.is_admin(&by_role));
        assert!(!access.is_admin(&neither));
        assert!(!access.is_admin(&UserIdentity::default()));
    }

    #[test]
    fn test_checks_are_idempotent_and_read_only() {
        let store = MemoryStore::with_value(KEY, "garbage");
        let access = checks(store);

        let first = access.check_admin_access(Some("ADMIN@UFSBD34.FR"));
        for _ in 0..10 {
            assert_eq!(access.check_admin_access(Some("ADMIN@UFSBD34.FR")), first);
            assert!(access.has_admin_role(Some("admin")));
        }

        // The malformed value is left untouched
        assert_eq!(access.store().get(KEY).unwrap().as_deref(), Some("garbage"));
    }

    #[test]
    fn test_store_changes_apply_immediately() {
        let access = checks(MemoryStore::new());
        assert!(!access.check_admin_access(Some("doctor@ufsbd34.fr")));

        access
            .store()
            .set(KEY, r#"["doctor@ufsbd34.fr"]"#)
            .unwrap();
        assert!(access.check_admin_access(Some("doctor@ufsbd34.fr")));
    }
}
