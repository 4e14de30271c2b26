//! Access check commands.
//!
//! Runs the same predicates the admin service uses, against the local store.
//!
//! ```bash
//! ufsbd-cli check email ADMIN@UFSBD34.FR
//! ufsbd-cli check role Secretaire
//! ```

use ufsbd_admin::access::{AccessControl, has_admin_role};
use ufsbd_admin::store::KeyValueStore;

/// Check an email against the admin list and log the result.
pub fn email<S: KeyValueStore>(access: &AccessControl<S>, email: &str) -> bool {
    let allowed = access.check_admin_access(Some(email));
    if allowed {
        tracing::info!("{email}: admin");
    } else {
        tracing::info!("{email}: not an admin");
    }
    allowed
}

/// Check a role against the privileged roles and log the result.
pub fn role(role: &str) -> bool {
    let allowed = has_admin_role(Some(role));
    if allowed {
        tracing::info!("{role}: privileged role");
    } else {
        tracing::info!("{role}: not a privileged role");
    }
    allowed
}

#[cfg(test)]
mod tests {
    use ufsbd_admin::config::AccessConfig;
    use ufsbd_admin::store::MemoryStore;

    use super::*;

    #[test]
    fn test_email() {
        let access = AccessControl::new(MemoryStore::new(), AccessConfig::default());
        assert!(email(&access, "ADMIN@UFSBD34.FR"));
        assert!(!email(&access, "nobody@example.com"));
    }

    #[test]
    fn test_role() {
        assert!(role("Tresorier"));
        assert!(!role("guest"));
    }
}
