//! Privileged role names.
//!
//! The role set is compiled in and immutable at run time. Role strings come
//! from the authentication provider and are matched case-insensitively.

use serde::{Deserialize, Serialize};

/// A role that grants access to the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivilegedRole {
    /// Site administrator.
    Admin,
    /// Practitioner member allowed to publish.
    Doctor,
    /// Association president.
    President,
    /// Association secretary.
    Secretaire,
    /// Association treasurer.
    Tresorier,
}

impl PrivilegedRole {
    /// Every privileged role, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Admin,
        Self::Doctor,
        Self::President,
        Self::Secretaire,
        Self::Tresorier,
    ];

    /// Returns the canonical lower-case name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::President => "president",
            Self::Secretaire => "secretaire",
            Self::Tresorier => "tresorier",
        }
    }

    /// Look up a role by name, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for unknown or empty names.
    ///
    /// ```
    /// use ufsbd_admin_core::PrivilegedRole;
    ///
    /// assert_eq!(PrivilegedRole::from_name(" Tresorier "), Some(PrivilegedRole::Tresorier));
    /// assert_eq!(PrivilegedRole::from_name("guest"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|role| role.as_str() == needle)
    }
}

impl std::fmt::Display for PrivilegedRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PrivilegedRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("invalid privileged role: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_any_casing() {
        for role in PrivilegedRole::ALL {
            let upper = role.as_str().to_uppercase();
            assert_eq!(PrivilegedRole::from_name(role.as_str()), Some(role));
            assert_eq!(PrivilegedRole::from_name(&upper), Some(role));
        }
        assert_eq!(
            PrivilegedRole::from_name("SecRetaire"),
            Some(PrivilegedRole::Secretaire)
        );
    }

    #[test]
    fn test_from_name_rejects_others() {
        assert_eq!(PrivilegedRole::from_name("guest"), None);
        assert_eq!(PrivilegedRole::from_name("user"), None);
        assert_eq!(PrivilegedRole::from_name(""), None);
        assert_eq!(PrivilegedRole::from_name("super_admin"), None);
    }

    #[test]
    fn test_display_and_from_str() {
        assert_eq!(PrivilegedRole::President.to_string(), "president");
        let role: PrivilegedRole = "DOCTOR".parse().unwrap();
        assert_eq!(role, PrivilegedRole::Doctor);
        assert!("viewer".parse::<PrivilegedRole>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PrivilegedRole::Tresorier).unwrap();
        assert_eq!(json, "\"tresorier\"");
    }
}
