//! Caller identity as supplied by the authentication provider.

use serde::{Deserialize, Serialize};

/// The minimal identity the access checks look at.
///
/// Both fields are optional: a session may carry an email without a role,
/// a role without an email, or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Email address reported by the auth provider, unvalidated.
    pub email: Option<String>,
    /// Role string reported by the auth provider, unvalidated.
    pub role: Option<String>,
}

impl UserIdentity {
    /// Create an identity from optional email and role values.
    ///
    /// Blank strings are stored as `None`.
    #[must_use]
    pub fn new(email: Option<String>, role: Option<String>) -> Self {
        Self {
            email: email.filter(|s| !s.trim().is_empty()),
            role: role.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Returns `true` if neither an email nor a role is present.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.email.is_none() && self.role.is_none()
    }

    /// Email as a string slice, if present.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Role as a string slice, if present.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_become_none() {
        let identity = UserIdentity::new(Some("  ".to_owned()), Some(String::new()));
        assert!(identity.is_anonymous());
    }

    #[test]
    fn test_accessors() {
        let identity = UserIdentity::new(Some("a@b.c".to_owned()), None);
        assert_eq!(identity.email(), Some("a@b.c"));
        assert_eq!(identity.role(), None);
        assert!(!identity.is_anonymous());
    }
}
