//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The input contains more than one @ symbol.
    #[error("email must contain exactly one @ symbol")]
    MultipleAtSymbols,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
}

/// Normalize an email-like string for comparison: trim surrounding
/// whitespace and lower-case it.
///
/// No validation is performed. Both the allow-list entries and the email
/// being checked go through this function before they are compared.
///
/// ```
/// use ufsbd_admin_core::normalize_email;
///
/// assert_eq!(normalize_email("  Admin@UFSBD34.fr "), "admin@ufsbd34.fr");
/// ```
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A validated, normalized email address.
///
/// Parsing trims surrounding whitespace and lower-cases the address, so two
/// `Email`s compare equal whenever the addresses differ only in case.
///
/// ## Constraints
///
/// - Length: 1-254 characters after trimming (RFC 5321 limit)
/// - Must contain exactly one @ symbol
/// - Local part (before @) must not be empty
/// - Domain part (after @) must not be empty
///
/// ## Examples
///
/// ```
/// use ufsbd_admin_core::Email;
///
/// let email = Email::parse("Secretaire@UFSBD34.fr").unwrap();
/// assert_eq!(email.as_str(), "secretaire@ufsbd34.fr");
///
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("no-at-symbol").is_err());
/// assert!(Email::parse("@domain.com").is_err());
/// assert!(Email::parse("user@").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse and normalize an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input:
    /// - Is empty
    /// - Is longer than 254 characters
    /// - Does not contain exactly one @ symbol
    /// - Has an empty local part or domain
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let normalized = normalize_email(s);

        if normalized.is_empty() {
            return Err(EmailError::Empty);
        }

        if normalized.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = normalized
            .split_once('@')
            .ok_or(EmailError::MissingAtSymbol)?;

        if domain.contains('@') {
            return Err(EmailError::MultipleAtSymbols);
        }
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(normalized))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the local part of the email (before the @).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("user@example.com").is_ok());
        assert!(Email::parse("user.name+tag@example.com").is_ok());
        assert!(Email::parse("tresorier@ufsbd34.fr").is_ok());
        assert!(Email::parse("a@b.c").is_ok());
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let email = Email::parse("  ADMIN@UFSBD34.FR\n").unwrap();
        assert_eq!(email.as_str(), "admin@ufsbd34.fr");
        assert_eq!(email, Email::parse("admin@ufsbd34.fr").unwrap());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_bad_at_symbols() {
        assert_eq!(
            Email::parse("no-at-symbol"),
            Err(EmailError::MissingAtSymbol)
        );
        assert_eq!(
            Email::parse("a@b@c.fr"),
            Err(EmailError::MultipleAtSymbols)
        );
        assert_eq!(Email::parse("@domain.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("user@"), Err(EmailError::EmptyDomain));
    }

    #[test]
    fn test_parts() {
        let email = Email::parse("President@UFSBD34.fr").unwrap();
        assert_eq!(email.local_part(), "president");
        assert_eq!(email.domain(), "ufsbd34.fr");
    }

    #[test]
    fn test_serde_normalizes_on_deserialize() {
        let parsed: Email = serde_json::from_str("\"Doctor@UFSBD34.fr\"").unwrap();
        assert_eq!(parsed.as_str(), "doctor@ufsbd34.fr");
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            "\"doctor@ufsbd34.fr\""
        );

        assert!(serde_json::from_str::<Email>("\"not-an-email\"").is_err());
    }

    #[test]
    fn test_normalize_email_does_not_validate() {
        assert_eq!(normalize_email(" Not An Email "), "not an email");
        assert_eq!(normalize_email(""), "");
    }
}
