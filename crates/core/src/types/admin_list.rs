//! The admin email allow-list.

use serde::{Deserialize, Serialize};

use super::email::{Email, normalize_email};

/// Ordered, de-duplicated list of normalized admin email addresses.
///
/// Entries are normalized with [`normalize_email`] on the way in, whether
/// they come from configuration, from the persisted store, or from
/// [`AdminEmailList::insert`]. Blank entries are dropped. Insertion order is
/// preserved so the persisted JSON stays stable across edits.
///
/// The serialized form is a plain JSON array of strings.
///
/// ```
/// use ufsbd_admin_core::AdminEmailList;
///
/// let list = AdminEmailList::parse_json(r#"["Admin@UFSBD34.fr", "admin@ufsbd34.fr"]"#).unwrap();
/// assert_eq!(list.len(), 1);
/// assert!(list.contains("ADMIN@ufsbd34.FR"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AdminEmailList(Vec<String>);

impl AdminEmailList {
    /// Build a list from raw entries, normalizing and de-duplicating them.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for entry in entries {
            list.push_normalized(normalize_email(entry.as_ref()));
        }
        list
    }

    /// Parse a list from its persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a JSON array of strings.
    pub fn parse_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Serialize the list to its persisted JSON form.
    #[must_use]
    pub fn to_json(&self) -> String {
        // Vec<String> serialization cannot fail.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_owned())
    }

    /// Returns `true` if `email`, once normalized, is in the list.
    ///
    /// Blank input never matches.
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        let needle = normalize_email(email);
        !needle.is_empty() && self.0.iter().any(|entry| *entry == needle)
    }

    /// Append an email if it is not already present.
    ///
    /// Returns `true` if the list changed.
    pub fn insert(&mut self, email: &Email) -> bool {
        self.push_normalized(email.as_str().to_owned())
    }

    /// Remove an entry if present, after normalizing it.
    ///
    /// The entry does not have to be a valid email, so entries written by
    /// other tools can still be removed. Returns `true` if the list changed.
    pub fn remove(&mut self, entry: &str) -> bool {
        let needle = normalize_email(entry);
        let before = self.0.len();
        self.0.retain(|existing| *existing != needle);
        self.0.len() != before
    }

    /// Iterate over the normalized entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push_normalized(&mut self, entry: String) -> bool {
        if entry.is_empty() || self.0.contains(&entry) {
            return false;
        }
        self.0.push(entry);
        true
    }
}

impl From<Vec<String>> for AdminEmailList {
    fn from(entries: Vec<String>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<AdminEmailList> for Vec<String> {
    fn from(list: AdminEmailList) -> Self {
        list.0
    }
}
