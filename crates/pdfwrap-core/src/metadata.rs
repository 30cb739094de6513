//! Document-level metadata.
//!
//! Provides [`Metadata`], an insertion-ordered key/value collection for the
//! PDF document information dictionary (Title, Author, ...). Keys must be
//! non-empty; values are free-form strings.

use crate::error::PdfError;

/// Insertion-ordered document information entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing an existing value in place.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidArgument`] if `key` is empty.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<&mut Self, PdfError> {
        check_key(key)?;
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
        Ok(self)
    }

    /// Look up the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidArgument`] if `key` is empty.
    pub fn get(&self, key: &str) -> Result<Option<&str>, PdfError> {
        check_key(key)?;
        Ok(self
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str()))
    }

    /// # Errors
    ///
    /// Returns [`PdfError::InvalidArgument`] if `key` is empty.
    pub fn has(&self, key: &str) -> Result<bool, PdfError> {
        Ok(self.get(key)?.is_some())
    }

    /// Remove `key`, returning its previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidArgument`] if `key` is empty.
    pub fn remove(&mut self, key: &str) -> Result<Option<String>, PdfError> {
        check_key(key)?;
        let position = self.entries.iter().position(|(k, _)| k == key);
        Ok(position.map(|i| self.entries.remove(i).1))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }
}

fn check_key(key: &str) -> Result<(), PdfError> {
    if key.is_empty() {
        return Err(PdfError::InvalidArgument(format!(
            "invalid metadata key \"{key}\""
        )));
    }
    Ok(())
}
