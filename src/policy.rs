//! Compression policy
//!
//! A [`PolicySet`] lists the source-relative paths that are gzip-compressed
//! instead of copied. Lookups are exact and case-sensitive; entries keep the
//! order they were configured in so reports are stable.

use std::collections::HashSet;

/// Relative paths discovered during one run
pub type FoundSet = HashSet<String>;

/// Ordered, duplicate-free set of relative paths to compress
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicySet {
    entries: Vec<String>,
    index: HashSet<String>,
}

impl PolicySet {
    /// Create an empty policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a policy from entries, dropping duplicates
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut policy = Self::new();
        for entry in entries {
            policy.insert(entry);
        }
        policy
    }

    /// Add an entry. Returns `false` if it was already present.
    pub fn insert(&mut self, entry: impl Into<String>) -> bool {
        let entry = entry.into();
        if self.index.contains(&entry) {
            return false;
        }
        self.index.insert(entry.clone());
        self.entries.push(entry);
        true
    }

    /// Whether `rel` is configured for compression
    pub fn contains(&self, rel: &str) -> bool {
        self.index.contains(rel)
    }

    /// Entries in configured order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries never seen in `found`, in configured order
    pub fn missing(&self, found: &FoundSet) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| !found.contains(entry.as_str()))
            .cloned()
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PolicySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}
