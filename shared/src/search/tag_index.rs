//! Distinct known tags of a supplier collection snapshot

use std::collections::BTreeSet;

use crate::models::Supplier;

/// Set of distinct lowercased tags.
///
/// Built once per collection load and never patched afterwards; edits made
/// after the build show up only after the next full load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    tags: BTreeSet<String>,
}

impl TagIndex {
    pub fn build<'a>(suppliers: impl IntoIterator<Item = &'a Supplier>) -> Self {
        Self::from_tags(
            suppliers
                .into_iter()
                .flat_map(|s| s.tags.iter().map(String::as_str)),
        )
    }

    pub fn from_tags<S: AsRef<str>>(tags: impl IntoIterator<Item = S>) -> Self {
        let tags = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { tags }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}
