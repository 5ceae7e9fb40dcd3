//! Record filter and name ordering

use std::borrow::Borrow;
use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::models::Supplier;

/// Case-insensitive substring match on name, company or any tag.
/// `needle` must already be lowercased.
pub fn matches(supplier: &Supplier, needle: &str) -> bool {
    supplier.name.to_lowercase().contains(needle)
        || supplier.company.to_lowercase().contains(needle)
        || supplier
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Records matching `query`; blank queries keep everything.
///
/// Only the blank check trims: `"areia "` still requires the trailing space.
pub fn filter<'a>(suppliers: &'a [Supplier], query: &str) -> Vec<&'a Supplier> {
    if query.trim().is_empty() {
        return suppliers.iter().collect();
    }
    let needle = query.to_lowercase();
    suppliers.iter().filter(|s| matches(s, &needle)).collect()
}

/// Accent-folded, lowercased key so "Álvaro" sorts with "alvaro".
pub fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Sorts by name ascending, locale-style.
pub fn sort_by_name<T: Borrow<Supplier>>(suppliers: &mut [T]) {
    suppliers.sort_by_cached_key(|s| {
        let name = &s.borrow().name;
        (collation_key(name), name.clone())
    });
}
