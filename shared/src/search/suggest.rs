//! Tag suggestion engine
//!
//! One engine, two policies. The form-entry surface completes the tag being
//! typed (prefix of the last token, `#` required). The search bar matches the
//! whole raw query anywhere inside a tag. The two are never mixed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::tag_index::TagIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Candidate starts with the active (last) token and is not equal to it
    PrefixOfLastToken,
    /// Candidate contains the raw query
    SubstringAnywhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestConfig {
    pub policy: MatchPolicy,
    /// Minimum length (chars) of the matched input before anything is suggested
    pub min_len: usize,
    /// Maximum number of suggestions, `None` for uncapped
    pub limit: Option<usize>,
}

impl SuggestConfig {
    pub const FORM_ENTRY: Self = Self {
        policy: MatchPolicy::PrefixOfLastToken,
        min_len: 2,
        limit: Some(5),
    };

    pub const SEARCH_BAR: Self = Self {
        policy: MatchPolicy::SubstringAnywhere,
        min_len: 4,
        limit: None,
    };
}

/// Input surface a suggestion request comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    #[default]
    Form,
    Search,
}

/// The token being typed: the last whitespace-separated token, or empty when
/// the text is empty or ends in whitespace.
pub fn active_token(text: &str) -> &str {
    if text.ends_with(char::is_whitespace) {
        return "";
    }
    text.split_whitespace().next_back().unwrap_or("")
}

/// Prefixes `#` when missing.
pub fn with_hash(tag: &str) -> String {
    if tag.starts_with('#') {
        tag.to_string()
    } else {
        format!("#{tag}")
    }
}

/// Suggestions for `text` against `index`. Empty when nothing should be shown,
/// including when no index has been loaded yet.
pub fn suggest(text: &str, index: Option<&TagIndex>, config: &SuggestConfig) -> Vec<String> {
    let Some(index) = index else {
        return Vec::new();
    };

    let matched: Box<dyn Iterator<Item = String> + '_> = match config.policy {
        MatchPolicy::PrefixOfLastToken => {
            let token = active_token(text);
            if token.chars().count() < config.min_len || !token.starts_with('#') {
                return Vec::new();
            }
            let token = token.to_lowercase();
            Box::new(
                index
                    .iter()
                    .map(with_hash)
                    .filter(move |tag| tag.starts_with(&token) && *tag != token),
            )
        }
        MatchPolicy::SubstringAnywhere => {
            if text.chars().count() < config.min_len {
                return Vec::new();
            }
            let needle = text.to_lowercase();
            Box::new(
                index
                    .iter()
                    .filter(move |tag| tag.contains(&needle))
                    .map(with_hash),
            )
        }
    };

    let mut seen = HashSet::new();
    let deduped = matched.filter(|tag| seen.insert(tag.clone()));
    match config.limit {
        Some(limit) => deduped.take(limit).collect(),
        None => deduped.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(tags: &[&str]) -> TagIndex {
        TagIndex::from_tags(tags)
    }

    #[test]
    fn test_active_token() {
        assert_eq!(active_token("#cim #are"), "#are");
        assert_eq!(active_token("  #cim\t\t#are"), "#are");
        assert_eq!(active_token("#cim "), "");
        assert_eq!(active_token(""), "");
    }

    #[test]
    fn test_below_threshold_is_empty() {
        let idx = index(&["#cimento"]);
        assert!(suggest("#", Some(&idx), &SuggestConfig::FORM_ENTRY).is_empty());
        assert!(suggest("#ci", Some(&idx), &SuggestConfig::SEARCH_BAR).is_empty());
        assert!(suggest("cimento #", Some(&idx), &SuggestConfig::FORM_ENTRY).is_empty());
    }

    #[test]
    fn test_prefix_requires_hash() {
        let idx = index(&["#cimento"]);
        assert!(suggest("cim", Some(&idx), &SuggestConfig::FORM_ENTRY).is_empty());
        assert_eq!(
            suggest("cim", Some(&idx), &SuggestConfig::SEARCH_BAR),
            Vec::<String>::new()
        );
        assert_eq!(
            suggest("ciment", Some(&idx), &SuggestConfig::SEARCH_BAR),
            vec!["#cimento"]
        );
    }

    #[test]
    fn test_prefix_results_start_with_token_and_exclude_exact() {
        let idx = index(&["#cim", "#cimento", "#cimbrita", "#areia", "#acimentado"]);
        let results = suggest("#areia #CIM", Some(&idx), &SuggestConfig::FORM_ENTRY);
        assert_eq!(results, vec!["#cimbrita", "#cimento"]);
        for tag in &results {
            assert!(tag.starts_with('#'));
            assert!(tag.to_lowercase().starts_with("#cim"));
            assert_ne!(tag, "#cim");
        }
    }

    #[test]
    fn test_token_of_threshold_four_matches_both() {
        let idx = index(&["#cimento", "#cimbrita"]);
        let config = SuggestConfig {
            min_len: 4,
            ..SuggestConfig::FORM_ENTRY
        };
        let mut results = suggest("#cim", Some(&idx), &config);
        results.sort();
        assert_eq!(results, vec!["#cimbrita", "#cimento"]);

        let results = suggest("#cim", Some(&idx), &SuggestConfig::SEARCH_BAR);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_form_entry_is_capped() {
        let tags: Vec<String> = (0..8).map(|i| format!("#tijolo{i}")).collect();
        let idx = TagIndex::from_tags(&tags);
        assert_eq!(
            suggest("#tij", Some(&idx), &SuggestConfig::FORM_ENTRY).len(),
            5
        );
        assert_eq!(
            suggest("#tij", Some(&idx), &SuggestConfig::SEARCH_BAR).len(),
            8
        );
    }

    #[test]
    fn test_search_bar_matches_anywhere_and_normalizes_hash() {
        let idx = index(&["areia fina", "#areia", "#pedreira"]);
        let results = suggest("reia", Some(&idx), &SuggestConfig::SEARCH_BAR);
        assert_eq!(results, vec!["#areia", "#areia fina"]);

        // raw query is not trimmed
        assert!(suggest("eira ", Some(&idx), &SuggestConfig::SEARCH_BAR).is_empty());
    }

    #[test]
    fn test_hash_normalization_dedupes() {
        let idx = index(&["areia", "#areia"]);
        assert_eq!(
            suggest("areia", Some(&idx), &SuggestConfig::SEARCH_BAR),
            vec!["#areia"]
        );
    }

    #[test]
    fn test_index_not_loaded_is_empty() {
        assert!(suggest("#cimento", None, &SuggestConfig::FORM_ENTRY).is_empty());
        assert!(suggest("cimento", None, &SuggestConfig::SEARCH_BAR).is_empty());
    }

    #[test]
    fn test_surface_wire_name() {
        let s: Surface = serde_json::from_str("\"search\"").unwrap();
        assert_eq!(s, Surface::Search);
        assert_eq!(Surface::default(), Surface::Form);
    }
}
