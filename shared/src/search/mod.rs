//! Tag-aware search core
//!
//! Pure functions and state machines shared by the search bar and the
//! registration form. Nothing in here performs I/O.
//!
//! ```
//! use shared::search::{SuggestConfig, TagIndex, apply_suggestion, suggest};
//!
//! let index = TagIndex::from_tags(["#areia", "#argila", "#cimento"]);
//! let found = suggest("#cimento #are", Some(&index), &SuggestConfig::FORM_ENTRY);
//! assert_eq!(found, vec!["#areia"]);
//! assert_eq!(apply_suggestion("#cimento #are", &found[0]), "#cimento #areia ");
//! ```

pub mod controller;
pub mod filter;
pub mod suggest;
pub mod tag_index;

pub use controller::{
    BLUR_GRACE, NavKey, SuggestionController, TagInput, Visibility, apply_suggestion,
    commit_suggestion,
};
pub use filter::{collation_key, compare_names, filter, matches, sort_by_name};
pub use suggest::{MatchPolicy, SuggestConfig, Surface, active_token, suggest, with_hash};
pub use tag_index::TagIndex;
