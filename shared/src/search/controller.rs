//! Suggestion list state machine
//!
//! Drives the dropdown under a tag-bearing field: highlight movement, commit,
//! pointer selection and the short grace period after focus loss during which
//! a click on the list still lands.

use std::time::{Duration, Instant};

use super::suggest::{MatchPolicy, SuggestConfig, active_token, suggest};
use super::tag_index::TagIndex;

/// Delay between focus loss and hiding the list
pub const BLUR_GRACE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
}

/// Keys the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
}

#[derive(Debug, Clone)]
pub struct SuggestionController {
    items: Vec<String>,
    highlighted: Option<usize>,
    visibility: Visibility,
    hide_at: Option<Instant>,
    grace: Duration,
}

impl Default for SuggestionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionController {
    pub fn new() -> Self {
        Self::with_grace(BLUR_GRACE)
    }

    pub fn with_grace(grace: Duration) -> Self {
        Self {
            items: Vec::new(),
            highlighted: None,
            visibility: Visibility::Hidden,
            hide_at: None,
            grace,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_shown(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted_item(&self) -> Option<&str> {
        self.highlighted
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    /// New engine output after a text change. Highlight is always reset.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.highlighted = None;
        self.visibility = if items.is_empty() {
            Visibility::Hidden
        } else {
            Visibility::Shown
        };
        self.items = items;
    }

    pub fn move_down(&mut self) {
        let n = self.items.len();
        if !self.is_shown() || n == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(h) => (h + 1) % n,
        });
    }

    /// From no highlight, Up wraps to the last item.
    pub fn move_up(&mut self) {
        let n = self.items.len();
        if !self.is_shown() || n == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            None => n - 1,
            Some(h) => (h + n - 1) % n,
        });
    }

    /// Keyboard commit. Needs a highlighted item; hides the list.
    pub fn commit(&mut self) -> Option<String> {
        if !self.is_shown() {
            return None;
        }
        let chosen = self.highlighted.and_then(|i| self.items.get(i).cloned())?;
        self.clear();
        Some(chosen)
    }

    /// Pointer pick. Honoured while shown, including inside the blur grace period.
    pub fn select(&mut self, index: usize) -> Option<String> {
        if !self.is_shown() {
            return None;
        }
        let chosen = self.items.get(index).cloned()?;
        self.clear();
        Some(chosen)
    }

    pub fn handle_key(&mut self, key: NavKey) -> Option<String> {
        match key {
            NavKey::Down => {
                self.move_down();
                None
            }
            NavKey::Up => {
                self.move_up();
                None
            }
            NavKey::Enter => self.commit(),
        }
    }

    /// Focus left the field; the list hides once the grace period elapses.
    pub fn blur(&mut self, now: Instant) {
        if self.is_shown() {
            self.hide_at = Some(now + self.grace);
        }
    }

    pub fn focus(&mut self) {
        self.hide_at = None;
    }

    /// Applies a pending hide whose deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.hide_at.is_some_and(|at| now >= at) {
            self.hide_at = None;
            self.visibility = Visibility::Hidden;
            self.highlighted = None;
        }
    }

    fn clear(&mut self) {
        self.items.clear();
        self.highlighted = None;
        self.visibility = Visibility::Hidden;
        self.hide_at = None;
    }
}

/// Replaces the active (last) token of `buffer` with `tag` and appends one space.
/// Text before the active token is kept as typed.
pub fn apply_suggestion(buffer: &str, tag: &str) -> String {
    let token = active_token(buffer);
    let keep = &buffer[..buffer.len() - token.len()];
    format!("{keep}{tag} ")
}

/// Buffer after picking `tag` on a surface using `policy`.
///
/// Form entry completes the last token; the search bar replaces the whole
/// query with the tag, with no trailing space so it still filters.
pub fn commit_suggestion(buffer: &str, tag: &str, policy: MatchPolicy) -> String {
    match policy {
        MatchPolicy::PrefixOfLastToken => apply_suggestion(buffer, tag),
        MatchPolicy::SubstringAnywhere => tag.to_string(),
    }
}

/// A tag-entry field: text buffer plus its suggestion list.
#[derive(Debug, Clone)]
pub struct TagInput {
    text: String,
    config: SuggestConfig,
    controller: SuggestionController,
    focused: bool,
}

impl TagInput {
    pub fn new(config: SuggestConfig) -> Self {
        Self {
            text: String::new(),
            config,
            controller: SuggestionController::new(),
            focused: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn controller(&self) -> &SuggestionController {
        &self.controller
    }

    pub fn set_text(&mut self, text: impl Into<String>, index: Option<&TagIndex>) {
        self.text = text.into();
        self.controller
            .set_items(suggest(&self.text, index, &self.config));
    }

    /// Returns true when the key committed a suggestion into the buffer.
    pub fn key(&mut self, key: NavKey) -> bool {
        match self.controller.handle_key(key) {
            Some(tag) => {
                self.accept(&tag);
                true
            }
            None => false,
        }
    }

    pub fn click(&mut self, index: usize) -> bool {
        match self.controller.select(index) {
            Some(tag) => {
                self.accept(&tag);
                true
            }
            None => false,
        }
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.controller.focus();
    }

    pub fn blur(&mut self, now: Instant) {
        self.focused = false;
        self.controller.blur(now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.controller.tick(now);
    }

    fn accept(&mut self, tag: &str) {
        self.text = commit_suggestion(&self.text, tag, self.config.policy);
        self.focused = true;
        self.controller.focus();
    }
}
