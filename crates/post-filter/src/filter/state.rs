//! Filter state: the current search term and selected tags.

use std::collections::HashSet;

/// The inputs that drive filtering, apart from the posts themselves.
///
/// The selected tag set is only changed by toggling membership, so a UI layer
/// can map each tag button to a single [`toggle_tag`](Self::toggle_tag) call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search_term: String,
    selected_tags: HashSet<String>,
}

impl FilterState {
    /// Creates a state with an empty search term and no selected tags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this state with the given search term.
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Returns a copy of this state with the given tags selected.
    pub fn with_selected_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// The raw search term, exactly as entered.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The currently selected tags.
    pub fn selected_tags(&self) -> &HashSet<String> {
        &self.selected_tags
    }

    /// Returns true if the tag is currently selected.
    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected_tags.contains(tag)
    }

    /// Replaces the search term. Returns true if the value changed.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }
        self.search_term = term;
        true
    }

    /// Toggles a tag's membership in the selected set.
    ///
    /// An absent tag is added and a present tag is removed. Returns true if
    /// the tag is selected after the call.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.selected_tags.remove(tag) {
            false
        } else {
            self.selected_tags.insert(tag.to_string());
            true
        }
    }

    /// Deselects every tag. Returns true if anything was selected.
    pub fn clear_tags(&mut self) -> bool {
        let changed = !self.selected_tags.is_empty();
        self.selected_tags.clear();
        changed
    }

    /// Keeps only the selected tags for which `keep` returns true. Returns true
    /// if any tag was dropped.
    pub fn retain_tags(&mut self, mut keep: impl FnMut(&str) -> bool) -> bool {
        let before = self.selected_tags.len();
        self.selected_tags.retain(|tag| keep(tag));
        self.selected_tags.len() != before
    }

    /// Returns true if this state lets every post through.
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.trim().is_empty() && self.selected_tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_unfiltered() {
        let state = FilterState::new();
        assert_eq!(state.search_term(), "");
        assert!(state.selected_tags().is_empty());
        assert!(state.is_unfiltered());
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut state = FilterState::new();

        assert!(state.toggle_tag("go"));
        assert!(state.is_selected("go"));

        assert!(!state.toggle_tag("go"));
        assert!(!state.is_selected("go"));
        assert!(state.selected_tags().is_empty());
    }

    #[test]
    fn test_toggle_is_independent_per_tag() {
        let mut state = FilterState::new();
        state.toggle_tag("go");
        state.toggle_tag("rust");
        state.toggle_tag("go");

        assert!(!state.is_selected("go"));
        assert!(state.is_selected("rust"));
        assert_eq!(state.selected_tags().len(), 1);
    }

    #[test]
    fn test_set_search_term_reports_change() {
        let mut state = FilterState::new();
        assert!(state.set_search_term("rust"));
        assert!(!state.set_search_term("rust"));
        assert!(state.set_search_term("Rust"));
        assert_eq!(state.search_term(), "Rust");
    }

    #[test]
    fn test_retain_tags_drops_rejected() {
        let mut state = FilterState::new().with_selected_tags(["go", "rust"]);
        assert!(state.retain_tags(|t| t == "rust"));
        assert!(!state.is_selected("go"));
        assert!(state.is_selected("rust"));
        assert!(!state.retain_tags(|_| true));
    }

    #[test]
    fn test_clear_tags_reports_change() {
        let mut state = FilterState::new().with_selected_tags(["a", "b"]);
        assert!(state.clear_tags());
        assert!(!state.clear_tags());
        assert!(state.selected_tags().is_empty());
    }

    #[test]
    fn test_whitespace_term_is_unfiltered() {
        let state = FilterState::new().with_search_term("   ");
        assert!(state.is_unfiltered());
    }

    #[test]
    fn test_selected_tag_is_filtered() {
        let state = FilterState::new().with_selected_tags(["go"]);
        assert!(!state.is_unfiltered());
    }
}
