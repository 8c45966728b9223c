//! Predicate evaluation against posts.
//!
//! A post passes when both the text predicate and the tag predicate hold:
//!
//! - **Text**: the trimmed search term is a case-insensitive substring of the
//!   title, description, or body. An empty or whitespace-only term matches
//!   every post.
//! - **Tags**: no tags are selected, or the post shares at least one tag with
//!   the selection (OR semantics).
//!
//! # Example
//!
//! ```
//! use post_filter_rs::Post;
//! use post_filter_rs::filter::{FilterState, PostFilter};
//!
//! let posts = vec![
//!     Post::new("Go Basics").with_tags(["go", "backend"]),
//!     Post::new("Rust Guide").with_tags(["rust", "systems"]),
//! ];
//!
//! let state = FilterState::new().with_search_term("guide");
//! let filter = PostFilter::new(&state);
//! let results = filter.filter_posts(&posts);
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].title, "Rust Guide");
//! ```

use std::collections::HashSet;

use super::state::FilterState;
use crate::model::Post;

/// Evaluates a filter state against posts.
///
/// The search term is trimmed and lowercased once on construction, so the
/// per-post cost is only the lowercasing of the post's own text fields.
#[derive(Debug)]
pub struct PostFilter<'a> {
    needle: Option<String>,
    selected_tags: &'a HashSet<String>,
}

impl<'a> PostFilter<'a> {
    /// Creates an evaluator for the given state.
    pub fn new(state: &'a FilterState) -> Self {
        Self::from_parts(state.search_term(), state.selected_tags())
    }

    /// Creates an evaluator from a raw search term and tag selection.
    pub fn from_parts(search_term: &str, selected_tags: &'a HashSet<String>) -> Self {
        let trimmed = search_term.trim();
        let needle = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
        Self {
            needle,
            selected_tags,
        }
    }

    /// Returns true if the post satisfies both predicates.
    pub fn matches(&self, post: &Post) -> bool {
        self.matches_text(post) && self.matches_tags(post)
    }

    /// Returns true if the post satisfies the text predicate.
    pub fn matches_text(&self, post: &Post) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };

        [&post.title, &post.description, &post.body]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }

    /// Returns true if the post satisfies the tag predicate.
    pub fn matches_tags(&self, post: &Post) -> bool {
        self.selected_tags.is_empty() || post.tags.iter().any(|t| self.selected_tags.contains(t))
    }

    /// Filters a slice of posts, returning the matches in input order.
    pub fn filter_posts<'b>(&self, posts: &'b [Post]) -> Vec<&'b Post> {
        posts.iter().filter(|post| self.matches(post)).collect()
    }
}

/// Text predicate on its own.
pub fn matches_text(search_term: &str, post: &Post) -> bool {
    let empty = HashSet::new();
    PostFilter::from_parts(search_term, &empty).matches_text(post)
}

/// Tag predicate on its own.
pub fn matches_tags(selected_tags: &HashSet<String>, post: &Post) -> bool {
    PostFilter::from_parts("", selected_tags).matches_tags(post)
}

/// Filters posts by search term and tag selection, preserving input order.
///
/// This never mutates `posts`; the result borrows from it.
pub fn filter_posts<'b>(
    posts: &'b [Post],
    search_term: &str,
    selected_tags: &HashSet<String>,
) -> Vec<&'b Post> {
    PostFilter::from_parts(search_term, selected_tags).filter_posts(posts)
}
