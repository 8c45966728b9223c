//! Tag universe extraction and tag validation.
//!
//! The tag universe is the set of distinct tags present across a post
//! collection. It backs tag pickers in UI layers and lets callers check that a
//! selected tag actually exists.

use std::collections::HashSet;

use crate::model::Post;

/// The distinct tags across a collection of posts.
///
/// Every tag that appears on any post is contained exactly once. Iteration
/// yields tags in first-appearance order, which gives UI layers a stable order
/// for free. Membership never depends on post order.
#[derive(Debug, Clone, Default)]
pub struct TagUniverse {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl TagUniverse {
    /// Creates an empty tag universe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the tag universe from a slice of posts.
    ///
    /// # Example
    ///
    /// ```
    /// use post_filter_rs::{Post, TagUniverse};
    ///
    /// let posts = vec![
    ///     Post::new("Go Basics").with_tags(["go", "backend"]),
    ///     Post::new("Rust Guide").with_tags(["rust", "backend"]),
    /// ];
    ///
    /// let universe = TagUniverse::from_posts(&posts);
    /// assert_eq!(universe.len(), 3);
    /// assert!(universe.contains("backend"));
    /// ```
    pub fn from_posts(posts: &[Post]) -> Self {
        let mut universe = Self::new();
        for tag in posts.iter().flat_map(|p| p.tags.iter()) {
            universe.insert(tag);
        }
        universe
    }

    fn insert(&mut self, tag: &str) {
        if !self.members.contains(tag) {
            self.members.insert(tag.to_string());
            self.ordered.push(tag.to_string());
        }
    }

    /// Returns true if the tag appears on at least one post.
    pub fn contains(&self, tag: &str) -> bool {
        self.members.contains(tag)
    }

    /// Returns the number of distinct tags.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns true if no post carries any tag.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Iterates over the tags in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    /// Returns the tags as a slice in first-appearance order.
    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }
}

impl PartialEq for TagUniverse {
    /// Two universes are equal when they hold the same tags, regardless of order.
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for TagUniverse {}

impl<'a> IntoIterator for &'a TagUniverse {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&String) -> &str>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter().map(String::as_str as fn(&String) -> &str)
    }
}

/// Returns the first tag that appears more than once on the post, if any.
pub fn find_duplicate_tag(post: &Post) -> Option<&str> {
    let mut seen = HashSet::new();
    post.tags
        .iter()
        .find(|tag| !seen.insert(tag.as_str()))
        .map(String::as_str)
}
