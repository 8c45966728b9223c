//! Search-term and tag filtering for post collections.
//!
//! This module holds the [`FilterState`] a UI layer mutates and the
//! [`PostFilter`] that evaluates it against posts. Both are pure: evaluating a
//! state never changes it, and filtering never changes the posts.
//!
//! # Example
//!
//! ```
//! use std::collections::HashSet;
//! use post_filter_rs::Post;
//! use post_filter_rs::filter::filter_posts;
//!
//! let posts = vec![
//!     Post::new("Go Basics").with_tags(["go", "backend"]),
//!     Post::new("Rust Guide").with_tags(["rust", "systems"]),
//! ];
//!
//! let selected: HashSet<String> = ["go".to_string()].into_iter().collect();
//! let results = filter_posts(&posts, "", &selected);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].title, "Go Basics");
//! ```

mod evaluator;
mod state;

pub use evaluator::{filter_posts, matches_tags, matches_text, PostFilter};
pub use state::FilterState;
