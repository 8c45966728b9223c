//! Search and tag filtering for post collections.
//!
//! Given a list of [`Post`]s, a free-text search term and a set of selected
//! tags, this crate computes the posts that match and keeps that result up to
//! date as the inputs change.
//!
//! - [`TagUniverse`] - the distinct tags across all posts
//! - [`filter`] - the text and tag predicates and the combined filter
//! - [`FilterEngine`] - owns the inputs and republishes results on change
//! - [`PostStore`] - loads post collections from JSON files
//!
//! # Example
//!
//! ```
//! use post_filter_rs::{FilterEngine, Post};
//!
//! let mut engine = FilterEngine::new(vec![
//!     Post::new("Go Basics").with_tags(["go", "backend"]),
//!     Post::new("Rust Guide").with_tags(["rust", "systems"]),
//! ]);
//!
//! engine.set_search_term("guide");
//! assert_eq!(engine.result().titles(), vec!["Rust Guide"]);
//!
//! engine.set_search_term("");
//! engine.toggle_tag("go");
//! assert_eq!(engine.result().titles(), vec!["Go Basics"]);
//! ```

pub mod engine;
pub mod filter;
pub mod model;
pub mod store;
pub mod tags;

pub use engine::{EngineUpdate, FilterEngine, FilteredResult, SubscriptionId};
pub use filter::{filter_posts, FilterState, PostFilter};
pub use model::{Post, PostCollection};
pub use store::{PostStore, PostStoreError};
pub use tags::TagUniverse;
