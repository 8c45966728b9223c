//! Output formatting utilities for the pf CLI.
//!
//! - [`posts`] - Filtered post output (search, browse)
//! - [`tags`] - Tag universe output
//! - [`helpers`] - Common formatting utilities (truncation, tag lists)

pub mod helpers;
mod posts;
mod tags;

pub use posts::{format_posts_json, format_posts_table, SearchSummary};
pub use tags::{format_tags_json, format_tags_table, TagCount};
