//! Search command implementation.
//!
//! Filters posts once by search term and selected tags and prints the result.

use post_filter_rs::{FilterState, Post, PostFilter, TagUniverse};

use super::lookups::ensure_known_tag;
use super::{CommandContext, Result};
use crate::output::{format_posts_json, format_posts_table, SearchSummary};

/// Options for the search command.
#[derive(Debug, Default)]
pub struct SearchOptions {
    /// Text to search for.
    pub term: Option<String>,
    /// Selected tags (any one must match).
    pub tags: Vec<String>,
    /// Maximum number of posts to show.
    pub limit: Option<usize>,
}

/// Builds the filter state for the options, checking every tag exists.
///
/// Tags are toggled in the order given, so naming a tag twice deselects it
/// again, the same as clicking its button twice.
pub fn build_state(posts: &[Post], opts: &SearchOptions) -> Result<FilterState> {
    let universe = TagUniverse::from_posts(posts);
    let mut state = FilterState::new().with_search_term(opts.term.clone().unwrap_or_default());

    for tag in &opts.tags {
        ensure_known_tag(&universe, tag)?;
        state.toggle_tag(tag);
    }

    Ok(state)
}

/// Executes the search command.
///
/// # Errors
///
/// Returns an error if the posts cannot be loaded or a tag is unknown.
pub async fn execute(ctx: &CommandContext, opts: &SearchOptions) -> Result<()> {
    let posts = ctx.load_posts().await?;
    let state = build_state(&posts, opts)?;

    let matches = PostFilter::new(&state).filter_posts(&posts);
    let matched = matches.len();
    let shown: Vec<&Post> = match opts.limit {
        Some(limit) => matches.into_iter().take(limit).collect(),
        None => matches,
    };

    let mut selected_tags: Vec<&str> = state.selected_tags().iter().map(String::as_str).collect();
    selected_tags.sort_unstable();

    let summary = SearchSummary {
        search_term: Some(state.search_term()),
        selected_tags: Some(selected_tags),
        matched,
        total: posts.len(),
        revision: None,
    };

    if ctx.json_output {
        println!("{}", format_posts_json(&shown, &summary)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_posts_table(&shown, &summary, ctx.max_width, ctx.use_colors)
        );
    }

    Ok(())
}
