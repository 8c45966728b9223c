//! Tags command implementation.
//!
//! Lists the tag universe of the post collection with per-tag post counts.

use post_filter_rs::{Post, TagUniverse};

use super::{CommandContext, Result};
use crate::output::{format_tags_json, format_tags_table, TagCount};

/// Options for the tags command.
#[derive(Debug, Default)]
pub struct TagsOptions {
    /// Sort by descending post count instead of first appearance.
    pub by_count: bool,
}

/// Counts the posts carrying each tag of the universe.
///
/// Tags keep first-appearance order unless `by_count` is set, in which case
/// they are sorted by descending count (ties keep first-appearance order).
pub fn count_tags<'a>(
    universe: &'a TagUniverse,
    posts: &[Post],
    by_count: bool,
) -> Vec<TagCount<'a>> {
    let mut counts: Vec<TagCount<'a>> = universe
        .iter()
        .map(|name| TagCount {
            name,
            count: posts.iter().filter(|p| p.has_tag(name)).count(),
        })
        .collect();

    if by_count {
        counts.sort_by(|a, b| b.count.cmp(&a.count));
    }
    counts
}

/// Executes the tags command.
///
/// # Errors
///
/// Returns an error if the posts cannot be loaded.
pub async fn execute(ctx: &CommandContext, opts: &TagsOptions) -> Result<()> {
    let posts = ctx.load_posts().await?;
    let universe = TagUniverse::from_posts(&posts);
    let counts = count_tags(&universe, &posts, opts.by_count);

    if ctx.json_output {
        println!("{}", format_tags_json(&counts)?);
    } else if !ctx.quiet {
        print!("{}", format_tags_table(&counts, ctx.use_colors));
    }

    Ok(())
}
