//! Filtered post output formatting.

use owo_colors::OwoColorize;
use post_filter_rs::Post;
use serde::Serialize;

use super::helpers::{format_tags, truncate_str};

/// The inputs and counts a post listing was produced from.
///
/// The inputs are optional so that listings pushed by a running engine, which
/// only know the result, can share the same shape.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSummary<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_tags: Option<Vec<&'a str>>,
    pub matched: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
}

/// JSON output structure for a post listing.
#[derive(Serialize)]
struct PostsListOutput<'a> {
    #[serde(flatten)]
    summary: &'a SearchSummary<'a>,
    posts: Vec<PostOutput<'a>>,
}

/// JSON output structure for a single post.
#[derive(Serialize)]
struct PostOutput<'a> {
    title: &'a str,
    description: &'a str,
    body: &'a str,
    tags: &'a [String],
}

/// Formats posts as JSON.
pub fn format_posts_json(
    posts: &[&Post],
    summary: &SearchSummary<'_>,
) -> Result<String, serde_json::Error> {
    let output = PostsListOutput {
        summary,
        posts: posts
            .iter()
            .map(|p| PostOutput {
                title: &p.title,
                description: &p.description,
                body: &p.body,
                tags: &p.tags,
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats posts as a table: one title line per post, followed by its
/// description when present.
pub fn format_posts_table(
    posts: &[&Post],
    summary: &SearchSummary<'_>,
    max_width: usize,
    use_colors: bool,
) -> String {
    let mut output = String::new();

    let header = format!("{} of {} posts match", summary.matched, summary.total);
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    if posts.is_empty() {
        output.push_str("No posts match.\n");
        return output;
    }

    for post in posts {
        let title = if use_colors {
            post.title.bold().to_string()
        } else {
            post.title.clone()
        };
        let tags = format_tags(&post.tags, use_colors);

        if tags.is_empty() {
            output.push_str(&format!("{title}\n"));
        } else {
            output.push_str(&format!("{title}  {tags}\n"));
        }

        if !post.description.is_empty() {
            let description = truncate_str(&post.description, max_width);
            if use_colors {
                output.push_str(&format!("    {}\n", description.dimmed()));
            } else {
                output.push_str(&format!("    {description}\n"));
            }
        }
    }

    output
}
