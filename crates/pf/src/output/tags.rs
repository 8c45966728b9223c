//! Tag universe output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

/// A tag together with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount<'a> {
    pub name: &'a str,
    pub count: usize,
}

/// JSON output structure for the tags command.
#[derive(Serialize)]
struct TagsListOutput<'a> {
    tags: &'a [TagCount<'a>],
}

/// Formats tags as JSON.
pub fn format_tags_json(tags: &[TagCount<'_>]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TagsListOutput { tags })
}

/// Formats tags as a table.
pub fn format_tags_table(tags: &[TagCount<'_>], use_colors: bool) -> String {
    if tags.is_empty() {
        return "No tags found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<24} {}", "Tag", "Posts");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for tag in tags {
        let name = format!("{:<24}", format!("#{}", tag.name));
        if use_colors {
            output.push_str(&format!("{} {}\n", name.cyan(), tag.count));
        } else {
            output.push_str(&format!("{} {}\n", name, tag.count));
        }
    }

    output
}
