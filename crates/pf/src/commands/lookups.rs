//! Tag lookup with fuzzy "did you mean" suggestions.

use post_filter_rs::TagUniverse;
use strsim::levenshtein;

use super::{CommandError, Result};

/// Maximum Levenshtein distance to consider a tag as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Formats the "unknown tag" error message, optionally including a suggestion.
pub(crate) fn format_unknown_tag_error(tag: &str, suggestion: Option<&str>) -> String {
    let base = format!("tag '{}' not found in any post.", tag);
    match suggestion {
        Some(s) => format!("{} Did you mean '{}'?", base, s),
        None => base,
    }
}

/// Finds the best matching name from a list of candidates using Levenshtein distance.
///
/// Returns the best match if its edit distance is within the threshold,
/// otherwise returns `None`.
pub(crate) fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| {
            let distance = levenshtein(&query_lower, &name.to_lowercase());
            (name.to_string(), distance)
        })
        .min_by_key(|(_, d)| *d)?;

    // A case-only difference has distance 0 but is still worth suggesting,
    // since tag matching is exact.
    if best_match != query && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}

/// Checks that a tag exists in the universe.
///
/// # Errors
///
/// Returns `CommandError::UnknownTag` with the closest existing tag as a
/// suggestion when the tag is not present.
pub fn ensure_known_tag(universe: &TagUniverse, tag: &str) -> Result<()> {
    if universe.contains(tag) {
        return Ok(());
    }
    Err(CommandError::UnknownTag {
        tag: tag.to_string(),
        suggestion: find_similar_name(tag, universe.iter()),
    })
}
