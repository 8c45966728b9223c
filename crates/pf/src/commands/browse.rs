//! Browse command implementation.
//!
//! Drives a [`FilterEngine`] from stdin. Each line either sets the search term
//! or runs a `:` command; every result the engine publishes is printed by a
//! subscriber, so the output always reflects the latest inputs.
//!
//! Commands:
//! - `:tag NAME` - toggle a tag
//! - `:clear` - deselect all tags
//! - `:tags` - list the tag universe
//! - `:reload` - re-read the posts file
//! - `:help` - show this list
//! - `:quit` / `:q` - exit
//!
//! Any other line becomes the search term. A line starting with `::` searches
//! for the text after the first colon.

use post_filter_rs::{FilterEngine, FilteredResult, Post, PostStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use super::lookups::ensure_known_tag;
use super::tags::count_tags;
use super::{CommandContext, CommandError, Result};
use crate::output::{format_posts_json, format_posts_table, format_tags_table, SearchSummary};

const HELP: &str = "\
Type to search. Commands:
  :tag NAME   toggle a tag
  :clear      deselect all tags
  :tags       list tags
  :reload     re-read the posts file
  :help       show this help
  :quit       exit";

/// A parsed line of browse input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    /// Replace the search term.
    Search(String),
    /// Toggle a tag's selection.
    ToggleTag(String),
    /// Deselect all tags.
    ClearTags,
    /// Print the tag universe.
    ListTags,
    /// Reload posts from the store.
    Reload,
    /// Print the command list.
    Help,
    /// Leave the session.
    Quit,
    /// A `:` command that was not recognized.
    Unknown(String),
}

/// Parses one line of input.
pub fn parse_input(line: &str) -> BrowseInput {
    if let Some(rest) = line.strip_prefix("::") {
        return BrowseInput::Search(format!(":{rest}"));
    }

    let Some(command) = line.strip_prefix(':') else {
        return BrowseInput::Search(line.to_string());
    };

    let command = command.trim();
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match (name, arg) {
        ("tag" | "t", tag) if !tag.is_empty() => BrowseInput::ToggleTag(tag.to_string()),
        ("clear", "") => BrowseInput::ClearTags,
        ("tags", "") => BrowseInput::ListTags,
        ("reload", "") => BrowseInput::Reload,
        ("help" | "h", "") => BrowseInput::Help,
        ("quit" | "q", "") => BrowseInput::Quit,
        _ => BrowseInput::Unknown(line.to_string()),
    }
}

/// What the input loop should do after a line was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// An interactive filtering session over one posts file.
pub struct BrowseSession {
    engine: FilterEngine,
    store: PostStore,
}

impl BrowseSession {
    /// Creates a session over already-loaded posts.
    pub fn new(store: PostStore, posts: Vec<Post>) -> Self {
        Self {
            engine: FilterEngine::new(posts),
            store,
        }
    }

    /// The engine driving this session.
    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    /// Registers a consumer of published results.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&FilteredResult) + 'static,
    {
        self.engine.subscribe(observer);
    }

    /// Applies one parsed input line.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown tags, unknown commands, or a failed reload.
    /// None of these change the engine's inputs.
    pub async fn apply(&mut self, input: BrowseInput, ctx: &CommandContext) -> Result<Step> {
        match input {
            BrowseInput::Search(term) => {
                self.engine.set_search_term(term);
            }
            BrowseInput::ToggleTag(tag) => {
                ensure_known_tag(self.engine.tag_universe(), &tag)?;
                let selected = self.engine.toggle_tag(&tag);
                debug!(tag = %tag, selected, "toggled tag");
            }
            BrowseInput::ClearTags => {
                self.engine.clear_tags();
            }
            BrowseInput::ListTags => {
                if !ctx.quiet {
                    let counts =
                        count_tags(self.engine.tag_universe(), self.engine.posts(), false);
                    print!("{}", format_tags_table(&counts, ctx.use_colors));
                }
            }
            BrowseInput::Reload => {
                let posts = self.store.load_async().await?;
                if !self.engine.set_posts(posts) && !ctx.quiet && !ctx.json_output {
                    eprintln!("Posts unchanged.");
                }
            }
            BrowseInput::Help => {
                if !ctx.quiet {
                    eprintln!("{HELP}");
                }
            }
            BrowseInput::Quit => return Ok(Step::Quit),
            BrowseInput::Unknown(line) => {
                return Err(CommandError::UnknownCommand(line.trim().to_string()));
            }
        }
        Ok(Step::Continue)
    }
}

/// Builds the observer that prints each published result.
fn result_printer(ctx: &CommandContext) -> impl FnMut(&FilteredResult) + 'static {
    let json_output = ctx.json_output;
    let quiet = ctx.quiet;
    let use_colors = ctx.use_colors;
    let max_width = ctx.max_width;

    move |result: &FilteredResult| {
        if quiet {
            return;
        }

        let posts: Vec<&Post> = result.posts.iter().collect();
        let summary = SearchSummary {
            search_term: None,
            selected_tags: None,
            matched: result.len(),
            total: result.total,
            revision: Some(result.revision),
        };

        if json_output {
            match format_posts_json(&posts, &summary) {
                Ok(json) => println!("{json}"),
                Err(e) => warn!(error = %e, "failed to serialize result"),
            }
        } else {
            print!("{}", format_posts_table(&posts, &summary, max_width, use_colors));
        }
    }
}

/// Executes the browse command.
///
/// # Errors
///
/// Returns an error if the posts cannot be loaded initially or stdin fails.
/// Errors from individual lines are reported and the session continues.
pub async fn execute(ctx: &CommandContext) -> Result<()> {
    let store = ctx.post_store()?;
    let posts = store.load_async().await?;

    let mut session = BrowseSession::new(store, posts);
    if !ctx.quiet && !ctx.json_output {
        eprintln!("{HELP}\n");
    }
    session.subscribe(result_printer(ctx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match session.apply(parse_input(&line), ctx).await {
            Ok(Step::Continue) => {}
            Ok(Step::Quit) => break,
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    debug!(
        revision = session.engine().result().revision,
        "browse session ended"
    );
    Ok(())
}
