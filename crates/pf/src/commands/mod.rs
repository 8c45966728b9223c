//! Command implementations for the pf CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod browse;
pub mod completions;
pub mod config;
pub mod lookups;
pub mod search;
pub mod tags;

use std::path::PathBuf;

use post_filter_rs::{Post, PostStore};
use tracing::debug;

use crate::cli::Cli;
use config::Config;
use lookups::format_unknown_tag_error;

/// Default truncation width for descriptions in table output.
const DEFAULT_MAX_WIDTH: usize = 60;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Post store error.
    #[error("posts error: {0}")]
    Store(#[from] post_filter_rs::PostStoreError),

    /// A selected tag does not appear on any post.
    #[error("{}", format_unknown_tag_error(tag, suggestion.as_deref()))]
    UnknownTag {
        /// The tag that was asked for.
        tag: String,
        /// Closest existing tag, if any is close enough.
        suggestion: Option<String>,
    },

    /// A browse line started with `:` but named no known command.
    #[error("unknown command '{0}', type :help for a list")]
    UnknownCommand(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Truncation width for descriptions.
    pub max_width: usize,
    /// Explicit posts file from `--file` / `PF_POSTS`.
    pub posts_file: Option<PathBuf>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the loaded config.
    ///
    /// Command-line flags win over config values.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        let config_color = config.output.color.unwrap_or(true);
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && config_color,
            quiet: cli.quiet,
            verbose: cli.verbose,
            max_width: config.output.max_width.unwrap_or(DEFAULT_MAX_WIDTH),
            posts_file: cli.file.clone().or_else(|| config.posts_path.clone()),
        }
    }

    /// Returns the store posts are read from.
    ///
    /// Priority: `--file` / `PF_POSTS` > `posts_path` in config > XDG data dir.
    pub fn post_store(&self) -> Result<PostStore> {
        match &self.posts_file {
            Some(path) => Ok(PostStore::with_path(path.clone())),
            None => Ok(PostStore::new()?),
        }
    }

    /// Loads the posts for a command.
    pub async fn load_posts(&self) -> Result<Vec<Post>> {
        let store = self.post_store()?;
        debug!(path = %store.path().display(), "loading posts");
        Ok(store.load_async().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_context_flags_override_config() {
        env::remove_var("PF_POSTS");
        let cli = Cli::parse_from(["pf", "--no-color", "--file", "/tmp/a.json", "tags"]);
        let mut config = Config::default();
        config.output.color = Some(true);
        config.posts_path = Some(PathBuf::from("/tmp/b.json"));

        let ctx = CommandContext::from_cli(&cli, &config);
        assert!(!ctx.use_colors);
        assert_eq!(ctx.posts_file, Some(PathBuf::from("/tmp/a.json")));
    }

    #[test]
    #[serial]
    fn test_context_falls_back_to_config() {
        env::remove_var("PF_POSTS");
        let cli = Cli::parse_from(["pf", "tags"]);
        let mut config = Config::default();
        config.output.color = Some(false);
        config.output.max_width = Some(20);
        config.posts_path = Some(PathBuf::from("/tmp/b.json"));

        let ctx = CommandContext::from_cli(&cli, &config);
        assert!(!ctx.use_colors);
        assert_eq!(ctx.max_width, 20);
        assert_eq!(ctx.posts_file, Some(PathBuf::from("/tmp/b.json")));
    }

    #[test]
    #[serial]
    fn test_posts_env_var_fills_file_flag() {
        env::set_var("PF_POSTS", "/tmp/env.json");
        let cli = Cli::parse_from(["pf", "tags"]);
        env::remove_var("PF_POSTS");

        let ctx = CommandContext::from_cli(&cli, &Config::default());
        assert_eq!(ctx.posts_file, Some(PathBuf::from("/tmp/env.json")));
    }

    #[test]
    fn test_unknown_tag_error_message() {
        let err = CommandError::UnknownTag {
            tag: "rsut".to_string(),
            suggestion: Some("rust".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "tag 'rsut' not found in any post. Did you mean 'rust'?"
        );
    }
}
