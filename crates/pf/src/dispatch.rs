//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split into two groups: local commands that never touch the posts
//! file (config, completions, help) and post commands that load it first.

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run synchronously without reading posts.
pub trait LocalCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that operate on the post collection.
#[allow(async_fn_in_trait)]
pub trait PostsCommand {
    /// Execute the command.
    async fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Commands that don't read posts.
pub enum LocalDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> LocalDispatch<'a> {
    /// Try to create a local dispatch from the CLI command.
    /// Returns None if the command needs the post collection.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl LocalCommand for LocalDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("pf - search and tag-filter posts");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that load the post collection.
pub enum PostsDispatch<'a> {
    Search {
        term: &'a Option<String>,
        tags: &'a [String],
        limit: Option<usize>,
    },
    Tags {
        by_count: bool,
    },
    Browse,
}

impl<'a> PostsDispatch<'a> {
    /// Create a posts dispatch from the CLI command.
    /// Returns None for local commands (use LocalDispatch first).
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Search { term, tag, limit }) => Some(Self::Search {
                term,
                tags: tag,
                limit: *limit,
            }),
            Some(Commands::Tags { by_count }) => Some(Self::Tags {
                by_count: *by_count,
            }),
            Some(Commands::Browse) => Some(Self::Browse),
            // Already handled by LocalDispatch
            Some(Commands::Config { .. }) | Some(Commands::Completions { .. }) | None => None,
        }
    }
}

impl PostsCommand for PostsDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Search { term, tags, limit } => {
                let opts = commands::search::SearchOptions {
                    term: (*term).clone(),
                    tags: (*tags).to_vec(),
                    limit: *limit,
                };
                commands::search::execute(ctx, &opts).await
            }
            Self::Tags { by_count } => {
                let opts = commands::tags::TagsOptions {
                    by_count: *by_count,
                };
                commands::tags::execute(ctx, &opts).await
            }
            Self::Browse => commands::browse::execute(ctx).await,
        }
    }
}
