//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the pf CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// pf - search and tag-filter a collection of posts
#[derive(Parser, Debug)]
#[command(name = "pf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Posts file to read (default: from config, then the data directory)
    #[arg(short, long, global = true, env = "PF_POSTS")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter posts by search term and tags
    #[command(alias = "s")]
    Search {
        /// Text to look for in titles, descriptions and bodies
        term: Option<String>,

        /// Only show posts with this tag (repeatable, any tag matches)
        #[arg(short, long, action = clap::ArgAction::Append)]
        tag: Vec<String>,

        /// Limit the number of posts shown
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List every tag in the collection
    #[command(alias = "t")]
    Tags {
        /// Sort tags by post count instead of first appearance
        #[arg(long)]
        by_count: bool,
    },

    /// Filter interactively, reading commands from stdin
    #[command(alias = "b")]
    Browse,

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
