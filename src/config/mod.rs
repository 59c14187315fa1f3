pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::Strategy;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};

/// Flags shared by every entry point.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Repository root that relative paths resolve against
    #[arg(long, default_value = ".")]
    pub root: String,

    /// TOML configuration file (default: preset-source.toml under the root, if present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "preset-source")]
#[command(about = "Inject a default `source` field into theme preset tables")]
pub struct CliConfig {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add the field in place to an extracted preset table
    Augment(AugmentArgs),
    /// Build the preset source file from the documentation table
    Extract(ExtractArgs),
    /// Check that every preset carries the field exactly once
    Audit {
        /// File to check (default: the augment path)
        path: Option<String>,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct AugmentArgs {
    /// Preset table to rewrite in place
    #[arg(long)]
    pub path: Option<String>,

    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Documentation file holding the preset table
    #[arg(long)]
    pub input: Option<String>,

    /// Destination source file; must differ from the input
    #[arg(long)]
    pub output: Option<String>,

    /// Only transform the first fenced block with this language tag
    #[arg(long)]
    pub code_fence: Option<String>,

    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,
}
