//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// rescache - local cache for HTTP resources and data files.
#[derive(Debug, Parser)]
#[command(name = "rescache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (YAML or JSON)
    #[arg(short, long, global = true, env = "RESCACHE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Cache directory (overrides settings and RESCACHE_CACHE_DIR)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a resource, fetching it only if it is not cached yet
    Get(GetArgs),

    /// Show where a resource is cached and where it is fetched from
    Path(PathArgs),

    /// Remove one cached resource, or every resource of a template
    Remove(RemoveArgs),

    /// List cached resources of a template
    List(ListArgs),

    /// Convert a data file between JSON and YAML
    Convert(ConvertArgs),

    /// Copy files into a directory
    Copy(CopyArgs),
}

/// Arguments for the `get` command.
#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    /// URL template with one `{}` placeholder
    pub template: String,

    /// Value substituted into the template
    pub parameter: String,

    /// Write the content to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `path` command.
#[derive(Debug, Clone, Args)]
pub struct PathArgs {
    /// URL template with one `{}` placeholder
    pub template: String,

    /// Value substituted into the template
    pub parameter: String,
}

/// Arguments for the `remove` command.
#[derive(Debug, Clone, Args)]
pub struct RemoveArgs {
    /// URL template with one `{}` placeholder
    pub template: String,

    /// Remove only this resource (all of the template's when omitted)
    pub parameter: Option<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// URL template with one `{}` placeholder
    pub template: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `convert` command.
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Data file to read (.json, .yaml, .yml)
    pub input: PathBuf,

    /// Data file to write; the format follows the extension
    pub output: PathBuf,
}

/// Arguments for the `copy` command.
#[derive(Debug, Clone, Args)]
pub struct CopyArgs {
    /// Files to copy
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Destination directory
    #[arg(short, long)]
    pub dest: PathBuf,

    /// Keep paths relative to this directory
    #[arg(short, long)]
    pub anchor: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get() {
        let cli = Cli::parse_from(["rescache", "get", "https://x/{}.json", "all"]);
        match cli.command {
            Commands::Get(args) => {
                assert_eq!(args.template, "https://x/{}.json");
                assert_eq!(args.parameter, "all");
                assert!(args.output.is_none());
            }
            other => panic!("expected Get, got {:?}", other),
        }
    }

    #[test]
    fn parses_remove_without_parameter() {
        let cli = Cli::parse_from(["rescache", "remove", "https://x/{}.json"]);
        match cli.command {
            Commands::Remove(args) => assert!(args.parameter.is_none()),
            other => panic!("expected Remove, got {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "rescache",
            "list",
            "https://x/{}",
            "--json",
            "--cache-dir",
            "/tmp/c",
            "--debug",
        ]);
        assert!(cli.debug);
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/c")));
    }

    #[test]
    fn copy_requires_files() {
        let result = Cli::try_parse_from(["rescache", "copy", "--dest", "out"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_copy_with_anchor() {
        let cli = Cli::parse_from([
            "rescache", "copy", "a.csv", "b/c.csv", "--dest", "out", "--anchor", ".",
        ]);
        match cli.command {
            Commands::Copy(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.anchor, Some(PathBuf::from(".")));
            }
            other => panic!("expected Copy, got {:?}", other),
        }
    }
}
