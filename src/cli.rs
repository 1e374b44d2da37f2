// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is declared as Rust structs
// and enums, and clap generates the parsing, --help and --version for us.
// =============================================================================

use crate::bookmark::BookmarkStatus;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bookmark-guardian",
    version,
    about = "Check exported browser bookmarks for dead links",
    long_about = "bookmark-guardian reads a browser bookmark export (.html) or a Markdown \
                  bookmark table (.md), probes every link with a HEAD request, and reports \
                  which bookmarks no longer work. Invalid bookmarks can be exported as CSV."
)]
pub struct Cli {
    /// Log debug details to stderr (RUST_LOG overrides this)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a bookmark file and list its bookmarks without checking them
    ///
    /// Example: bookmark-guardian parse bookmarks.html
    Parse {
        /// Bookmark file (.html, .htm, .md or .markdown)
        file: PathBuf,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check every bookmark in a file and report the broken ones
    ///
    /// Example: bookmark-guardian check bookmarks.md --export
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Bookmark file (.html, .htm, .md or .markdown)
    pub file: PathBuf,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Only show bookmarks with this status
    #[arg(long, value_enum, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,

    /// Only show bookmarks whose name or URL contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// How many URLs are probed at the same time
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Send probes through a remote check-url service instead of directly
    #[arg(long)]
    pub service_url: Option<String>,

    /// Write invalid bookmarks to invalid-bookmarks-<date>.csv
    #[arg(long)]
    pub export: bool,

    /// Directory for the CSV export (default: current directory)
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// TOML config file (batch_size, timeout_secs, max_redirects, ...)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// --status values
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Valid,
    Invalid,
    Pending,
    Checking,
}

impl StatusFilter {
    /// None means "don't filter"
    pub fn as_status(self) -> Option<BookmarkStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Valid => Some(BookmarkStatus::Valid),
            StatusFilter::Invalid => Some(BookmarkStatus::Invalid),
            StatusFilter::Pending => Some(BookmarkStatus::Pending),
            StatusFilter::Checking => Some(BookmarkStatus::Checking),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_defaults() {
        let cli = Cli::try_parse_from(["bookmark-guardian", "check", "bookmarks.html"]).unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check subcommand");
        };
        assert_eq!(args.file, PathBuf::from("bookmarks.html"));
        assert_eq!(args.status, StatusFilter::All);
        assert_eq!(args.batch_size, None);
        assert!(!args.export);
        assert_eq!(args.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_check_flags() {
        let cli = Cli::try_parse_from([
            "bookmark-guardian",
            "-v",
            "check",
            "links.md",
            "--status",
            "invalid",
            "--search",
            "blog",
            "--batch-size",
            "3",
            "--export",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Commands::Check(args) = cli.command else {
            panic!("expected check subcommand");
        };
        assert_eq!(args.status.as_status(), Some(BookmarkStatus::Invalid));
        assert_eq!(args.search.as_deref(), Some("blog"));
        assert_eq!(args.batch_size, Some(3));
        assert!(args.export);
    }

    #[test]
    fn test_parse_subcommand() {
        let cli = Cli::try_parse_from(["bookmark-guardian", "parse", "x.md", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Parse { json: true, .. }));
    }
}
