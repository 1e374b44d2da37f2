// src/error.rs
// =============================================================================
// Error types for loading bookmark files and for configuration.
//
// Per-bookmark check failures are NOT errors here: they are recorded on the
// bookmark itself (status = invalid + error message). These variants are the
// things that stop us before a check run can even start.
//
// Rust concepts:
// - thiserror: derive Display and Error for an enum
// - #[from]: automatic conversion so `?` works on io/toml errors
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The file extension is not .html/.htm/.md/.markdown
    #[error("unsupported file type: {0} (expected .html, .htm, .md or .markdown)")]
    UnsupportedFileType(String),

    /// The file parsed fine but contained no usable links
    #[error("no bookmarks could be parsed from {0}")]
    NoBookmarks(PathBuf),

    #[error("{path} is {size} bytes, larger than the {limit} byte limit")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("could not parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("could not build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
