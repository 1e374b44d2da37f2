// src/parser/mod.rs
// =============================================================================
// This module turns an exported bookmark file into a list of Bookmarks.
//
// Submodules:
// - html: browser "Export bookmarks" files (<a href="..."> anchors)
// - markdown: hand-written tables grouped under # headings
//
// Parsers never fail: a file with nothing usable simply yields an empty
// Vec. `load_file` is where "nothing usable" becomes an error for the user.
// =============================================================================

mod html;
mod markdown;

pub use html::parse_html_bookmarks;
pub use markdown::parse_markdown_bookmarks;

use crate::bookmark::{detect_file_type, Bookmark, FileType};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

// Hands out ids for one parse call: bookmark-1, bookmark-2, ...
//
// A plain counter can't collide the way timestamps can when hundreds of
// rows are parsed within the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.next += 1;
        format!("bookmark-{}", self.next)
    }
}

/// Parses file content with the parser for `file_type`
pub fn parse(content: &str, file_type: FileType) -> Vec<Bookmark> {
    let bookmarks = match file_type {
        FileType::Html => parse_html_bookmarks(content),
        FileType::Markdown => parse_markdown_bookmarks(content),
    };
    debug!(?file_type, count = bookmarks.len(), "parsed bookmark file");
    bookmarks
}

// Reads and parses a bookmark file from disk
//
// Rejections happen in this order, each before any further work:
// 1. unsupported extension (nothing is read)
// 2. file larger than `max_bytes` (metadata first, then the bytes read)
// 3. no bookmarks found after parsing
//
// Bytes that aren't valid UTF-8 become U+FFFD instead of failing the load;
// old browser exports are often Latin-1.
pub fn load_file(path: &Path, max_bytes: u64) -> Result<Vec<Bookmark>> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_type =
        detect_file_type(&filename).ok_or_else(|| Error::UnsupportedFileType(filename.clone()))?;

    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(Error::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: max_bytes,
        });
    }

    // The file may have grown since the metadata call, so the read itself
    // is bounded too
    let mut raw = Vec::new();
    File::open(path)?
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut raw)?;
    if raw.len() as u64 > max_bytes {
        return Err(Error::FileTooLarge {
            path: path.to_path_buf(),
            size: raw.len() as u64,
            limit: max_bytes,
        });
    }

    let content = String::from_utf8_lossy(&raw);
    let bookmarks = parse(&content, file_type);

    if bookmarks.is_empty() {
        return Err(Error::NoBookmarks(path.to_path_buf()));
    }

    info!(file = %path.display(), count = bookmarks.len(), "loaded bookmarks");
    Ok(bookmarks)
}
