// src/bookmark.rs
// =============================================================================
// The bookmark data model shared by the parser, the checkers and the exporter.
//
// - Bookmark: one named URL plus its check metadata
// - BookmarkStatus: Pending -> Checking -> Valid | Invalid
// - BookmarkSet: the owned working set the orchestrator mutates
// - CheckSummary: counts derived from a set, never stored
// - FileType: which parser a file goes through (picked by extension)
//
// Rust concepts:
// - Enums with serde attributes: control the JSON shape
// - Option<T>: fields that only exist after a check
// - &mut self: only the owner of a set can change it
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle of a bookmark during a check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkStatus {
    /// Loaded, not checked yet (or reset before a new run)
    Pending,
    /// Part of the batch currently being probed
    Checking,
    /// Probe got a 2xx response
    Valid,
    /// Malformed URL, error status, or network failure
    Invalid,
}

impl BookmarkStatus {
    /// True once a check attempt has produced a verdict
    pub fn is_final(self) -> bool {
        matches!(self, BookmarkStatus::Valid | BookmarkStatus::Invalid)
    }
}

// One bookmark from an uploaded export
//
// The camelCase rename keeps the JSON shape identical to the check service
// contract (statusCode, errorMessage, responseTimeMs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub status: BookmarkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl Bookmark {
    /// Creates a fresh, unchecked bookmark
    ///
    /// An empty name falls back to the URL so every row has something to show.
    pub fn new(id: String, name: &str, url: &str) -> Self {
        let name = if name.is_empty() { url } else { name };

        Bookmark {
            id,
            name: name.to_string(),
            url: url.to_string(),
            description: None,
            category: None,
            status: BookmarkStatus::Pending,
            status_code: None,
            error_message: None,
            response_time_ms: None,
        }
    }

    /// Drops any previous verdict and goes back to Pending
    pub fn reset(&mut self) {
        self.status = BookmarkStatus::Pending;
        self.status_code = None;
        self.error_message = None;
        self.response_time_ms = None;
    }
}

// Aggregate counts over a set of bookmarks
//
// Recomputed on demand; nothing keeps these in sync by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub pending: usize,
    pub checking: usize,
}

impl CheckSummary {
    pub fn from_bookmarks(bookmarks: &[Bookmark]) -> Self {
        let mut summary = CheckSummary {
            total: bookmarks.len(),
            ..CheckSummary::default()
        };

        for bookmark in bookmarks {
            match bookmark.status {
                BookmarkStatus::Valid => summary.valid += 1,
                BookmarkStatus::Invalid => summary.invalid += 1,
                BookmarkStatus::Pending => summary.pending += 1,
                BookmarkStatus::Checking => summary.checking += 1,
            }
        }

        summary
    }
}

/// Supported bookmark export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Html,
    Markdown,
}

// Picks the parser for a file purely from its extension
//
// Examples:
//   "bookmarks.html" -> Some(Html)
//   "x.HTML"         -> Some(Html)   (case-insensitive)
//   "links.md"       -> Some(Markdown)
//   ".md"            -> Some(Markdown)
//   "x.txt"          -> None
//   "html"           -> None         (no dot at all)
pub fn detect_file_type(filename: &str) -> Option<FileType> {
    let (_, extension) = filename.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();

    match extension.as_str() {
        "html" | "htm" => Some(FileType::Html),
        "md" | "markdown" => Some(FileType::Markdown),
        _ => None,
    }
}

// The working set of bookmarks for one session
//
// `generation` goes up every time the contents are replaced or cleared.
// A check run remembers the generation it started with; writes tagged with
// an older generation are dropped, so results that arrive after a reset can
// never touch the new set.
#[derive(Debug, Default)]
pub struct BookmarkSet {
    bookmarks: Vec<Bookmark>,
    generation: u64,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole set with freshly parsed bookmarks
    pub fn load(&mut self, bookmarks: Vec<Bookmark>) {
        self.bookmarks = bookmarks;
        self.generation += 1;
    }

    /// Discards everything (in-flight results become stale)
    pub fn reset(&mut self) {
        self.bookmarks.clear();
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn summary(&self) -> CheckSummary {
        CheckSummary::from_bookmarks(&self.bookmarks)
    }

    /// Puts every bookmark back to Pending before a new run
    pub fn reset_statuses(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.bookmarks.iter_mut().for_each(Bookmark::reset);
        true
    }

    /// Flags the given ids as Checking; returns false for a stale generation
    pub fn mark_checking(&mut self, generation: u64, ids: &[String]) -> bool {
        if generation != self.generation {
            return false;
        }

        for bookmark in self.bookmarks.iter_mut() {
            if ids.contains(&bookmark.id) {
                bookmark.status = BookmarkStatus::Checking;
            }
        }
        true
    }

    // Writes checked bookmarks back into the set by id
    //
    // Returns how many bookmarks were updated. Stale generations and ids
    // that no longer exist are ignored.
    pub fn merge(&mut self, generation: u64, results: Vec<Bookmark>) -> usize {
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "ignoring results from a previous run"
            );
            return 0;
        }

        let mut by_id: HashMap<String, Bookmark> = results
            .into_iter()
            .map(|bookmark| (bookmark.id.clone(), bookmark))
            .collect();

        let mut merged = 0;
        for bookmark in self.bookmarks.iter_mut() {
            if let Some(result) = by_id.remove(&bookmark.id) {
                *bookmark = result;
                merged += 1;
            }
        }
        merged
    }
}

// Narrows a list of bookmarks the way the results view does:
// an optional status plus a case-insensitive search on name or URL
pub fn filter_bookmarks<'a>(
    bookmarks: &'a [Bookmark],
    status: Option<BookmarkStatus>,
    query: Option<&str>,
) -> Vec<&'a Bookmark> {
    let query = query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    bookmarks
        .iter()
        .filter(|b| status.map_or(true, |s| b.status == s))
        .filter(|b| match &query {
            Some(q) => b.name.to_lowercase().contains(q) || b.url.to_lowercase().contains(q),
            None => true,
        })
        .collect()
}
