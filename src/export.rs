// src/export.rs
// =============================================================================
// Exports the invalid bookmarks of a run as CSV.
//
// Output looks like:
//
//   Name,URL,Category,ErrorMessage,StatusCode
//   "Old Blog","https://blog.example.com","Reading","HTTP 404 Not Found",404
//   "Dead Host","https://gone.example","","Request timed out",
//
// Text fields are always quoted with embedded quotes doubled. The status
// code is a bare number, or empty when there never was a response.
// =============================================================================

use crate::bookmark::{Bookmark, BookmarkStatus};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

const HEADER: &str = "Name,URL,Category,ErrorMessage,StatusCode";

// Builds the CSV for all Invalid bookmarks
//
// Returns an empty string when there is nothing to export, so callers can
// skip writing a file that would only contain a header.
pub fn to_csv(bookmarks: &[Bookmark]) -> String {
    let invalid: Vec<&Bookmark> = bookmarks
        .iter()
        .filter(|b| b.status == BookmarkStatus::Invalid)
        .collect();

    if invalid.is_empty() {
        return String::new();
    }

    let mut rows = Vec::with_capacity(invalid.len() + 1);
    rows.push(HEADER.to_string());

    for bookmark in invalid {
        let row = [
            quote(&bookmark.name),
            quote(&bookmark.url),
            quote(bookmark.category.as_deref().unwrap_or("")),
            quote(bookmark.error_message.as_deref().unwrap_or("")),
            bookmark
                .status_code
                .map(|code| code.to_string())
                .unwrap_or_default(),
        ];
        rows.push(row.join(","));
    }

    rows.join("\n")
}

// He said "hi" -> "He said ""hi"""
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// invalid-bookmarks-2026-10-18.csv
pub fn export_file_name(date: NaiveDate) -> String {
    format!("invalid-bookmarks-{}.csv", date.format("%Y-%m-%d"))
}

// Writes the invalid-bookmark report into `dir`
//
// Returns Ok(None) without touching the filesystem when no bookmark is
// invalid.
pub fn write_invalid_report(
    bookmarks: &[Bookmark],
    dir: &Path,
    date: NaiveDate,
) -> std::io::Result<Option<PathBuf>> {
    let csv = to_csv(bookmarks);
    if csv.is_empty() {
        return Ok(None);
    }

    let path = dir.join(export_file_name(date));
    std::fs::write(&path, csv)?;

    info!(file = %path.display(), mime = CSV_MIME_TYPE, "exported invalid bookmarks");
    Ok(Some(path))
}
