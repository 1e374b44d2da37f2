// src/parser/markdown.rs
// =============================================================================
// This module extracts bookmarks from Markdown tables.
//
// Expected layout:
//
//   # Category name
//
//   | Name | URL | Description |
//   | ---- | --- | ----------- |
//   | Rust | https://www.rust-lang.org | The language |
//
// This is NOT a general Markdown parser. It walks the file line by line
// with a tiny state machine:
//
//   "# ..."   -> new category, leave any table
//   "| ..."   -> header row, then separator row, then data rows
//   ""        -> leave the table (the category stays)
//   anything  -> ignored
// =============================================================================

use super::IdGenerator;
use crate::bookmark::Bookmark;

// Where we are inside the current table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    /// Not in a table; the next "|" line is a header row
    Outside,
    /// Header consumed; the next "|" line is the |---| separator
    AfterHeader,
    /// Separator consumed; every "|" line is data
    InBody,
}

// Extracts all bookmarks from Markdown tables
//
// Returns: Vec<Bookmark> in file order, all Pending, each tagged with the
// most recent heading as its category
pub fn parse_markdown_bookmarks(markdown: &str) -> Vec<Bookmark> {
    let mut bookmarks = Vec::new();
    let mut ids = IdGenerator::new();

    let mut category: Option<String> = None;
    let mut state = TableState::Outside;

    for line in markdown.lines() {
        let line = line.trim();

        if line.starts_with('#') {
            category = Some(heading_text(line).to_string());
            state = TableState::Outside;
            continue;
        }

        if line.is_empty() {
            state = TableState::Outside;
            continue;
        }

        if !line.starts_with('|') {
            continue;
        }

        match state {
            TableState::Outside => state = TableState::AfterHeader,
            TableState::AfterHeader => state = TableState::InBody,
            TableState::InBody => {
                if let Some(mut bookmark) = parse_row(line, &mut ids) {
                    bookmark.category = category.clone();
                    bookmarks.push(bookmark);
                }
            }
        }
    }

    bookmarks
}

// "## Dev Tools" -> "Dev Tools"
fn heading_text(line: &str) -> &str {
    line.trim_start_matches('#').trim()
}

// Turns one data row into a bookmark
//
// Empty cells are dropped before indexing, so "| | https://x |" is a
// single-cell row and yields nothing.
fn parse_row(line: &str, ids: &mut IdGenerator) -> Option<Bookmark> {
    let cells: Vec<&str> = line
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect();

    if cells.len() < 2 {
        return None;
    }

    let (name, url) = (cells[0], cells[1]);
    if !is_http_link(url) {
        return None;
    }

    let mut bookmark = Bookmark::new(ids.next_id(), name, url);
    bookmark.description = cells.get(2).map(|d| d.to_string());
    Some(bookmark)
}

fn is_http_link(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmark::BookmarkStatus;

    #[test]
    fn test_tools_table() {
        let markdown = "\
# Tools
| Name | URL | Desc |
|---|---|---|
| Foo | https://foo.com | bar |
| Baz | ftp://baz.com | x |
";
        let bookmarks = parse_markdown_bookmarks(markdown);

        assert_eq!(bookmarks.len(), 1);
        let foo = &bookmarks[0];
        assert_eq!(foo.name, "Foo");
        assert_eq!(foo.url, "https://foo.com");
        assert_eq!(foo.description.as_deref(), Some("bar"));
        assert_eq!(foo.category.as_deref(), Some("Tools"));
        assert_eq!(foo.status, BookmarkStatus::Pending);
    }

    #[test]
    fn test_single_cell_row_yields_nothing() {
        let markdown = "\
| Name | URL |
|---|---|
| OnlyOne |
";
        assert!(parse_markdown_bookmarks(markdown).is_empty());
    }

    #[test]
    fn test_blank_line_keeps_category() {
        let markdown = "\
## Reading

| Name | URL |
|---|---|
| Blog | https://blog.example.com |

| Name | URL |
|---|---|
| News | https://news.example.com |
";
        let bookmarks = parse_markdown_bookmarks(markdown);

        assert_eq!(bookmarks.len(), 2);
        assert_eq!(bookmarks[0].category.as_deref(), Some("Reading"));
        assert_eq!(bookmarks[1].category.as_deref(), Some("Reading"));
        assert_eq!(bookmarks[1].name, "News");
    }

    #[test]
    fn test_blank_line_restarts_header_detection() {
        // After a blank line the next "|" row is a header again, so a
        // bookmark-looking first row is swallowed as the header.
        let markdown = "\
| Name | URL |
|---|---|
| A | https://a.example.com |

| B | https://b.example.com |
|---|---|
| C | https://c.example.com |
";
        let bookmarks = parse_markdown_bookmarks(markdown);
        let names: Vec<&str> = bookmarks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_heading_resets_table_and_switches_category() {
        let markdown = "\
# First
| Name | URL |
|---|---|
| One | https://one.example.com |
# Second
| Name | URL |
|---|---|
| Two | https://two.example.com |
";
        let bookmarks = parse_markdown_bookmarks(markdown);
        assert_eq!(bookmarks.len(), 2);
        assert_eq!(bookmarks[0].category.as_deref(), Some("First"));
        assert_eq!(bookmarks[1].category.as_deref(), Some("Second"));
    }

    #[test]
    fn test_table_before_any_heading_has_no_category() {
        let markdown = "\
| Name | URL |
|---|---|
| Rust | https://www.rust-lang.org |
";
        let bookmarks = parse_markdown_bookmarks(markdown);
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].category, None);
        assert_eq!(bookmarks[0].description, None);
    }

    #[test]
    fn test_crlf_and_indentation() {
        let markdown = "# Web\r\n  | Name | URL |\r\n  |---|---|\r\n  | Site | http://site.example.com | desc |\r\n";
        let bookmarks = parse_markdown_bookmarks(markdown);
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].url, "http://site.example.com");
        assert_eq!(bookmarks[0].category.as_deref(), Some("Web"));
    }

    #[test]
    fn test_ids_are_sequential_within_a_parse() {
        let mut markdown = String::from("| Name | URL |\n|---|---|\n");
        for i in 0..20 {
            markdown.push_str(&format!("| Site {} | https://example.com/{} |\n", i, i));
        }
        let bookmarks = parse_markdown_bookmarks(&markdown);

        assert_eq!(bookmarks.len(), 20);
        assert_eq!(bookmarks[0].id, "bookmark-1");
        assert_eq!(bookmarks[19].id, "bookmark-20");
    }

    #[test]
    fn test_heading_text() {
        assert_eq!(heading_text("# Tools"), "Tools");
        assert_eq!(heading_text("###   Deep  "), "Deep");
        assert_eq!(heading_text("#"), "");
    }
}
