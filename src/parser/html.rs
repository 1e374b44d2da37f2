// src/parser/html.rs
// =============================================================================
// This module extracts bookmarks from browser HTML exports.
//
// Every browser writes the same "Netscape bookmark file" shape:
//
//   <DL><p>
//     <DT><A HREF="https://www.rust-lang.org" ADD_DATE="...">Rust</A>
//     <DT><H3>Folder</H3>
//   </DL>
//
// We don't need to understand the folder structure: every <a> with an
// http(s) href is a bookmark, and its text is the name.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (html5ever, same parser as Servo)
// - Lets us query it with CSS selectors
// - Copes with the unclosed <DT>/<p> tags these exports are full of
// =============================================================================

use super::IdGenerator;
use crate::bookmark::Bookmark;
use scraper::{Html, Selector};

// Extracts all bookmarks from an HTML export
//
// Parameters:
//   html: the file content (borrowed as &str)
//
// Returns: Vec<Bookmark> in document order, all Pending
//
// Example:
//   html = "<a href='https://example.com'> Example </a>"
//   result = [Bookmark { name: "Example", url: "https://example.com", .. }]
pub fn parse_html_bookmarks(html: &str) -> Vec<Bookmark> {
    let mut bookmarks = Vec::new();
    let mut ids = IdGenerator::new();

    let document = Html::parse_document(html);

    // "a" is a constant, known-valid selector
    let selector = Selector::parse("a").unwrap();

    for element in document.select(&selector) {
        // Anchors without an href, or with a relative / mailto: / javascript:
        // href, are skipped silently
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.starts_with("http") {
            continue;
        }

        let text: String = element.text().collect();
        bookmarks.push(Bookmark::new(ids.next_id(), text.trim(), href));
    }

    bookmarks
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not resolve relative links?
//    - A bookmark export has no base URL; a relative href can't point anywhere
//    - So "starts with http" is the whole filter
//
// 2. What does element.text() return?
//    - An iterator over every text node inside the element
//    - <a>Rust <b>Lang</b></a> gives "Rust " and "Lang"
//    - collect() joins them into one String
//
// 3. Why `let ... else`?
//    - Binds the value if the pattern matches, otherwise runs the else block
//    - The else block must leave the loop/function (here: continue)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmark::BookmarkStatus;

    #[test]
    fn test_netscape_export() {
        let html = r#"
<!DOCTYPE NETSCAPE-Bookmark-file-1>
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
    <DT><H3 ADD_DATE="1700000000">Dev</H3>
    <DL><p>
        <DT><A HREF="https://www.rust-lang.org" ADD_DATE="1700000000">Rust</A>
        <DT><A HREF="https://crates.io/">crates.io</A>
    </DL><p>
    <DT><A HREF="http://example.com/">Example</A>
</DL><p>
"#;
        let bookmarks = parse_html_bookmarks(html);

        assert_eq!(bookmarks.len(), 3);
        let urls: Vec<&str> = bookmarks.iter().map(|b| b.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://www.rust-lang.org", "https://crates.io/", "http://example.com/"]
        );
        assert!(bookmarks.iter().all(|b| b.status == BookmarkStatus::Pending));
        assert!(bookmarks.iter().all(|b| b.category.is_none()));
    }

    #[test]
    fn test_skips_non_http_anchors() {
        let html = r#"
            <a href="mailto:test@example.com">Email</a>
            <a href="/relative">Relative</a>
            <a name="top">No href</a>
            <a href="javascript:void(0)">JS</a>
            <a href="https://ok.example.com">Ok</a>
        "#;
        let bookmarks = parse_html_bookmarks(html);
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].name, "Ok");
    }

    #[test]
    fn test_name_is_trimmed_and_falls_back_to_url() {
        let html = r#"
            <a href="https://a.example.com">   Spaced out   </a>
            <a href="https://b.example.com">   </a>
        "#;
        let bookmarks = parse_html_bookmarks(html);
        assert_eq!(bookmarks[0].name, "Spaced out");
        assert_eq!(bookmarks[1].name, "https://b.example.com");
    }

    #[test]
    fn test_ids_are_unique() {
        let html = (0..50)
            .map(|i| format!(r#"<a href="https://example.com/{}">{}</a>"#, i, i))
            .collect::<String>();
        let bookmarks = parse_html_bookmarks(&html);

        let mut ids: Vec<&str> = bookmarks.iter().map(|b| b.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_garbage_yields_nothing() {
        assert!(parse_html_bookmarks("<<<not really html").is_empty());
        assert!(parse_html_bookmarks("").is_empty());
    }
}
