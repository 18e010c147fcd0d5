//! Text-to-markup conversion for message bubbles.
//!
//! Presentation only: spans borrow from the stored text and never
//! rewrite it.

use std::sync::LazyLock;

use regex::Regex;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL pattern is a valid regex"));

/// A run of text within one rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    Text(&'a str),
    /// Display text and target are the same URL substring
    Link(&'a str),
}

pub type MarkupLine<'a> = Vec<Span<'a>>;

/// Split `text` into visual lines, each broken into text and link spans.
///
/// Every input yields at least one line; an empty line has no spans.
pub fn to_markup(text: &str) -> Vec<MarkupLine<'_>> {
    text.split('\n')
        .map(|line| split_links(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

fn split_links(line: &str) -> MarkupLine<'_> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for found in URL_PATTERN.find_iter(line) {
        if found.start() > cursor {
            spans.push(Span::Text(&line[cursor..found.start()]));
        }
        spans.push(Span::Link(found.as_str()));
        cursor = found.end();
    }
    if cursor < line.len() {
        spans.push(Span::Text(&line[cursor..]));
    }
    spans
}
