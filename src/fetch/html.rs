// src/fetch/html.rs
// =============================================================================
// This module turns raw response bytes into a parsed HTML document.
//
// Steps:
// 1. Guess the character encoding from the bytes themselves (chardetng)
// 2. Decode to a Rust String (encoding_rs)
// 3. Remove <!-- comments --> so stray markup inside them cannot confuse
//    the parser
// 4. Parse with scraper (html5ever under the hood)
//
// It also knows how to read the page title out of a parsed document.
//
// Rust concepts:
// - Cow<str>: "maybe borrowed, maybe owned" strings, avoids copies
// - OnceLock: Compile a regex once and reuse it
// =============================================================================

use chardetng::EncodingDetector;
use regex::Regex;
use scraper::{Html, Selector};
use std::borrow::Cow;
use std::sync::OnceLock;

// Decodes a response body using the encoding inferred from its content
//
// A byte order mark wins if present. Otherwise chardetng looks at the bytes
// and picks the most likely encoding. Invalid sequences become U+FFFD, so this
// never fails.
pub fn decode_body(body: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);

    // decode() also sniffs the BOM and overrides `encoding` when it finds one
    let (text, _actual, _had_errors) = encoding.decode(body);
    text.into_owned()
}

fn comment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // (?s) lets . match newlines; .*? stops at the first -->
    PATTERN.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"))
}

// Removes every <!-- ... --> span from the HTML
pub fn strip_comments(html: &str) -> Cow<'_, str> {
    comment_pattern().replace_all(html, "")
}

// Decodes, cleans and parses a response body
pub fn parse_document(body: &[u8]) -> Html {
    let text = decode_body(body);
    let cleaned = strip_comments(&text);
    Html::parse_document(&cleaned)
}

// Returns the trimmed text of the first <title> element
//
// Returns:
//   Ok(Some(title)) - a non-empty title was found
//   Ok(None) - no <title>, or it only contains whitespace
//   Err(msg) - the selector could not be built
pub fn extract_title(document: &Html) -> Result<Option<String>, String> {
    let selector = Selector::parse("title").map_err(|e| format!("bad title selector: {}", e))?;

    let title = document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    Ok(title)
}
