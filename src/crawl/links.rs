// src/crawl/links.rs
// =============================================================================
// This module extracts the next URLs to crawl from a parsed page.
//
// For every <a href="..."> in the document:
// 1. Trim whitespace
// 2. Drop tel:, mailto: and javascript: links (nothing to fetch there)
// 3. Resolve relative links against the page URL
// 4. Drop the #fragment
// 5. Keep only http/https links on exactly our base domain
// 6. Normalize (see url_filter.rs)
//
// The result keeps document order and has no duplicates within the page.
// Dedup against everything seen so far is the engine's job.
// =============================================================================

use super::url_filter::normalize_url;
use crate::config::CrawlConfig;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

const SKIPPED_SCHEMES: [&str; 3] = ["tel:", "mailto:", "javascript:"];

// Extracts same-domain links from a page
//
// Parameters:
//   page_url: the URL the document was fetched from (for relative links)
//   document: the parsed page
//   config: provides the base domain
//
// Returns: normalized absolute URLs in the order they appear
pub fn extract_links(page_url: &str, document: &Html, config: &CrawlConfig) -> Vec<String> {
    let mut links = Vec::new();

    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return links,
    };

    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return links,
    };

    let mut in_page = HashSet::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(resolved) = resolve_link(&base, href) else {
            continue;
        };

        if !config.is_same_domain(&resolved) {
            continue;
        }

        let normalized = normalize_url(resolved.as_str());
        if in_page.insert(normalized.clone()) {
            links.push(normalized);
        }
    }

    links
}

// Resolves an href to an absolute URL without its fragment
//
// Returns None for non-navigable schemes and unparseable hrefs.
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return None;
    }

    let mut url = base.join(href).ok()?;
    url.set_fragment(None);
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> CrawlConfig {
        CrawlConfig::new("https://example.test/", 10).unwrap()
    }

    fn links(page_url: &str, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        extract_links(page_url, &document, &config())
    }

    #[test]
    fn test_relative_and_absolute_links() {
        let html = r#"
            <a href="/about">About</a>
            <a href="https://example.test/contact/">Contact</a>
            <a href="news">News</a>
        "#;
        assert_eq!(
            links("https://example.test/docs/", html),
            vec![
                "https://example.test/about",
                "https://example.test/contact",
                "https://example.test/docs/news",
            ]
        );
    }

    #[test]
    fn test_skip_non_navigable_schemes() {
        let html = r#"
            <a href="mailto:a@b.com">Mail</a>
            <a href="tel:+81000000">Call</a>
            <a href="javascript:void(0)">JS</a>
            <a href=" JavaScript:alert(1)">JS</a>
        "#;
        assert!(links("https://example.test", html).is_empty());
    }

    #[test]
    fn test_other_domains_are_dropped() {
        let html = r#"
            <a href="https://other.test/">Other</a>
            <a href="https://www.example.test/">Subdomain</a>
            <a href="ftp://example.test/file">FTP</a>
            <a href="http://example.test/plain">Plain http</a>
        "#;
        assert_eq!(links("https://example.test", html), vec!["http://example.test/plain"]);
    }

    #[test]
    fn test_fragments_and_duplicates_collapse() {
        let html = r##"
            <a href="/a#one">A</a>
            <a href="/a/#two">A again</a>
            <a href="  /a  ">A with spaces</a>
            <a href="#top">Top</a>
        "##;
        assert_eq!(
            links("https://example.test/page", html),
            vec!["https://example.test/a", "https://example.test/page"]
        );
    }

    #[test]
    fn test_anchor_without_href_is_ignored() {
        let html = r#"<a name="x">no href</a><a href="/b">B</a>"#;
        assert_eq!(links("https://example.test", html), vec!["https://example.test/b"]);
    }
}
