// src/crawl/url_filter.rs
// =============================================================================
// Two small, pure helpers the engine runs on every URL:
//
// - normalize_url: the key we use for dedup ("have we seen this already?")
// - is_excluded_extension: skip images, stylesheets, archives... by suffix
//
// Neither function touches the network.
// =============================================================================

use url::Url;

// Canonical form of a URL for dedup and comparison
//
// Only two things are changed:
// - the fragment (everything from '#') is dropped
// - trailing slashes are removed
//
// Examples:
//   "https://x.com/a/"     -> "https://x.com/a"
//   "https://x.com/a#frag" -> "https://x.com/a"
//   "https://x.com/"       -> "https://x.com"
//
// Query order, percent-encoding case and default ports are left alone.
pub fn normalize_url(url: &str) -> String {
    let without_fragment = match url.find('#') {
        Some(index) => &url[..index],
        None => url,
    };

    without_fragment.trim_end_matches('/').to_string()
}

// True if the URL's path ends with one of the excluded suffixes
//
// The comparison is case-insensitive ("/doc.PDF" is excluded). If the URL
// cannot be parsed we fall back to checking the whole string.
pub fn is_excluded_extension(url: &str, excluded: &[String]) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => url.to_lowercase(),
    };

    excluded.iter().any(|ext| path.ends_with(ext.as_str()))
}
