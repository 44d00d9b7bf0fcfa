//! Path utilities for template normalization and match-path splitting
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

use url::Url;

/// Prefixes template text with `/` unless it already has one
///
/// Blank text is returned untouched.
///
/// # Examples
///
/// ```
/// use rhtmx_urit::path::slash_prefix;
/// use std::borrow::Cow;
///
/// assert!(matches!(slash_prefix("/foo"), Cow::Borrowed("/foo")));
/// assert_eq!(slash_prefix("foo/bar"), "/foo/bar");
/// assert_eq!(slash_prefix("  "), "  ");
/// ```
pub fn slash_prefix(text: &str) -> Cow<'_, str> {
    if text.trim().is_empty() || text.starts_with('/') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("/{}", text))
    }
}

/// Extracts the path to match from a plain path or an absolute URL string
///
/// Anything containing `://` is treated as a URL; one that does not parse
/// yields `None`.
///
/// # Examples
///
/// ```
/// use rhtmx_urit::path::match_path;
///
/// assert_eq!(match_path("/foo/bar").as_deref(), Some("/foo/bar"));
/// assert_eq!(match_path("https://my.org/foo/bar?x=1").as_deref(), Some("/foo/bar"));
/// assert_eq!(match_path("://my.org"), None);
/// ```
pub fn match_path(input: &str) -> Option<Cow<'_, str>> {
    if !input.contains("://") {
        return Some(Cow::Borrowed(input));
    }
    match Url::parse(input) {
        Ok(url) => Some(Cow::Owned(url.path().to_string())),
        Err(err) => {
            tracing::trace!(input, %err, "match input is not a valid url");
            None
        }
    }
}

/// Splits a concrete path into segments for matching
///
/// A single leading and a single trailing empty token are ignored; any other
/// empty segment means the path cannot match anything, so `None` is returned.
///
/// # Examples
///
/// ```
/// use rhtmx_urit::path::split_path;
///
/// assert_eq!(split_path("/foo/bar/"), Some(vec!["foo", "bar"]));
/// assert_eq!(split_path("foo/bar"), Some(vec!["foo", "bar"]));
/// assert_eq!(split_path("/"), Some(vec![]));
/// assert_eq!(split_path("/foo//bar"), None);
/// ```
///
/// # Performance
///
/// - O(n) where n is path length
/// - Segments borrow from the input (no per-segment allocation)
pub fn split_path(path: &str) -> Option<Vec<&str>> {
    let mut segments: Vec<&str> = path.split('/').collect();
    if segments.len() > 1 && segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    if segments.first().is_some_and(|s| s.is_empty()) {
        segments.remove(0);
    }
    segments
        .iter()
        .all(|s| !s.is_empty())
        .then_some(segments)
}
