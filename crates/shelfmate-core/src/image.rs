//! Cover image URL resolution.
//!
//! Turns whatever the artifacts carry for a book's cover into a URL a page can
//! display: insecure links are upgraded to https and missing links are
//! replaced by a placeholder image that spells out the title and author.
//! Nothing here touches the network.

use tracing::trace;

use crate::defaults::{
    INSECURE_SCHEME, PLACEHOLDER_AUTHOR_CHARS, PLACEHOLDER_BASE_URL, PLACEHOLDER_SEPARATOR,
    PLACEHOLDER_TITLE_CHARS, SECURE_SCHEME,
};
use crate::models::non_empty;

/// Normalizes or synthesizes displayable cover URLs.
///
/// # Example
///
/// ```
/// use shelfmate_core::ImageResolver;
///
/// let resolver = ImageResolver::new();
/// assert_eq!(
///     resolver.resolve(Some("http://x.com/a.jpg"), "Dune", "Frank Herbert"),
///     "https://x.com/a.jpg"
/// );
/// assert!(resolver
///     .resolve(None, "Dune", "Frank Herbert")
///     .ends_with("?text=Dune%0AFrank+Herbert"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    placeholder_base: String,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self {
            placeholder_base: PLACEHOLDER_BASE_URL.to_string(),
        }
    }
}

impl ImageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different placeholder endpoint (e.g. a self-hosted one).
    pub fn with_placeholder_base(base: impl Into<String>) -> Self {
        Self {
            placeholder_base: base.into(),
        }
    }

    pub fn placeholder_base(&self) -> &str {
        &self.placeholder_base
    }

    /// Resolve a single raw URL. Never fails and never returns an empty string.
    ///
    /// Rules, first match wins:
    /// 1. absent, empty or whitespace-only → placeholder
    /// 2. `https://…` → unchanged
    /// 3. `http://…` → scheme upgraded to `https://`
    /// 4. anything else → unchanged
    pub fn resolve(&self, raw: Option<&str>, title: &str, author: &str) -> String {
        let url = match raw {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                trace!(
                    subsystem = "core",
                    component = "image_resolver",
                    title,
                    "No image URL, synthesizing placeholder"
                );
                return self.placeholder(title, author);
            }
        };

        if url.starts_with(SECURE_SCHEME) {
            url.to_string()
        } else if url.starts_with(INSECURE_SCHEME) {
            url.replacen(INSECURE_SCHEME, SECURE_SCHEME, 1)
        } else {
            url.to_string()
        }
    }

    /// Resolve the first non-empty candidate, in order of preference.
    ///
    /// Callers pass candidates as large → medium → fallback.
    pub fn resolve_first(&self, candidates: &[Option<&str>], title: &str, author: &str) -> String {
        self.resolve(Self::select(candidates), title, author)
    }

    /// The candidate [`resolve_first`](Self::resolve_first) passes on: the
    /// first one that is present and non-empty.
    pub fn select<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
        candidates.iter().find_map(|c| non_empty(*c))
    }

    /// Whether `raw` resolves to a placeholder rather than a real URL.
    pub fn is_placeholder_input(raw: Option<&str>) -> bool {
        raw.map_or(true, |url| url.trim().is_empty())
    }

    /// Placeholder URL embedding a shortened title and author as query text.
    pub fn placeholder(&self, title: &str, author: &str) -> String {
        format!(
            "{}?text={}{}{}",
            self.placeholder_base,
            placeholder_text(title, PLACEHOLDER_TITLE_CHARS),
            PLACEHOLDER_SEPARATOR,
            placeholder_text(author, PLACEHOLDER_AUTHOR_CHARS),
        )
    }
}

/// Spaces become `+`, then the text is cut to `max_chars` characters.
fn placeholder_text(text: &str, max_chars: usize) -> String {
    text.chars()
        .take(max_chars)
        .map(|c| if c == ' ' { '+' } else { c })
        .collect()
}
