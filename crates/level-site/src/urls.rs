//! Document id to URL mapping.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::id::INDEX_STEM;

/// Characters escaped inside a URL path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Maps document ids to public URLs.
///
/// Hosts with their own routing implement this trait; [`SiteUrls`] covers
/// the common base-URL scheme.
pub trait UrlResolver: Send + Sync {
    /// URL of the page with the given document id.
    ///
    /// Directory index pages are passed as `<id>/index` so resolvers can give
    /// them a directory URL.
    fn page_url(&self, id: &str) -> String;
}

/// Base-URL based page URLs.
///
/// - `index` maps to the base URL itself
/// - a trailing `/index` becomes a trailing slash (`docs/index` -> `docs/`)
/// - with URL rewriting enabled ids are appended as a path, otherwise as a
///   query string (`/?docs/setup`)
#[derive(Clone, Debug)]
pub struct SiteUrls {
    base_url: String,
    rewrite_url: bool,
}

impl SiteUrls {
    /// Create a resolver for `base_url` with URL rewriting enabled.
    ///
    /// A trailing slash is appended to the base URL if missing.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            rewrite_url: true,
        }
    }

    /// Enable or disable URL rewriting.
    #[must_use]
    pub fn with_rewrite(mut self, rewrite_url: bool) -> Self {
        self.rewrite_url = rewrite_url;
        self
    }

    /// The normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl UrlResolver for SiteUrls {
    fn page_url(&self, id: &str) -> String {
        let path = if id == INDEX_STEM {
            ""
        } else if let Some(dir) = id.strip_suffix(INDEX_STEM).filter(|d| d.ends_with('/')) {
            dir
        } else {
            id
        };

        if path.is_empty() {
            return self.base_url.clone();
        }

        let encoded = path
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");

        if self.rewrite_url {
            format!("{}{encoded}", self.base_url)
        } else {
            format!("{}?{encoded}", self.base_url)
        }
    }
}
