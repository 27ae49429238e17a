//! Request-scoped level loading.
//!
//! [`LevelLoader`] composes the pipeline for one served page:
//!
//! 1. Decide the scan mode from the request (privileged requests keep the
//!    host's full scan)
//! 2. Scan the directory of the served file
//! 3. Build the [`PageIndex`] of that level
//! 4. Optionally sort it by the configured page order
//! 5. Resolve previous/next navigation
//!
//! The result is returned by value; no configuration or host state is
//! changed along the way.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use level_meta::FrontMatterParser;
//! use level_site::{LevelConfig, LevelLoader, LevelOutcome, RequestContext, SiteUrls};
//!
//! let loader = LevelLoader::new(
//!     LevelConfig::default(),
//!     Arc::new(FrontMatterParser::new()),
//!     Arc::new(SiteUrls::new("/")),
//! );
//! if let LevelOutcome::Level(level) = loader.load(&served, &RequestContext::default()) {
//!     println!("{} pages, next: {:?}", level.pages.len(), level.next.map(|p| p.id));
//! }
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use level_meta::{MetaHeaders, MetaParser};
use serde::Serialize;

use crate::breadcrumbs::{BreadcrumbHelper, BreadcrumbItem, breadcrumbs};
use crate::id::normalize_path;
use crate::index::PageIndexBuilder;
use crate::navigation::{NavigationResult, resolve_navigation};
use crate::order::{OrderBy, SortOrder};
use crate::page::{PageIndex, PageRecord, ServedPage};
use crate::scanner::Scanner;
use crate::urls::UrlResolver;

/// Configuration for [`LevelLoader`].
#[derive(Clone, Debug)]
pub struct LevelConfig {
    /// Content root directory; document ids are relative to it.
    pub content_dir: PathBuf,
    /// Extension of page files, including the dot.
    pub content_ext: String,
    /// Key pages are ordered by.
    pub order_by: OrderBy,
    /// Direction of the page order.
    pub order: SortOrder,
    /// Sort the level before resolving navigation.
    ///
    /// When disabled the index keeps the directory listing order, for hosts
    /// that sort the returned pages themselves.
    pub sort_pages: bool,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            content_ext: ".md".to_owned(),
            order_by: OrderBy::default(),
            order: SortOrder::default(),
            sort_pages: true,
        }
    }
}

/// What the host knows about the current request.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestContext {
    /// Request comes from a privileged client (e.g., a logged-in editor)
    /// that needs the full page tree.
    pub privileged: bool,
}

/// How pages should be loaded for a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanMode {
    /// Only the served page's directory is loaded.
    Level,
    /// The host performs its usual full scan.
    Full,
}

/// Pages of the served page's level.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LevelPages {
    /// Pages of the level, in navigation order.
    pub pages: PageIndex,
    /// The served page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<PageRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRecord>,
}

/// Result of [`LevelLoader::load`].
#[derive(Clone, Debug)]
pub enum LevelOutcome {
    /// The level was loaded.
    Level(LevelPages),
    /// The request needs the full page tree; the host loads it itself.
    FullScan,
}

/// Loads the pages of the served page's directory.
///
/// Holds no per-request state; one loader can serve concurrent requests.
pub struct LevelLoader {
    config: LevelConfig,
    parser: Arc<dyn MetaParser>,
    urls: Arc<dyn UrlResolver>,
    headers: MetaHeaders,
    scanner: Scanner,
}

impl LevelLoader {
    /// Create a loader with the default header schema.
    #[must_use]
    pub fn new(config: LevelConfig, parser: Arc<dyn MetaParser>, urls: Arc<dyn UrlResolver>) -> Self {
        let scanner = Scanner::new(config.content_ext.clone());
        Self {
            config,
            parser,
            urls,
            headers: MetaHeaders::default(),
            scanner,
        }
    }

    /// Use a custom header schema for sibling pages.
    #[must_use]
    pub fn with_headers(mut self, headers: MetaHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// Get the loader configuration.
    #[must_use]
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Decide how pages are loaded for `request`.
    ///
    /// Hosts call this before their own page loading step and skip the full
    /// scan when it returns [`ScanMode::Level`].
    #[must_use]
    pub fn scan_mode(&self, request: &RequestContext) -> ScanMode {
        if request.privileged {
            ScanMode::Full
        } else {
            ScanMode::Level
        }
    }

    /// Load the level of `served`.
    ///
    /// Never fails: missing directories give an empty level, unparseable
    /// siblings are indexed with a parse error, and a served page that cannot
    /// be located simply has no neighbours.
    #[must_use]
    pub fn load(&self, served: &ServedPage, request: &RequestContext) -> LevelOutcome {
        match self.scan_mode(request) {
            ScanMode::Full => {
                tracing::debug!(path = %served.file.display(), "Privileged request, leaving full scan to host");
                LevelOutcome::FullScan
            }
            ScanMode::Level => LevelOutcome::Level(self.load_level(served)),
        }
    }

    fn load_level(&self, served: &ServedPage) -> LevelPages {
        let root = self.config.content_dir.as_path();
        let ext = self.config.content_ext.as_str();

        let file = normalize_path(&served.file);
        let served = if file == served.file {
            Cow::Borrowed(served)
        } else {
            Cow::Owned(ServedPage {
                file,
                ..served.clone()
            })
        };

        let files = match level_dir(&served.file, root) {
            Some(dir) => self.scanner.scan(dir),
            None => {
                tracing::warn!(
                    path = %served.file.display(),
                    root = %root.display(),
                    "Served page is outside the content root"
                );
                Vec::new()
            }
        };

        let mut pages = PageIndexBuilder::new(root, ext, self.parser.as_ref(), &self.headers, self.urls.as_ref())
            .with_served(&served)
            .build(&files);
        if self.config.sort_pages {
            pages = pages.sorted(&self.config.order_by, self.config.order);
        }

        let navigation = resolve_navigation(
            &pages,
            &served.file,
            root,
            ext,
            &self.config.order_by,
            self.config.order,
        );
        let record = |id: &Option<String>| id.as_deref().and_then(|id| pages.get(id)).cloned();
        let NavigationResult {
            current_id,
            previous_id,
            next_id,
        } = &navigation;

        tracing::debug!(
            pages = pages.len(),
            current = ?current_id,
            previous = ?previous_id,
            next = ?next_id,
            "Loaded level"
        );

        LevelPages {
            current: record(current_id),
            previous: record(previous_id),
            next: record(next_id),
            pages,
        }
    }

    /// Breadcrumb trail of `id` within the configured content tree.
    #[must_use]
    pub fn breadcrumbs(&self, id: Option<&str>) -> Vec<BreadcrumbItem> {
        breadcrumbs(id, &self.config.content_dir, &self.config.content_ext)
    }

    /// Breadcrumb helper for the template layer.
    #[must_use]
    pub fn breadcrumb_helper(&self) -> BreadcrumbHelper {
        BreadcrumbHelper::new(&self.config.content_dir, &self.config.content_ext)
    }
}

/// Directory of `file` if it lies within `root`.
fn level_dir<'a>(file: &'a Path, root: &Path) -> Option<&'a Path> {
    file.parent().filter(|dir| dir.starts_with(root))
}
