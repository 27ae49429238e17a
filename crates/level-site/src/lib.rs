//! Single-level page indexing for file-based content sites.
//!
//! Instead of loading the whole content tree for every request, only the
//! directory of the served page is scanned. This crate provides:
//! - [`LevelLoader`]: the request-scoped pipeline entry point
//! - [`Scanner`]: page discovery in one directory
//! - [`PageIndexBuilder`] and [`PageIndex`]: the ordered id -> page mapping
//! - [`resolve_navigation`]: previous/next siblings of the served page
//! - [`breadcrumbs`] and [`BreadcrumbHelper`]: ancestor trails
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use level_meta::FrontMatterParser;
//! use level_site::{LevelConfig, LevelLoader, LevelOutcome, RequestContext, ServedPage, SiteUrls};
//!
//! let loader = LevelLoader::new(
//!     LevelConfig::default(),
//!     Arc::new(FrontMatterParser::new()),
//!     Arc::new(SiteUrls::new("/")),
//! );
//! let served = ServedPage {
//!     file: PathBuf::from("content/blog/post.md"),
//!     ..Default::default()
//! };
//!
//! if let LevelOutcome::Level(level) = loader.load(&served, &RequestContext::default()) {
//!     for page in &level.pages {
//!         println!("{} -> {}", page.id, page.url);
//!     }
//! }
//! ```

mod breadcrumbs;
mod id;
mod index;
mod loader;
mod navigation;
mod order;
mod page;
mod scanner;
mod urls;

pub use breadcrumbs::{BreadcrumbHelper, BreadcrumbItem, breadcrumbs};
pub use id::{index_path, is_not_found_page, page_id};
pub use index::PageIndexBuilder;
pub use loader::{LevelConfig, LevelLoader, LevelOutcome, LevelPages, RequestContext, ScanMode};
pub use navigation::{NavigationResult, resolve_navigation};
pub use order::{OrderBy, SortOrder};
pub use page::{PageIndex, PageRecord, ServedPage};
pub use scanner::Scanner;
pub use urls::{SiteUrls, UrlResolver};
