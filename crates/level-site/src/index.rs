//! Building the [`PageIndex`] of one level.
//!
//! Turns the scanner's file list into an ordered id -> page mapping:
//! 1. Derive the document id of each file
//! 2. Drop the not-found page (`404` + extension)
//! 3. Drop leaf files shadowed by a same-named directory's index file
//! 4. Load content: reuse the served page, read and parse everything else
//! 5. Keep going when a sibling's front matter is malformed

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use level_meta::{MetaHeaders, MetaParser, Metadata};

use crate::id::{INDEX_STEM, index_path, is_not_found_page, page_id};
use crate::page::{PageIndex, PageRecord, ServedPage};
use crate::urls::UrlResolver;

/// Builds a [`PageIndex`] from scanned page files.
pub struct PageIndexBuilder<'a> {
    content_root: &'a Path,
    content_ext: &'a str,
    parser: &'a dyn MetaParser,
    headers: &'a MetaHeaders,
    urls: &'a dyn UrlResolver,
    served: Option<&'a ServedPage>,
}

impl<'a> PageIndexBuilder<'a> {
    /// Create a new builder.
    ///
    /// # Arguments
    ///
    /// * `content_root` - Directory all document ids are relative to
    /// * `content_ext` - Extension of page files, including the dot
    /// * `parser` - Front matter parser for pages read from disk
    /// * `headers` - Header schema handed to the parser
    /// * `urls` - Id to URL mapping
    pub fn new(
        content_root: &'a Path,
        content_ext: &'a str,
        parser: &'a dyn MetaParser,
        headers: &'a MetaHeaders,
        urls: &'a dyn UrlResolver,
    ) -> Self {
        Self {
            content_root,
            content_ext,
            parser,
            headers,
            urls,
            served: None,
        }
    }

    /// Reuse the already loaded content of the served page.
    #[must_use]
    pub fn with_served(mut self, served: &'a ServedPage) -> Self {
        self.served = Some(served);
        self
    }

    /// Build the index, preserving the order of `files`.
    ///
    /// Never fails: pages that cannot be read are skipped. Pages whose front
    /// matter cannot be parsed, or whose content is not UTF-8, are indexed
    /// with a `parse_error`.
    pub fn build(&self, files: &[PathBuf]) -> PageIndex {
        let candidates: HashSet<&Path> = files.iter().map(PathBuf::as_path).collect();

        let index: PageIndex = files
            .iter()
            .filter_map(|file| self.build_page(file, &candidates))
            .collect();

        tracing::debug!(
            root = %self.content_root.display(),
            files = files.len(),
            pages = index.len(),
            "Built level index"
        );
        index
    }

    fn build_page(&self, file: &Path, candidates: &HashSet<&Path>) -> Option<PageRecord> {
        if is_not_found_page(file, self.content_ext) {
            return None;
        }

        let Some(id) = page_id(file, self.content_root, self.content_ext) else {
            if file.starts_with(self.content_root) {
                tracing::warn!(path = %file.display(), "Cannot derive document id, skipping");
            } else {
                // Scanned files live under the content root by construction.
                tracing::error!(
                    path = %file.display(),
                    root = %self.content_root.display(),
                    "Page file is not under the content root"
                );
            }
            return None;
        };

        let shadow = index_path(self.content_root, &id, self.content_ext);
        if shadow != file && candidates.contains(shadow.as_path()) {
            tracing::debug!(path = %file.display(), index = %shadow.display(), "Leaf page shadowed by directory index");
            return None;
        }

        let url = if shadow == file {
            self.urls.page_url(&format!("{id}/{INDEX_STEM}"))
        } else {
            self.urls.page_url(&id)
        };

        if let Some(served) = self.served.filter(|s| s.file == file) {
            return Some(PageRecord::new(
                id,
                url,
                file.to_path_buf(),
                served.raw_content.clone(),
                served.meta.clone(),
                Some(served.content.clone()),
            ));
        }

        let bytes = match fs::read(file) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "Failed to read page, skipping");
                return None;
            }
        };
        let (raw_content, meta) = match String::from_utf8(bytes) {
            Ok(raw) => {
                let meta = self.parse_meta(file, &raw);
                (raw, meta)
            }
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e.utf8_error(), "Page is not valid UTF-8");
                let raw = String::from_utf8_lossy(e.as_bytes()).into_owned();
                let mut meta = self.parse_meta(file, &raw);
                if meta.parse_error.is_none() {
                    meta.parse_error = Some(format!("invalid UTF-8 in page content: {}", e.utf8_error()));
                }
                (raw, meta)
            }
        };

        Some(PageRecord::new(
            id,
            url,
            file.to_path_buf(),
            raw_content,
            meta,
            None,
        ))
    }

    /// Parse front matter, degrading to empty metadata with `parse_error` set.
    fn parse_meta(&self, file: &Path, raw_content: &str) -> Metadata {
        match self.parser.parse(raw_content, self.headers) {
            Ok(meta) => meta,
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "Failed to parse front matter");
                let mut meta = self.parser.parse("", self.headers).unwrap_or_default();
                meta.parse_error = Some(e.to_string());
                meta
            }
        }
    }
}
