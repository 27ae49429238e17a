//! Page discovery within a single content directory.
//!
//! The scanner only identifies files that could form pages. It never reads
//! file content; [`PageIndexBuilder`](crate::PageIndexBuilder) does that.

use std::fs;
use std::path::{Path, PathBuf};

use crate::id::INDEX_STEM;

/// Discovers page files among the immediate entries of one directory.
///
/// For each entry:
/// 1. A regular file ending with the content extension is a page
/// 2. A directory containing `index` + extension contributes that index file
/// 3. Anything else (assets, other extensions, directories without an
///    index page) is skipped
///
/// There is no recursion beyond the inner index check. The output follows
/// the order of the directory listing, which is not sorted.
#[derive(Clone, Debug)]
pub struct Scanner {
    content_ext: String,
    index_name: String,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `content_ext` - Extension of page files, including the dot (e.g., ".md")
    pub fn new(content_ext: impl Into<String>) -> Self {
        let content_ext = content_ext.into();
        Self {
            index_name: format!("{INDEX_STEM}{content_ext}"),
            content_ext,
        }
    }

    /// Scan `dir` and return the paths of its pages.
    ///
    /// Returns an empty Vec if `dir` doesn't exist or is not a directory;
    /// sparse content trees legitimately lack directories.
    pub fn scan(&self, dir: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "Level directory does not exist");
                return Vec::new();
            }
            Err(e) => {
                if dir.is_dir() {
                    tracing::warn!(dir = %dir.display(), error = %e, "Failed to list level directory");
                }
                return Vec::new();
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            let path = entry.path();
            // Follow symlinks: a linked page or directory counts as its target.
            let Ok(meta) = fs::metadata(&path) else {
                tracing::debug!(path = %path.display(), "Skipping entry that cannot be stat'ed");
                continue;
            };

            if meta.is_file() {
                if self.is_page_name(&entry.file_name().to_string_lossy()) {
                    files.push(path);
                }
            } else if meta.is_dir() {
                let index = path.join(&self.index_name);
                if index.is_file() {
                    files.push(index);
                }
            }
        }

        tracing::debug!(dir = %dir.display(), pages = files.len(), "Scanned level directory");
        files
    }

    fn is_page_name(&self, name: &str) -> bool {
        name.len() > self.content_ext.len() && name.ends_with(&self.content_ext)
    }
}
