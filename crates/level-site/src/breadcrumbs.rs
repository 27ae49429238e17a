//! Breadcrumb trails built from document ids.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::id::index_path;

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display label (the path segment).
    pub label: String,
    /// Document id of the ancestor.
    pub id: String,
}

/// Build the breadcrumb trail of a document id.
///
/// Walks the id's segments from the root and emits one item for every
/// ancestor directory that has an index page on disk. Directories without
/// one are left out, so the trail may be sparse. The document itself is the
/// last candidate: `a/b/c` yields an item for `a/b/c` if `a/b/c/index` exists.
///
/// # Arguments
///
/// * `id` - Document id (e.g., "guide/setup"); empty or `None` gives no trail
/// * `content_root` - Content root directory
/// * `content_ext` - Extension of page files, including the dot
#[must_use]
pub fn breadcrumbs(id: Option<&str>, content_root: &Path, content_ext: &str) -> Vec<BreadcrumbItem> {
    let Some(id) = id.filter(|id| !id.is_empty()) else {
        return Vec::new();
    };

    let mut trail = Vec::new();
    let mut prefix = String::new();
    for segment in id.split('/') {
        // Never let a segment walk outside the content root.
        if segment.is_empty() || segment == "." || segment == ".." {
            continue;
        }
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);

        if index_path(content_root, &prefix, content_ext).is_file() {
            trail.push(BreadcrumbItem {
                label: segment.to_owned(),
                id: prefix.clone(),
            });
        }
    }
    trail
}

/// Breadcrumb builder bound to one content tree, for use from templates.
#[derive(Clone, Debug)]
pub struct BreadcrumbHelper {
    content_root: PathBuf,
    content_ext: String,
}

impl BreadcrumbHelper {
    pub fn new(content_root: impl Into<PathBuf>, content_ext: impl Into<String>) -> Self {
        Self {
            content_root: content_root.into(),
            content_ext: content_ext.into(),
        }
    }

    /// Trail of `id`; see [`breadcrumbs`].
    #[must_use]
    pub fn trail(&self, id: Option<&str>) -> Vec<BreadcrumbItem> {
        breadcrumbs(id, &self.content_root, &self.content_ext)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn item(label: &str, id: &str) -> BreadcrumbItem {
        BreadcrumbItem {
            label: label.to_owned(),
            id: id.to_owned(),
        }
    }

    fn write_index(root: &Path, dir: &str) {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.md"), "# Index").unwrap();
    }

    #[test]
    fn test_breadcrumbs_empty_id() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(breadcrumbs(Some(""), temp_dir.path(), ".md").is_empty());
    }

    #[test]
    fn test_breadcrumbs_no_id() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(breadcrumbs(None, temp_dir.path(), ".md").is_empty());
    }

    #[test]
    fn test_breadcrumbs_sparse_trail() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_index(root, "a");
        write_index(root, "a/b/c");
        fs::create_dir_all(root.join("a/b")).unwrap();

        let trail = breadcrumbs(Some("a/b/c"), root, ".md");

        assert_eq!(trail, vec![item("a", "a"), item("c", "a/b/c")]);
    }

    #[test]
    fn test_breadcrumbs_full_trail() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_index(root, "guide");
        write_index(root, "guide/setup");

        let trail = breadcrumbs(Some("guide/setup"), root, ".md");

        assert_eq!(trail, vec![item("guide", "guide"), item("setup", "guide/setup")]);
    }

    #[test]
    fn test_breadcrumbs_leaf_page_not_included() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_index(root, "guide");
        fs::write(root.join("guide").join("setup.md"), "# Setup").unwrap();

        let trail = breadcrumbs(Some("guide/setup"), root, ".md");

        assert_eq!(trail, vec![item("guide", "guide")]);
    }

    #[test]
    fn test_breadcrumbs_uses_extension() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_index(root, "guide");

        assert!(breadcrumbs(Some("guide"), root, ".txt").is_empty());
    }

    #[test]
    fn test_breadcrumbs_skip_empty_and_dot_segments() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_index(root, "a/b");
        write_index(root, "a");

        let trail = breadcrumbs(Some("/a//./../b/"), root, ".md");

        assert_eq!(trail, vec![item("a", "a"), item("b", "a/b")]);
    }

    #[test]
    fn test_breadcrumbs_directory_index_must_be_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a").join("index.md")).unwrap();

        assert!(breadcrumbs(Some("a"), root, ".md").is_empty());
    }

    #[test]
    fn test_helper_trail() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_index(temp_dir.path(), "docs");
        let helper = BreadcrumbHelper::new(temp_dir.path(), ".md");

        assert_eq!(helper.trail(Some("docs/intro")), vec![item("docs", "docs")]);
        assert!(helper.trail(None).is_empty());
    }

    #[test]
    fn test_trail_serializes_as_label_id_objects() {
        let value = serde_json::to_value(vec![item("a", "a")]).unwrap();
        assert_eq!(value, serde_json::json!([{ "label": "a", "id": "a" }]));
    }
}
