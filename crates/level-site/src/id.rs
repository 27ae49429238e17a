//! Document id derivation.
//!
//! A document id is the slash-separated path of a page file relative to the
//! content root, without the content extension:
//!
//! - `content/guide.md` -> `"guide"`
//! - `content/blog/2024/post.md` -> `"blog/2024/post"`
//! - `content/blog/index.md` -> `"blog"` (index files stand for their directory)
//! - `content/index.md` -> `"index"` (the root page keeps its name)
//!
//! Derivation works on path components, not string lengths, so a trailing
//! slash on the content root is irrelevant, `/content2/x.md` is never "under"
//! `/content`, and only the end of the file name is treated as the extension.

use std::path::{Component, Path, PathBuf};

/// File stem of index-bearing directories.
pub const INDEX_STEM: &str = "index";

/// File stem of the not-found page, which is never indexed.
pub const NOT_FOUND_STEM: &str = "404";

/// Derive the document id of `file`.
///
/// Returns `None` if `file` does not lie under `content_root`, does not end
/// with `content_ext`, or contains components that cannot form an id
/// (`..`, non-UTF-8 names, an empty stem).
#[must_use]
pub fn page_id(file: &Path, content_root: &Path, content_ext: &str) -> Option<String> {
    let relative = file.strip_prefix(content_root).ok()?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => segments.push(name.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }

    let file_name = segments.pop()?;
    let stem = file_name
        .strip_suffix(content_ext)
        .filter(|stem| !stem.is_empty())?;

    if stem == INDEX_STEM && !segments.is_empty() {
        return Some(segments.join("/"));
    }

    segments.push(stem);
    Some(segments.join("/"))
}

/// Path of the index file that would represent `id` as a directory.
///
/// `index_path("content", "topic", ".md")` is `content/topic/index.md`.
#[must_use]
pub fn index_path(content_root: &Path, id: &str, content_ext: &str) -> PathBuf {
    content_root
        .join(id)
        .join(format!("{INDEX_STEM}{content_ext}"))
}

/// Lexically resolve `.` and `..` components of `path`.
///
/// The filesystem is not consulted, so symlinks are not followed. A `..` that
/// would climb above the start of a relative path is kept.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !matches!(
                    normalized.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_))
                ) {
                    normalized.push(component);
                }
            }
            _ => normalized.push(component),
        }
    }
    normalized
}

/// Check whether `file` is the not-found page (`404` + extension).
#[must_use]
pub fn is_not_found_page(file: &Path, content_ext: &str) -> bool {
    file.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(content_ext))
        .is_some_and(|stem| stem == NOT_FOUND_STEM)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(file: &str, root: &str) -> Option<String> {
        page_id(Path::new(file), Path::new(root), ".md")
    }

    #[test]
    fn test_page_id_simple() {
        assert_eq!(id("/site/content/guide.md", "/site/content"), Some("guide".to_owned()));
    }

    #[test]
    fn test_page_id_nested() {
        assert_eq!(
            id("/site/content/blog/2024/post.md", "/site/content"),
            Some("blog/2024/post".to_owned())
        );
    }

    #[test]
    fn test_page_id_index_folds_into_directory() {
        assert_eq!(id("/c/blog/index.md", "/c"), Some("blog".to_owned()));
        assert_eq!(id("/c/a/b/index.md", "/c"), Some("a/b".to_owned()));
    }

    #[test]
    fn test_page_id_root_index_keeps_name() {
        assert_eq!(id("/c/index.md", "/c"), Some("index".to_owned()));
    }

    #[test]
    fn test_page_id_root_with_trailing_slash() {
        assert_eq!(id("/c/guide.md", "/c/"), Some("guide".to_owned()));
    }

    #[test]
    fn test_page_id_relative_paths() {
        assert_eq!(id("content/guide.md", "content"), Some("guide".to_owned()));
    }

    #[test]
    fn test_page_id_multi_dot_name() {
        assert_eq!(id("/c/v1.2.notes.md", "/c"), Some("v1.2.notes".to_owned()));
    }

    #[test]
    fn test_page_id_extension_in_directory_name() {
        assert_eq!(id("/c/old.md/page.md", "/c"), Some("old.md/page".to_owned()));
    }

    #[test]
    fn test_page_id_outside_root() {
        assert_eq!(id("/other/guide.md", "/c"), None);
    }

    #[test]
    fn test_page_id_sibling_prefix_is_not_under_root() {
        assert_eq!(id("/content2/guide.md", "/content"), None);
    }

    #[test]
    fn test_page_id_wrong_extension() {
        assert_eq!(id("/c/image.png", "/c"), None);
    }

    #[test]
    fn test_page_id_empty_stem() {
        assert_eq!(id("/c/.md", "/c"), None);
    }

    #[test]
    fn test_page_id_root_itself() {
        assert_eq!(id("/c", "/c"), None);
    }

    #[test]
    fn test_page_id_parent_component() {
        assert_eq!(id("/c/../c/guide.md", "/c"), None);
    }

    #[test]
    fn test_index_path() {
        assert_eq!(
            index_path(Path::new("/c"), "topic", ".md"),
            PathBuf::from("/c/topic/index.md")
        );
        assert_eq!(
            index_path(Path::new("/c"), "a/b", ".txt"),
            PathBuf::from("/c/a/b/index.txt")
        );
    }

    #[test]
    fn test_is_not_found_page() {
        assert!(is_not_found_page(Path::new("/c/404.md"), ".md"));
        assert!(is_not_found_page(Path::new("/c/sub/404.md"), ".md"));
        assert!(!is_not_found_page(Path::new("/c/4040.md"), ".md"));
        assert!(!is_not_found_page(Path::new("/c/404.txt"), ".md"));
        assert!(!is_not_found_page(Path::new("/c/404"), ".md"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/c/blog/../blog/./x.md")), PathBuf::from("/c/blog/x.md"));
        assert_eq!(normalize_path(Path::new("/../c/x.md")), PathBuf::from("/c/x.md"));
        assert_eq!(normalize_path(Path::new("../c/x.md")), PathBuf::from("../c/x.md"));
        assert_eq!(normalize_path(Path::new("content/a/../b.md")), PathBuf::from("content/b.md"));
    }
}
