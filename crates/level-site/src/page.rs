//! Page records and the per-request page index.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;

use level_meta::Metadata;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::order::{OrderBy, SortOrder};

/// The document being served by the current request.
///
/// The host has already read, parsed and rendered this file; the index
/// reuses that work instead of touching the file again.
#[derive(Clone, Debug, Default)]
pub struct ServedPage {
    /// Path of the served file. `.` and `..` components are resolved lexically.
    pub file: PathBuf,
    /// Raw file content, front matter included.
    pub raw_content: String,
    /// Parsed front matter.
    pub meta: Metadata,
    /// Rendered page body.
    pub content: String,
}

/// A page of the current level.
///
/// Title, description, author and date fields are lifted out of the
/// metadata; everything else is reachable through [`PageRecord::meta`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageRecord {
    /// Document id (e.g., "blog/first-post").
    pub id: String,
    /// Public URL of the page.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    /// Raw file content, front matter included.
    pub raw_content: String,
    /// Full parsed front matter.
    pub meta: Metadata,
    /// Rendered body; only set for the served page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Source file of the page.
    #[serde(skip)]
    pub file: PathBuf,
}

impl PageRecord {
    /// Assemble a record, lifting the basic fields out of `meta`.
    #[must_use]
    pub fn new(
        id: String,
        url: String,
        file: PathBuf,
        raw_content: String,
        meta: Metadata,
        content: Option<String>,
    ) -> Self {
        Self {
            id,
            url,
            title: meta.title.clone(),
            description: meta.description.clone(),
            author: meta.author.clone(),
            date: meta.date.clone(),
            date_formatted: meta.date_formatted.clone(),
            time: meta.time,
            raw_content,
            meta,
            content,
            file,
        }
    }

    /// Front matter parse failure of this page, if any.
    #[must_use]
    pub fn parse_error(&self) -> Option<&str> {
        self.meta.parse_error.as_deref()
    }
}

/// Insertion-ordered mapping of document id to [`PageRecord`].
///
/// Pages are stored in a flat list with an id index, giving O(1) lookups by
/// id and by position. Built fresh per request and discarded afterwards.
#[derive(Clone, Debug, Default)]
pub struct PageIndex {
    pages: Vec<PageRecord>,
    positions: HashMap<String, usize>,
}

impl PageIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page. Returns `false` (and keeps the existing page) if the id
    /// is already taken.
    pub(crate) fn insert(&mut self, page: PageRecord) -> bool {
        if self.positions.contains_key(&page.id) {
            return false;
        }
        self.positions.insert(page.id.clone(), self.pages.len());
        self.pages.push(page);
        true
    }

    /// Get a page by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PageRecord> {
        self.positions.get(id).map(|&i| &self.pages[i])
    }

    /// Position of `id` in index order.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Get a page by position.
    #[must_use]
    pub fn get_index(&self, position: usize) -> Option<&PageRecord> {
        self.pages.get(position)
    }

    /// Ids in index order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|p| p.id.as_str())
    }

    /// Pages in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, PageRecord> {
        self.pages.iter()
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the index has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Consume the index, returning pages in index order.
    #[must_use]
    pub fn into_pages(self) -> Vec<PageRecord> {
        self.pages
    }

    /// Reorder the index by `order_by` in the given direction.
    ///
    /// - `Alpha`: by id
    /// - `Date`: by `time`, pages without a time first, id breaks ties
    /// - `Meta(key)`: by the metadata value's text, unset first, id breaks ties
    ///
    /// `Descending` reverses the ascending result.
    #[must_use]
    pub fn sorted(self, order_by: &OrderBy, order: SortOrder) -> Self {
        let mut pages = self.pages;
        pages.sort_by(|a, b| compare_pages(a, b, order_by));
        if order == SortOrder::Descending {
            pages.reverse();
        }
        pages.into_iter().collect()
    }
}

fn compare_pages(a: &PageRecord, b: &PageRecord, order_by: &OrderBy) -> Ordering {
    let primary = match order_by {
        OrderBy::Alpha => Ordering::Equal,
        OrderBy::Date => a.time.cmp(&b.time),
        OrderBy::Meta(key) => meta_text(a, key).cmp(&meta_text(b, key)),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Comparable text of a metadata value; strings compare without quotes.
fn meta_text(page: &PageRecord, key: &str) -> Option<String> {
    match page.meta.value(key)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl FromIterator<PageRecord> for PageIndex {
    fn from_iter<I: IntoIterator<Item = PageRecord>>(iter: I) -> Self {
        let mut index = Self::new();
        for page in iter {
            if index.positions.contains_key(&page.id) {
                tracing::warn!(id = %page.id, "Duplicate page id dropped from index");
                continue;
            }
            index.insert(page);
        }
        index
    }
}

impl<'a> IntoIterator for &'a PageIndex {
    type Item = &'a PageRecord;
    type IntoIter = std::slice::Iter<'a, PageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Serialized as a map from id to page, in index order.
impl Serialize for PageIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pages.len()))?;
        for page in &self.pages {
            map.serialize_entry(&page.id, page)?;
        }
        map.end()
    }
}
