//! Header schema for front matter.
//!
//! Front matter is written with human-friendly header names (`Title`,
//! `Formatted Date`); the schema maps each header to the metadata key it is
//! stored under (`title`, `date_formatted`).

/// Ordered mapping of metadata key to header name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaHeaders {
    entries: Vec<(String, String)>,
}

/// Headers every page understands.
const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("title", "Title"),
    ("description", "Description"),
    ("author", "Author"),
    ("date", "Date"),
    ("date_formatted", "Formatted Date"),
    ("time", "Time"),
    ("robots", "Robots"),
    ("template", "Template"),
    ("hidden", "Hidden"),
];

impl Default for MetaHeaders {
    fn default() -> Self {
        Self {
            entries: DEFAULT_HEADERS
                .iter()
                .map(|(key, header)| ((*key).to_owned(), (*header).to_owned()))
                .collect(),
        }
    }
}

impl MetaHeaders {
    /// Create an empty schema.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a header, replacing any header previously stored under `key`.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>, key: impl Into<String>) -> Self {
        let key = key.into();
        let header = header.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = header,
            None => self.entries.push((key, header)),
        }
        self
    }

    /// Resolve a front matter key to its metadata key.
    ///
    /// Header names match case-insensitively. Keys that are already metadata
    /// keys map to themselves; unknown keys are returned lowercased.
    #[must_use]
    pub fn resolve(&self, name: &str) -> String {
        let lower = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(key, header)| header.to_lowercase() == lower || *key == lower)
            .map_or(lower, |(key, _)| key.clone())
    }

    /// Iterate over `(key, header)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, h)| (k.as_str(), h.as_str()))
    }

    /// Number of registered headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the schema has no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
