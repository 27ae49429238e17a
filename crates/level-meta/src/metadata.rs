//! Page metadata types.
//!
//! Provides the [`Metadata`] struct for front matter values. Known fields are
//! first-class; everything else ends up in [`Metadata::extra`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parsed front matter of a page.
///
/// All fields are optional. When a field is `None`, the front matter did not
/// set it (or set it to an empty value).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short page description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Page author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Date as written in the front matter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Date rendered with the configured date format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_formatted: Option<String>,

    /// Unix timestamp derived from `date` (or given explicitly).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,

    /// Robots directive for the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,

    /// Template name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Hidden pages are indexed but should not be listed by templates.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,

    /// Front matter keys outside the known set, keyed in lowercase.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,

    /// Parse failure message when the front matter could not be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl Metadata {
    /// Check if metadata has any non-default values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.author.is_none()
            && self.date.is_none()
            && self.date_formatted.is_none()
            && self.time.is_none()
            && self.robots.is_none()
            && self.template.is_none()
            && !self.hidden
            && self.extra.is_empty()
    }

    /// Look up a value by metadata key, known fields included.
    ///
    /// Returns `None` for keys that are unset.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<serde_json::Value> {
        let text = |v: &Option<String>| v.clone().map(serde_json::Value::String);
        match key {
            "title" => text(&self.title),
            "description" => text(&self.description),
            "author" => text(&self.author),
            "date" => text(&self.date),
            "date_formatted" => text(&self.date_formatted),
            "time" => self.time.map(serde_json::Value::from),
            "robots" => text(&self.robots),
            "template" => text(&self.template),
            "hidden" => Some(serde_json::Value::Bool(self.hidden)),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Store a value under a metadata key.
    ///
    /// Known keys are coerced into their typed field; values that do not fit
    /// (e.g. a list as `title`) leave the field unset. Unknown keys go to
    /// [`Metadata::extra`].
    pub fn set(&mut self, key: &str, value: serde_json::Value) {
        match key {
            "title" => self.title = scalar_string(&value),
            "description" => self.description = scalar_string(&value),
            "author" => self.author = scalar_string(&value),
            "date" => self.date = scalar_string(&value),
            "date_formatted" => self.date_formatted = scalar_string(&value),
            "time" => self.time = scalar_i64(&value),
            "robots" => self.robots = scalar_string(&value),
            "template" => self.template = scalar_string(&value),
            "hidden" => self.hidden = scalar_bool(&value),
            _ => {
                self.extra.insert(key.to_owned(), value);
            }
        }
    }
}

/// Render a scalar as a non-empty string.
fn scalar_string(value: &serde_json::Value) -> Option<String> {
    let text = match value {
        serde_json::Value::String(s) => s.trim().to_owned(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn scalar_i64(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_bool(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => matches!(s.trim(), "true" | "yes" | "on" | "1"),
        serde_json::Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        _ => false,
    }
}

/// Error type for metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Front matter is not valid YAML.
    #[error("Invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Parsing error (format-specific).
    #[error("{0}")]
    Parse(String),
}
