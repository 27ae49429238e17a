//! YAML front matter parsing.
//!
//! A front matter block opens with a `---` line at the very top of the file
//! (after an optional byte order mark) and closes with a `---` or `...` line:
//!
//! ```text
//! ---
//! Title: Getting Started
//! Date: 2024-01-15
//! Tags: [intro, setup]
//! ---
//! # Getting Started
//! ```

use serde_yaml::Value;

use crate::date::{DEFAULT_DATE_FORMAT, format_time, parse_date};
use crate::{MetaHeaders, MetaParser, Metadata, MetadataError};

/// Default [`MetaParser`] reading YAML front matter.
#[derive(Clone, Debug)]
pub struct FrontMatterParser {
    date_format: String,
}

impl Default for FrontMatterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontMatterParser {
    /// Create a parser using [`DEFAULT_DATE_FORMAT`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
        }
    }

    /// Set the `strftime` format used for `date_formatted`.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Fill `time` and `date_formatted` from `date` when not given explicitly.
    fn derive_dates(&self, meta: &mut Metadata) {
        if meta.time.is_none() {
            meta.time = meta.date.as_deref().and_then(parse_date);
        }
        if meta.date_formatted.is_none() {
            meta.date_formatted = meta
                .time
                .and_then(|time| format_time(time, &self.date_format));
        }
    }
}

impl MetaParser for FrontMatterParser {
    fn parse(&self, raw: &str, headers: &MetaHeaders) -> Result<Metadata, MetadataError> {
        let mut meta = Metadata::default();
        let Some(block) = extract_front_matter(raw).filter(|b| !b.trim().is_empty()) else {
            return Ok(meta);
        };

        let mapping = match serde_yaml::from_str::<Value>(block)? {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(meta),
            other => {
                return Err(MetadataError::Parse(format!(
                    "Front matter must be a mapping, found {}",
                    yaml_kind(&other)
                )));
            }
        };

        for (key, value) in mapping {
            let Some(name) = yaml_key(&key) else {
                continue;
            };
            let value = serde_json::to_value(&value)
                .map_err(|e| MetadataError::Parse(format!("Unsupported value for {name}: {e}")))?;
            meta.set(&headers.resolve(&name), value);
        }

        self.derive_dates(&mut meta);
        Ok(meta)
    }
}

/// Extract the YAML block of a front matter header.
///
/// Returns `None` if the content has no (terminated) front matter block.
#[must_use]
pub fn extract_front_matter(raw: &str) -> Option<&str> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = text.split_inclusive('\n');

    let opening = lines.next()?;
    if opening.trim_end() != "---" {
        return None;
    }

    let start = opening.len();
    let mut end = start;
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            return Some(&text[start..end]);
        }
        end += line.len();
    }
    None
}

/// Stringify a top-level front matter key; non-scalar keys are skipped.
fn yaml_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn parse(raw: &str) -> Result<Metadata, MetadataError> {
        FrontMatterParser::new().parse(raw, &MetaHeaders::default())
    }

    // ── extract_front_matter tests ───────────────────────────────────

    #[test]
    fn test_extract_simple_block() {
        let raw = "---\nTitle: Hello\n---\nBody";
        assert_eq!(extract_front_matter(raw), Some("Title: Hello\n"));
    }

    #[test]
    fn test_extract_with_crlf() {
        let raw = "---\r\nTitle: Hello\r\n---\r\nBody";
        assert_eq!(extract_front_matter(raw), Some("Title: Hello\r\n"));
    }

    #[test]
    fn test_extract_with_bom() {
        let raw = "\u{feff}---\nTitle: Hello\n---\n";
        assert_eq!(extract_front_matter(raw), Some("Title: Hello\n"));
    }

    #[test]
    fn test_extract_dot_terminator() {
        let raw = "---\nTitle: Hello\n...\nBody";
        assert_eq!(extract_front_matter(raw), Some("Title: Hello\n"));
    }

    #[test]
    fn test_extract_empty_block() {
        assert_eq!(extract_front_matter("---\n---\nBody"), Some(""));
    }

    #[test]
    fn test_extract_no_block() {
        assert_eq!(extract_front_matter("# Just markdown\n"), None);
        assert_eq!(extract_front_matter(""), None);
    }

    #[test]
    fn test_extract_unterminated_block() {
        assert_eq!(extract_front_matter("---\nTitle: Hello\nBody"), None);
    }

    #[test]
    fn test_extract_requires_block_at_top() {
        assert_eq!(extract_front_matter("Intro\n---\nTitle: x\n---\n"), None);
    }

    // ── parse tests ──────────────────────────────────────────────────

    #[test]
    fn test_parse_no_front_matter() {
        let meta = parse("# Title\n\nBody").unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn test_parse_empty_content() {
        let meta = parse("").unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn test_parse_known_headers() {
        let raw = "---\nTitle: Welcome\nDescription: First page\nAuthor: Sam\nRobots: noindex\n---\n";
        let meta = parse(raw).unwrap();
        assert_eq!(meta.title, Some("Welcome".to_owned()));
        assert_eq!(meta.description, Some("First page".to_owned()));
        assert_eq!(meta.author, Some("Sam".to_owned()));
        assert_eq!(meta.robots, Some("noindex".to_owned()));
        assert!(meta.extra.is_empty());
    }

    #[test]
    fn test_parse_lowercase_keys() {
        let meta = parse("---\ntitle: Welcome\n---\n").unwrap();
        assert_eq!(meta.title, Some("Welcome".to_owned()));
    }

    #[test]
    fn test_parse_date_derives_time_and_formatted() {
        let meta = parse("---\nDate: 2024-01-15\n---\n").unwrap();
        assert_eq!(meta.date, Some("2024-01-15".to_owned()));
        assert_eq!(meta.time, Some(1_705_276_800));
        assert_eq!(meta.date_formatted, Some("15 Jan 2024".to_owned()));
    }

    #[test]
    fn test_parse_custom_date_format() {
        let parser = FrontMatterParser::new().with_date_format("%Y/%m/%d");
        let meta = parser
            .parse("---\nDate: 2024-01-15\n---\n", &MetaHeaders::default())
            .unwrap();
        assert_eq!(meta.date_formatted, Some("2024/01/15".to_owned()));
    }

    #[test]
    fn test_parse_explicit_formatted_date_kept() {
        let raw = "---\nDate: 2024-01-15\nFormatted Date: mid January\n---\n";
        let meta = parse(raw).unwrap();
        assert_eq!(meta.date_formatted, Some("mid January".to_owned()));
        assert_eq!(meta.time, Some(1_705_276_800));
    }

    #[test]
    fn test_parse_unparseable_date() {
        let meta = parse("---\nDate: someday\n---\n").unwrap();
        assert_eq!(meta.date, Some("someday".to_owned()));
        assert!(meta.time.is_none());
        assert!(meta.date_formatted.is_none());
    }

    #[test]
    fn test_parse_hidden_flag() {
        let meta = parse("---\nHidden: true\n---\n").unwrap();
        assert!(meta.hidden);
    }

    #[test]
    fn test_parse_unknown_keys_go_to_extra() {
        let raw = "---\nTitle: T\nTags:\n  - rust\n  - web\nWeight: 3\n---\n";
        let meta = parse(raw).unwrap();
        assert_eq!(meta.extra.get("tags"), Some(&json!(["rust", "web"])));
        assert_eq!(meta.extra.get("weight"), Some(&json!(3)));
    }

    #[test]
    fn test_parse_custom_header() {
        let headers = MetaHeaders::default().with_header("Sort Weight", "weight");
        let meta = FrontMatterParser::new()
            .parse("---\nSort Weight: 7\n---\n", &headers)
            .unwrap();
        assert_eq!(meta.extra.get("weight"), Some(&json!(7)));
    }

    #[test]
    fn test_parse_empty_block() {
        let meta = parse("---\n---\nBody").unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse("---\nTitle: [unclosed\n---\n");
        assert!(matches!(result, Err(MetadataError::Yaml(_))));
    }

    #[test]
    fn test_parse_non_mapping_front_matter() {
        let err = parse("---\n- a\n- b\n---\n").unwrap_err();
        assert!(matches!(err, MetadataError::Parse(_)));
        assert!(err.to_string().contains("a sequence"));
    }

    #[test]
    fn test_parser_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FrontMatterParser>();
    }
}
