//! Front matter parsing and page metadata for level indexing.
//!
//! This crate provides:
//! - [`Metadata`]: typed view of a page's front matter, with an open `extra` bag
//! - [`MetaHeaders`]: the header schema mapping display names to metadata keys
//! - [`MetaParser`]: the seam through which hosts plug in their own parser
//! - [`FrontMatterParser`]: the default YAML front matter parser
//!
//! # Example
//!
//! ```
//! use level_meta::{FrontMatterParser, MetaHeaders, MetaParser};
//!
//! let parser = FrontMatterParser::new();
//! let raw = "---\nTitle: Welcome\nDate: 2024-01-15\n---\n# Hello\n";
//! let meta = parser.parse(raw, &MetaHeaders::default()).unwrap();
//!
//! assert_eq!(meta.title.as_deref(), Some("Welcome"));
//! assert_eq!(meta.time, Some(1_705_276_800));
//! ```

mod date;
mod front_matter;
mod headers;
mod metadata;

pub use date::{DEFAULT_DATE_FORMAT, format_time, parse_date};
pub use front_matter::{FrontMatterParser, extract_front_matter};
pub use headers::MetaHeaders;
pub use metadata::{Metadata, MetadataError};

/// Parser turning raw page text into [`Metadata`].
///
/// Hosts with their own front matter format implement this trait; the
/// indexing pipeline only ever talks to the trait.
pub trait MetaParser: Send + Sync {
    /// Parse the front matter of `raw` according to the header schema.
    ///
    /// Content without front matter yields default metadata, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] if the front matter block is malformed.
    fn parse(&self, raw: &str, headers: &MetaHeaders) -> Result<Metadata, MetadataError>;
}
