//! Conversion from file configuration to the indexing pipeline's types.

use level_config::{Config, PageOrder, PageOrderBy};
use level_meta::{FrontMatterParser, MetaHeaders};
use level_site::{LevelConfig, OrderBy, SiteUrls, SortOrder};

/// Build the loader configuration from the loaded config.
pub(crate) fn level_config_from_config(config: &Config) -> LevelConfig {
    let order_by = match config.pages.order_by {
        PageOrderBy::Alpha => OrderBy::Alpha,
        PageOrderBy::Date => OrderBy::Date,
        PageOrderBy::Meta => OrderBy::Meta(config.pages.order_meta_by.trim().to_owned()),
    };
    let order = match config.pages.order {
        PageOrder::Asc => SortOrder::Ascending,
        PageOrder::Desc => SortOrder::Descending,
    };

    LevelConfig {
        content_dir: config.content_resolved.dir.clone(),
        content_ext: config.content_resolved.ext.clone(),
        order_by,
        order,
        sort_pages: config.pages.sort,
    }
}

/// Default header schema extended with the `[meta] headers` entries.
pub(crate) fn meta_headers_from_config(config: &Config) -> MetaHeaders {
    config
        .meta
        .headers
        .iter()
        .fold(MetaHeaders::default(), |headers, (header, key)| {
            headers.with_header(header.as_str(), key.as_str())
        })
}

pub(crate) fn site_urls_from_config(config: &Config) -> SiteUrls {
    SiteUrls::new(config.site.base_url.as_str()).with_rewrite(config.site.rewrite_url)
}

pub(crate) fn parser_from_config(config: &Config) -> FrontMatterParser {
    FrontMatterParser::new().with_date_format(config.site.date_format.as_str())
}
