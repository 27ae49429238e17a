//! `level nav` command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, ValueEnum};
use level_config::{CliSettings, Config, PageOrder, PageOrderBy};
use level_meta::{MetaParser, Metadata};
use level_site::{
    BreadcrumbItem, LevelConfig, LevelLoader, LevelOutcome, LevelPages, PageRecord,
    RequestContext, ServedPage,
};
use serde::Serialize;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::settings::{
    level_config_from_config, meta_headers_from_config, parser_from_config, site_urls_from_config,
};

/// Page order key accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum OrderByArg {
    Alpha,
    Date,
    Meta,
}

impl From<OrderByArg> for PageOrderBy {
    fn from(arg: OrderByArg) -> Self {
        match arg {
            OrderByArg::Alpha => Self::Alpha,
            OrderByArg::Date => Self::Date,
            OrderByArg::Meta => Self::Meta,
        }
    }
}

/// Page order direction accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for PageOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => Self::Asc,
            OrderArg::Desc => Self::Desc,
        }
    }
}

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Page file to treat as the served document.
    file: PathBuf,

    #[command(flatten)]
    pub site: SiteArgs,

    /// Key pages are ordered by (overrides config).
    #[arg(long, value_enum)]
    order_by: Option<OrderByArg>,

    /// Order direction (overrides config).
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// Treat the request as privileged; the level scan is skipped.
    #[arg(long)]
    privileged: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the page or content directory
    /// cannot be found, or output cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            content_dir: self.site.content_dir,
            order_by: self.order_by.map(Into::into),
            order: self.order.map(Into::into),
        };
        let config = Config::load(self.site.config.as_deref(), Some(&cli_settings))?;

        let (loader, outcome) = load(&config, &self.file, self.privileged, output)?;
        match outcome {
            LevelOutcome::FullScan => {
                output.warning("Privileged request: level scan skipped, the host loads the full page tree");
            }
            LevelOutcome::Level(level) => {
                let current_id = level.current.as_ref().map(|page| page.id.as_str());
                let report = NavReport::new(&level, loader.breadcrumbs(current_id));
                output.data(&serde_json::to_string_pretty(&report)?)?;
            }
        }
        Ok(())
    }
}

/// Load the level of `file` the way a host serving it would.
fn load(
    config: &Config,
    file: &Path,
    privileged: bool,
    output: &Output,
) -> Result<(LevelLoader, LevelOutcome), CliError> {
    let content_dir = config.content_resolved.dir.canonicalize().map_err(|e| {
        CliError::Validation(format!(
            "Content directory {}: {e}",
            config.content_resolved.dir.display()
        ))
    })?;
    let file = file
        .canonicalize()
        .map_err(|e| CliError::Validation(format!("Page {}: {e}", file.display())))?;
    if !file.starts_with(&content_dir) {
        output.warning(&format!(
            "{} is outside the content directory {}",
            file.display(),
            content_dir.display()
        ));
    }

    let headers = meta_headers_from_config(config);
    let parser = parser_from_config(config);

    let raw_content = std::fs::read_to_string(&file)?;
    let meta = parser.parse(&raw_content, &headers).unwrap_or_else(|e| {
        output.warning(&format!("Invalid front matter in {}: {e}", file.display()));
        Metadata {
            parse_error: Some(e.to_string()),
            ..Default::default()
        }
    });
    let served = ServedPage {
        file,
        raw_content,
        meta,
        content: String::new(),
    };

    let loader = LevelLoader::new(
        LevelConfig {
            content_dir,
            ..level_config_from_config(config)
        },
        Arc::new(parser),
        Arc::new(site_urls_from_config(config)),
    )
    .with_headers(headers);

    tracing::info!(
        path = %served.file.display(),
        content_dir = %loader.config().content_dir.display(),
        privileged,
        "Loading level"
    );
    let outcome = loader.load(&served, &RequestContext { privileged });
    Ok((loader, outcome))
}

/// JSON report of a loaded level.
#[derive(Serialize)]
struct NavReport<'a> {
    pages: Vec<PageSummary<'a>>,
    current: Option<&'a str>,
    previous: Option<&'a str>,
    next: Option<&'a str>,
    breadcrumbs: Vec<BreadcrumbItem>,
}

#[derive(Serialize)]
struct PageSummary<'a> {
    id: &'a str,
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_error: Option<&'a str>,
}

impl<'a> NavReport<'a> {
    fn new(level: &'a LevelPages, breadcrumbs: Vec<BreadcrumbItem>) -> Self {
        let id = |page: Option<&'a PageRecord>| page.map(|p| p.id.as_str());
        Self {
            pages: level
                .pages
                .iter()
                .map(|page| PageSummary {
                    id: &page.id,
                    url: &page.url,
                    title: page.title.as_deref(),
                    date: page.date_formatted.as_deref(),
                    parse_error: page.parse_error(),
                })
                .collect(),
            current: id(level.current.as_ref()),
            previous: id(level.previous.as_ref()),
            next: id(level.next.as_ref()),
            breadcrumbs,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    /// Site with `level.toml`, a home page and a dated blog.
    fn create_site(config: &str) -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        let blog = root.join("content/blog");
        fs::create_dir_all(&blog).unwrap();
        fs::write(root.join("level.toml"), config).unwrap();

        fs::write(root.join("content/index.md"), "---\nTitle: Home\n---\n").unwrap();
        fs::write(blog.join("index.md"), "---\nTitle: Blog\n---\n").unwrap();
        fs::write(blog.join("hello.md"), "---\nTitle: Hello\nDate: 2024-01-15\n---\n").unwrap();
        fs::write(blog.join("later.md"), "---\nTitle: Later\nDate: 2024-03-01\n---\n").unwrap();
        fs::write(blog.join("404.md"), "---\nTitle: Missing\n---\n").unwrap();
        temp_dir
    }

    fn load_site(temp_dir: &tempfile::TempDir, page: &str, privileged: bool) -> (LevelLoader, LevelOutcome) {
        let config = Config::load(Some(&temp_dir.path().join("level.toml")), None).unwrap();
        load(&config, &temp_dir.path().join(page), privileged, &Output::new()).unwrap()
    }

    fn report_json(loader: &LevelLoader, outcome: &LevelOutcome) -> serde_json::Value {
        let LevelOutcome::Level(level) = outcome else {
            panic!("expected level outcome");
        };
        let current_id = level.current.as_ref().map(|page| page.id.as_str());
        let report = NavReport::new(level, loader.breadcrumbs(current_id));
        serde_json::to_value(&report).unwrap()
    }

    #[test]
    fn test_nav_report_date_descending() {
        let site = create_site("[pages]\norder_by = \"date\"\norder = \"desc\"\n\n[site]\nbase_url = \"/site\"\n");

        let (loader, outcome) = load_site(&site, "content/blog/hello.md", false);
        let value = report_json(&loader, &outcome);

        assert_eq!(value["current"], json!("blog/hello"));
        assert_eq!(value["previous"], json!("blog"));
        assert_eq!(value["next"], json!("blog/later"));
        assert_eq!(
            value["pages"],
            json!([
                { "id": "blog/later", "url": "/site/blog/later", "title": "Later", "date": "01 Mar 2024" },
                { "id": "blog/hello", "url": "/site/blog/hello", "title": "Hello", "date": "15 Jan 2024" },
                { "id": "blog", "url": "/site/blog/", "title": "Blog" },
            ])
        );
        assert_eq!(value["breadcrumbs"], json!([{ "label": "blog", "id": "blog" }]));
    }

    #[test]
    fn test_nav_report_breadcrumbs_of_directory_page() {
        let site = create_site("");

        let (loader, outcome) = load_site(&site, "content/blog/index.md", false);
        let value = report_json(&loader, &outcome);

        assert_eq!(value["current"], json!("blog"));
        assert_eq!(value["breadcrumbs"], json!([{ "label": "blog", "id": "blog" }]));
    }

    #[test]
    fn test_nav_report_served_parse_error() {
        let site = create_site("");
        fs::write(site.path().join("content/blog/bad.md"), "---\nTitle: [x\n---\n").unwrap();

        let (loader, outcome) = load_site(&site, "content/blog/bad.md", false);
        let value = report_json(&loader, &outcome);

        assert_eq!(value["current"], json!("blog/bad"));
        assert!(value["pages"][1]["parse_error"].is_string());
    }

    #[test]
    fn test_nav_privileged_skips_level_scan() {
        let site = create_site("");

        let (_, outcome) = load_site(&site, "content/blog/hello.md", true);

        assert!(matches!(outcome, LevelOutcome::FullScan));
    }

    #[test]
    fn test_nav_missing_page() {
        let site = create_site("");
        let config = Config::load(Some(&site.path().join("level.toml")), None).unwrap();

        let result = load(&config, &site.path().join("content/nope.md"), false, &Output::new());

        let err = result.err().unwrap();
        assert!(matches!(err, CliError::Validation(_)));
        assert!(err.to_string().contains("nope.md"));
    }

    #[test]
    fn test_nav_missing_content_dir() {
        let site = create_site("[content]\ndir = \"missing\"\n");
        let config = Config::load(Some(&site.path().join("level.toml")), None).unwrap();

        let result = load(&config, &site.path().join("content/index.md"), false, &Output::new());

        assert!(result.err().unwrap().to_string().contains("missing"));
    }
}
