//! Configuration management for level.
//!
//! Parses `level.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.dir`
//! - `site.base_url`
//! - `site.date_format`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content directory.
    pub content_dir: Option<PathBuf>,
    /// Override page order key.
    pub order_by: Option<PageOrderBy>,
    /// Override page order direction.
    pub order: Option<PageOrder>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "level.toml";

/// Default `strftime` format for formatted page dates.
const DEFAULT_DATE_FORMAT: &str = "%d %b %Y";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Page ordering configuration.
    pub pages: PagesConfig,
    /// URL and date presentation configuration.
    pub site: SiteConfig,
    /// Front matter configuration.
    pub meta: MetaConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    dir: Option<String>,
    ext: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Content root directory.
    pub dir: PathBuf,
    /// Extension of page files, including the dot.
    pub ext: String,
}

/// Key pages are ordered by.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageOrderBy {
    #[default]
    Alpha,
    Date,
    /// Ordered by the metadata key named in `pages.order_meta_by`.
    Meta,
}

/// Direction of the page order.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageOrder {
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

/// Page ordering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Key pages are ordered by.
    pub order_by: PageOrderBy,
    /// Direction of the page order.
    pub order: PageOrder,
    /// Metadata key used when `order_by = "meta"`.
    pub order_meta_by: String,
    /// Sort the level before resolving navigation.
    pub sort: bool,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            order_by: PageOrderBy::default(),
            order: PageOrder::default(),
            order_meta_by: "title".to_owned(),
            sort: true,
        }
    }
}

/// URL and date presentation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL pages are served under.
    pub base_url: String,
    /// Append ids to the base URL as paths instead of query strings.
    pub rewrite_url: bool,
    /// `strftime` format of formatted page dates.
    pub date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_owned(),
            rewrite_url: true,
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
        }
    }
}

/// Front matter configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    /// Extra header schema entries, header name -> metadata key.
    pub headers: BTreeMap<String, String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.dir`").
        field: String,
        /// Error message (e.g., "${`CONTENT_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `level.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_dir) = &settings.content_dir {
            self.content_resolved.dir.clone_from(content_dir);
        }
        if let Some(order_by) = settings.order_by {
            self.pages.order_by = order_by;
        }
        if let Some(order) = settings.order {
            self.pages.order = order;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            pages: PagesConfig::default(),
            site: SiteConfig::default(),
            meta: MetaConfig::default(),
            content_resolved: ContentConfig {
                dir: base.join("content"),
                ext: ".md".to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_content()?;
        self.validate_pages()?;
        require_non_empty(&self.site.base_url, "site.base_url")?;
        require_non_empty(&self.site.date_format, "site.date_format")?;
        Ok(())
    }

    /// Validate content configuration.
    fn validate_content(&self) -> Result<(), ConfigError> {
        let ext = &self.content_resolved.ext;
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "content.ext must be a dot followed by an extension (e.g. \".md\"), got \"{ext}\""
            )));
        }
        if ext.contains('/') {
            return Err(ConfigError::Validation(
                "content.ext cannot contain '/'".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate page ordering configuration.
    fn validate_pages(&self) -> Result<(), ConfigError> {
        if self.pages.order_by == PageOrderBy::Meta {
            require_non_empty(&self.pages.order_meta_by, "pages.order_meta_by")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.content.dir {
            self.content.dir = Some(expand::expand_env(dir, "content.dir")?);
        }
        self.site.base_url = expand::expand_env(&self.site.base_url, "site.base_url")?;
        self.site.date_format = expand::expand_env(&self.site.date_format, "site.date_format")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.content_resolved = ContentConfig {
            dir: config_dir.join(self.content.dir.as_deref().unwrap_or("content")),
            ext: self.content.ext.clone().unwrap_or_else(|| ".md".to_owned()),
        };
    }
}
