//! CLI command implementations.

pub(crate) mod breadcrumbs;
pub(crate) mod nav;

use std::path::PathBuf;

use clap::Args;

pub(crate) use breadcrumbs::BreadcrumbsArgs;
pub(crate) use nav::NavArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover level.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Content directory (overrides config).
    #[arg(short = 'd', long, env = "LEVEL_CONTENT_DIR")]
    pub content_dir: Option<PathBuf>,

    /// Enable verbose output (show indexing logs).
    #[arg(short, long)]
    pub verbose: bool,
}
