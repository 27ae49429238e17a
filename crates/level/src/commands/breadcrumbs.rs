//! `level breadcrumbs` command implementation.

use clap::Args;
use level_config::{CliSettings, Config};
use level_site::BreadcrumbHelper;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the breadcrumbs command.
#[derive(Args)]
pub(crate) struct BreadcrumbsArgs {
    /// Document id (e.g., "blog/2024/post").
    id: String,

    #[command(flatten)]
    pub site: SiteArgs,
}

impl BreadcrumbsArgs {
    /// Execute the breadcrumbs command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or output cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            content_dir: self.site.content_dir,
            ..Default::default()
        };
        let config = Config::load(self.site.config.as_deref(), Some(&cli_settings))?;

        let helper = BreadcrumbHelper::new(
            config.content_resolved.dir.as_path(),
            config.content_resolved.ext.as_str(),
        );
        let trail = helper.trail(Some(&self.id));
        if trail.is_empty() {
            output.info(&format!("No ancestor of \"{}\" has an index page", self.id));
        }

        output.data(&serde_json::to_string_pretty(&trail)?)?;
        Ok(())
    }
}
