//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod resolve;
pub(crate) mod tree;

use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Site, SiteConfig};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use tree::TreeArgs;

/// Configuration arguments shared by every command.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long, env = "SITENAV_CONFIG")]
    config: Option<PathBuf>,

    /// Site title (overrides config).
    #[arg(long)]
    title: Option<String>,
}

impl ConfigArgs {
    /// Load the configuration without validating it.
    pub(crate) fn load(self) -> Result<SiteConfig, CliError> {
        let cli_settings = CliSettings { title: self.title };
        let config = SiteConfig::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::info!(
            path = ?config.config_path,
            title = %config.title,
            "Loaded site configuration"
        );
        Ok(config)
    }

    /// Load and validate the configuration.
    pub(crate) fn load_site(self) -> Result<Site, CliError> {
        let site = self.load()?.validate()?;
        tracing::info!(
            nodes = site.sidebar.len(),
            routes = site.sidebar.route_count(),
            "Sidebar validated"
        );
        Ok(site)
    }
}
