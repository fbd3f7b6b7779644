//! `sitenav resolve` command implementation.

use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Route to look up (e.g. /protocol/overview).
    route: String,

    #[command(flatten)]
    config: ConfigArgs,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// Prints the label path of the entry owning the route.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or no entry owns the
    /// route.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.config.load_site()?;

        let node = site.sidebar.resolve(&self.route)?;
        tracing::info!(route = %self.route, depth = node.depth(), "Route resolved");
        if let Some(link) = node.link()
            && link.as_str() != self.route
        {
            output.info(&format!("Resolved {} as {link}", self.route));
        }

        output.result(&node.label_path().to_string());
        Ok(())
    }
}
