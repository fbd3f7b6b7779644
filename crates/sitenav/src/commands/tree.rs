//! `sitenav tree` command implementation.

use clap::Args;
use sitenav_tree::{NavigationTree, NodeKind};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Print the nested JSON view instead of an outline.
    #[arg(long)]
    json: bool,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.config.load_site()?;

        if self.json {
            output.result(&serde_json::to_string_pretty(&site.sidebar.nav_items())?);
            return Ok(());
        }

        for line in outline(&site.sidebar) {
            match line.link {
                Some(link) => output.result(&format!("{}  {}", line.label, output.dimmed(&link))),
                None => output.result(&line.label),
            }
        }

        Ok(())
    }
}

/// One outline row: indented, marked label plus its link.
#[derive(Debug, PartialEq, Eq)]
struct OutlineLine {
    label: String,
    link: Option<String>,
}

/// Render the sidebar as an indented outline in pre-order.
fn outline(tree: &NavigationTree) -> Vec<OutlineLine> {
    tree.flatten()
        .map(|node| {
            let marker = match node.kind() {
                NodeKind::Page { .. } => "-",
                NodeKind::Group {
                    collapsed: true, ..
                } => "+",
                NodeKind::Group { .. } => "v",
                NodeKind::Label => "#",
            };
            OutlineLine {
                label: format!(
                    "{}{marker} {}",
                    "  ".repeat(node.depth().saturating_sub(1)),
                    node.text()
                ),
                link: node.link().map(ToString::to_string),
            }
        })
        .collect()
}
