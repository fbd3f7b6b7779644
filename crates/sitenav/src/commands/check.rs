//! `sitenav check` command implementation.

use clap::Args;
use sitenav_tree::{NavigationTree, NodeKind};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Report every sidebar problem instead of stopping at the first.
    #[arg(long)]
    all: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;

        if self.all {
            let errors = NavigationTree::diagnose(&config.raw_sidebar());
            tracing::info!(problems = errors.len(), "Sidebar diagnosed");
            if !errors.is_empty() {
                for err in &errors {
                    output.error(&err.to_string());
                }
                return Err(CliError::Validation(format!(
                    "{} sidebar problem(s) found",
                    errors.len()
                )));
            }
        }

        let site = config.validate()?;
        let summary = Summary::of(&site.sidebar);

        output.highlight(&site.title);
        output.separator();
        output.info(&format!("Socials: {}", site.socials.len()));
        output.info(&format!(
            "Sidebar: {} entries ({} pages, {} groups, {} labels), depth {}",
            site.sidebar.len(),
            summary.pages,
            summary.groups,
            summary.labels,
            summary.max_depth
        ));

        if site.sidebar.is_empty() {
            output.warning("Sidebar has no entries");
        }
        output.success("Configuration is valid");

        Ok(())
    }
}

/// Node counts for the check report.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    pages: usize,
    groups: usize,
    labels: usize,
    max_depth: usize,
}

impl Summary {
    fn of(tree: &NavigationTree) -> Self {
        tree.flatten().fold(Self::default(), |mut summary, node| {
            match node.kind() {
                NodeKind::Page { .. } => summary.pages += 1,
                NodeKind::Group { .. } => summary.groups += 1,
                NodeKind::Label => summary.labels += 1,
            }
            summary.max_depth = summary.max_depth.max(node.depth());
            summary
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sitenav_tree::RawNode;

    use super::*;

    #[test]
    fn test_summary_counts_node_kinds() {
        let tree = NavigationTree::from_nodes(&[
            RawNode::page("Introduction", "/"),
            RawNode::label("Reference"),
            RawNode::group(
                "Guides",
                vec![
                    RawNode::page("Setup", "/guides/setup"),
                    RawNode::group("Advanced", vec![RawNode::page("Tuning", "/guides/tuning")]),
                ],
            ),
        ])
        .unwrap();

        assert_eq!(
            Summary::of(&tree),
            Summary {
                pages: 3,
                groups: 2,
                labels: 1,
                max_depth: 3,
            }
        );
    }

    #[test]
    fn test_summary_empty_tree() {
        let tree = NavigationTree::from_nodes(&[]).unwrap();
        assert_eq!(Summary::of(&tree), Summary::default());
    }
}
