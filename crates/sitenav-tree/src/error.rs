//! Validation and lookup error types.

use std::fmt;

use serde::Serialize;

use crate::raw::RawId;
use crate::route::{Route, RouteError};

/// Sequence of `text` labels from a root node down to a node.
///
/// Displayed as `Code Reference > Protocol > Unit`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelPath(Vec<String>);

impl LabelPath {
    /// Create a label path from labels, root first.
    #[must_use]
    pub fn new(labels: Vec<String>) -> Self {
        Self(labels)
    }

    /// Labels, root first.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.0
    }

    /// Number of labels (the node's depth, 1 for root-level nodes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LabelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            if label.trim().is_empty() {
                f.write_str("(empty)")?;
            } else {
                f.write_str(label)?;
            }
        }
        Ok(())
    }
}

/// Invariant violated by a navigation node.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationErrorKind {
    /// Node `text` is blank.
    #[error("label is empty")]
    EmptyLabel,
    /// Node declares an empty `items` list and no `link`, so it neither
    /// navigates nor expands.
    #[error("node has no link and an empty items list")]
    AmbiguousNode,
    /// Node contains itself as a descendant.
    #[error("node contains itself as a descendant")]
    CyclicStructure,
    /// Node is listed under more than one parent.
    #[error("node is listed under more than one parent")]
    SharedNode,
    /// Node (or the root level, at an empty path) lists an id that is not an
    /// entry of the arena being validated.
    #[error("lists entry {id}, which is not in the sidebar")]
    UnknownEntry {
        /// The dangling id.
        id: RawId,
    },
    /// Two nodes resolve to the same route.
    #[error("duplicate link {route} (already used by {first})")]
    DuplicateLink {
        /// Canonical route shared by both nodes.
        route: Route,
        /// Path of the node that claimed the route first.
        first: LabelPath,
    },
    /// Link cannot be canonicalized into a content route.
    #[error("malformed link {link:?}: {reason}")]
    MalformedLink {
        /// Link as authored.
        link: String,
        /// Why canonicalization failed.
        reason: RouteError,
    },
}

/// Validation failure located at a node.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {kind}")]
pub struct ValidationError {
    /// Path of the offending node.
    pub path: LabelPath,
    /// Violated invariant.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub(crate) fn new(path: LabelPath, kind: ValidationErrorKind) -> Self {
        Self { path, kind }
    }
}

/// Returned by [`NavigationTree::resolve`](crate::NavigationTree::resolve)
/// when no node owns the requested route.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no navigation node for route {route:?}")]
pub struct NotFound {
    /// Route as queried.
    pub route: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawEntry, RawTree};

    fn path(labels: &[&str]) -> LabelPath {
        LabelPath::new(labels.iter().map(|&s| s.to_owned()).collect())
    }

    #[test]
    fn test_label_path_display() {
        let p = path(&["Code Reference", "Protocol", "Unit"]);
        assert_eq!(p.to_string(), "Code Reference > Protocol > Unit");
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn test_label_path_display_marks_empty_labels() {
        let p = path(&["Guide", " "]);
        assert_eq!(p.to_string(), "Guide > (empty)");
    }

    #[test]
    fn test_label_path_display_root_level() {
        assert_eq!(LabelPath::default().to_string(), "(root)");
    }

    #[test]
    fn test_unknown_entry_message_names_parent_and_id() {
        let mut larger = RawTree::new();
        let foreign = (0..=10).map(|i| larger.push(RawEntry::new(format!("{i}")))).last();
        let err = ValidationError::new(
            path(&["Guides"]),
            ValidationErrorKind::UnknownEntry {
                id: foreign.unwrap(),
            },
        );

        assert_eq!(err.to_string(), "Guides: lists entry #10, which is not in the sidebar");
    }

    #[test]
    fn test_duplicate_link_message_names_both_paths() {
        let err = ValidationError::new(
            path(&["Code Reference", "Overview"]),
            ValidationErrorKind::DuplicateLink {
                route: Route::parse("/protocol/overview").unwrap(),
                first: path(&["Technical Documentation", "Overview"]),
            },
        );

        let msg = err.to_string();
        assert!(msg.starts_with("Code Reference > Overview:"));
        assert!(msg.contains("/protocol/overview"));
        assert!(msg.contains("Technical Documentation > Overview"));
    }

    #[test]
    fn test_malformed_link_message_includes_reason() {
        let err = ValidationError::new(
            path(&["Guide"]),
            ValidationErrorKind::MalformedLink {
                link: "/../etc".to_owned(),
                reason: RouteError::EscapesRoot,
            },
        );

        let msg = err.to_string();
        assert!(msg.contains("\"/../etc\""));
        assert!(msg.contains("escapes the content root"));
    }

    #[test]
    fn test_not_found_message() {
        let err = NotFound {
            route: "/nonexistent".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "no navigation node for route \"/nonexistent\""
        );
    }
}
