//! Unvalidated sidebar input.
//!
//! [`RawNode`] mirrors the authored shape (`text`, `link`, `collapsed`,
//! `items`) and is what configuration files deserialize into. Before
//! validation the nested nodes are lowered into a [`RawTree`] arena, where
//! children are referenced by [`RawId`]. The arena can also be assembled by
//! hand, which is the only way to express structures that nesting cannot
//! (a node listed under two parents, or a node listed under its own
//! descendant).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sidebar entry as authored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNode {
    /// Display label.
    pub text: String,
    /// Content route this entry points at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Whether the children start hidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Child entries, in rendered order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<RawNode>>,
}

impl RawNode {
    /// Leaf entry pointing at `link`.
    #[must_use]
    pub fn page(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
            collapsed: None,
            items: None,
        }
    }

    /// Grouping entry with children.
    #[must_use]
    pub fn group(text: impl Into<String>, items: Vec<RawNode>) -> Self {
        Self {
            text: text.into(),
            link: None,
            collapsed: None,
            items: Some(items),
        }
    }

    /// Label-only entry (no link, no children).
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
            collapsed: None,
            items: None,
        }
    }

    /// Set the `collapsed` flag.
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Set the `link`.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Handle to an entry inside a [`RawTree`].
///
/// Only meaningful for the arena that returned it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawId(usize);

impl RawId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One arena entry. Same fields as [`RawNode`], children by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawEntry {
    /// Display label.
    pub text: String,
    /// Content route this entry points at.
    pub link: Option<String>,
    /// Whether the children start hidden.
    pub collapsed: Option<bool>,
    /// Child entries, in rendered order.
    pub items: Option<Vec<RawId>>,
}

impl RawEntry {
    /// Entry with only a label set.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Arena of unvalidated entries.
#[derive(Clone, Debug, Default)]
pub struct RawTree {
    entries: Vec<RawEntry>,
    roots: Vec<RawId>,
}

impl RawTree {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower nested nodes into an arena, preserving order.
    #[must_use]
    pub fn from_nodes(nodes: &[RawNode]) -> Self {
        fn shallow(node: &RawNode) -> RawEntry {
            RawEntry {
                text: node.text.clone(),
                link: node.link.clone(),
                collapsed: node.collapsed,
                items: None,
            }
        }

        let mut tree = Self::new();
        let mut pending = Vec::new();
        for node in nodes {
            let id = tree.push(shallow(node));
            tree.roots.push(id);
            pending.push((node, id));
        }

        // Explicit work list: authored nesting depth is unbounded
        while let Some((node, id)) = pending.pop() {
            let Some(items) = &node.items else {
                continue;
            };
            let children = items
                .iter()
                .map(|child| {
                    let child_id = tree.push(shallow(child));
                    pending.push((child, child_id));
                    child_id
                })
                .collect();
            tree.entries[id.0].items = Some(children);
        }
        tree
    }

    /// Add an entry without attaching it anywhere.
    pub fn push(&mut self, entry: RawEntry) -> RawId {
        self.entries.push(entry);
        RawId(self.entries.len() - 1)
    }

    /// Append an entry to the root level.
    pub fn add_root(&mut self, id: RawId) {
        self.roots.push(id);
    }

    /// Append `child` to the `items` of `parent`, creating the list if needed.
    ///
    /// Returns `false`, leaving the arena untouched, when `parent` is not an
    /// entry of this arena. `child` is not checked here; validation reports
    /// an unknown child as [`UnknownEntry`](crate::ValidationErrorKind::UnknownEntry).
    pub fn add_child(&mut self, parent: RawId, child: RawId) -> bool {
        let Some(entry) = self.entries.get_mut(parent.0) else {
            return false;
        };
        entry.items.get_or_insert_with(Vec::new).push(child);
        true
    }

    /// Get an entry by id.
    #[must_use]
    pub fn entry(&self, id: RawId) -> Option<&RawEntry> {
        self.entries.get(id.0)
    }

    /// Root-level entries, in order.
    #[must_use]
    pub fn roots(&self) -> &[RawId] {
        &self.roots
    }

    /// Number of entries in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the arena has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_deserialize_authored_shape() {
        let json = r#"[
            { "text": "Introduction", "link": "/" },
            {
                "text": "Technical Documentation",
                "collapsed": false,
                "items": [{ "text": "Overview", "link": "/protocol/overview" }]
            }
        ]"#;

        let nodes: Vec<RawNode> = serde_json::from_str(json).unwrap();

        assert_eq!(
            nodes,
            vec![
                RawNode::page("Introduction", "/"),
                RawNode::group(
                    "Technical Documentation",
                    vec![RawNode::page("Overview", "/protocol/overview")],
                )
                .with_collapsed(false),
            ]
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let json = r#"{ "text": "Guide", "href": "/guide" }"#;
        let result: Result<RawNode, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_requires_text() {
        let json = r#"{ "link": "/guide" }"#;
        let result: Result<RawNode, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let json = serde_json::to_value(RawNode::page("Guide", "/guide")).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "Guide", "link": "/guide" }));
    }

    #[test]
    fn test_from_nodes_preserves_order_and_nesting() {
        let nodes = vec![
            RawNode::page("A", "/a"),
            RawNode::group("B", vec![RawNode::page("B1", "/b/1"), RawNode::label("B2")]),
            RawNode::page("C", "/c"),
        ];

        let tree = RawTree::from_nodes(&nodes);

        assert_eq!(tree.len(), 5);
        let roots: Vec<_> = tree
            .roots()
            .iter()
            .map(|&id| tree.entry(id).unwrap().text.as_str())
            .collect();
        assert_eq!(roots, vec!["A", "B", "C"]);

        let group = tree.entry(tree.roots()[1]).unwrap();
        let children: Vec<_> = group
            .items
            .as_ref()
            .unwrap()
            .iter()
            .map(|&id| tree.entry(id).unwrap().text.as_str())
            .collect();
        assert_eq!(children, vec!["B1", "B2"]);
    }

    #[test]
    fn test_from_nodes_keeps_empty_items_list() {
        let tree = RawTree::from_nodes(&[RawNode::group("Empty", Vec::new())]);
        let entry = tree.entry(tree.roots()[0]).unwrap();
        assert_eq!(entry.items, Some(Vec::new()));
    }

    #[test]
    fn test_add_child_creates_items() {
        let mut tree = RawTree::new();
        let parent = tree.push(RawEntry::new("Parent"));
        let child = tree.push(RawEntry::new("Child"));
        tree.add_root(parent);

        assert!(tree.add_child(parent, child));
        assert_eq!(tree.entry(parent).unwrap().items, Some(vec![child]));
        assert!(tree.entry(child).unwrap().items.is_none());
    }

    #[test]
    fn test_add_child_ignores_parent_from_other_arena() {
        let mut larger = RawTree::new();
        let foreign = (0..=10).map(|i| larger.push(RawEntry::new(format!("Entry {i}")))).last();

        let mut tree = RawTree::new();
        let child = tree.push(RawEntry::new("Child"));

        assert!(!tree.add_child(foreign.unwrap(), child));
        assert_eq!(tree.len(), 1);
        assert!(tree.entry(child).unwrap().items.is_none());
    }

    #[test]
    fn test_from_nodes_deep_nesting() {
        let mut node = RawNode::page("Leaf", "/leaf");
        for depth in (0..64).rev() {
            node = RawNode::group(format!("Level {depth}"), vec![node]);
        }

        let tree = RawTree::from_nodes(&[node]);

        assert_eq!(tree.len(), 65);
        let mut id = tree.roots()[0];
        let mut levels = 1;
        while let Some(items) = &tree.entry(id).unwrap().items {
            id = items[0];
            levels += 1;
        }
        assert_eq!(levels, 65);
        assert_eq!(tree.entry(id).unwrap().text, "Leaf");
    }
}
