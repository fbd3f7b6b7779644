//! Validated navigation tree.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec<Node>` in depth-first pre-order, with
//! parent and child relationships tracked by index. This provides:
//! - O(1) route lookups via the `route_index` `HashMap`
//! - [`NavigationTree::flatten`] as a plain forward scan
//! - O(d) breadcrumb building where d is the node depth
//!
//! The tree is immutable once built and is `Send + Sync`, so any number of
//! readers may share it without locking.

use std::collections::HashMap;
use std::iter::FusedIterator;
use std::ops::Range;

use serde::Serialize;

use crate::error::{LabelPath, NotFound};
use crate::route::Route;

/// Handle to a node of a [`NavigationTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// What a validated node is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Leaf pointing at a document.
    Page {
        /// Canonical route of the document.
        link: Route,
    },
    /// Expandable group with at least one child.
    ///
    /// When `link` is set the label navigates directly and the children
    /// still expand.
    Group {
        /// Optional direct navigation target.
        link: Option<Route>,
        /// Whether the children start hidden.
        collapsed: bool,
        /// Children, in rendered order.
        items: Vec<NodeId>,
    },
    /// Label-only separator.
    Label,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) text: String,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: usize,
}

/// Validated, immutable sidebar tree.
///
/// Built with [`NavigationTree::validate`] or [`NavigationTree::from_nodes`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    route_index: HashMap<Route, NodeId>,
}

/// Breadcrumb entry for an ancestor of a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Display label.
    pub text: String,
    /// Link target, if the ancestor navigates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Route>,
}

/// Nested navigation item in the shape renderers consume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display label.
    pub text: String,
    /// Link target path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Route>,
    /// Initial collapsed state. Only set on groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItem>,
}

impl NavigationTree {
    pub(crate) fn new(nodes: Vec<Node>, roots: Vec<NodeId>) -> Self {
        let route_index = nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| node_link(&node.kind).map(|link| (link.clone(), NodeId(i))))
            .collect();

        Self {
            nodes,
            roots,
            route_index,
        }
    }

    /// Total number of nodes, groups included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the sidebar has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes that carry a link.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.route_index.len()
    }

    /// Get a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Root-level nodes, in authored order.
    pub fn roots(&self) -> impl ExactSizeIterator<Item = NodeRef<'_>> {
        self.roots.iter().map(|&id| NodeRef { tree: self, id })
    }

    /// Find the node whose link equals `route`.
    ///
    /// The query is canonicalized first, so `/guide/` and `guide` both find
    /// the node linked to `/guide`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no node owns the route or the query is not a
    /// valid route.
    pub fn resolve(&self, route: &str) -> Result<NodeRef<'_>, NotFound> {
        let id = match self.route_index.get(route) {
            Some(&id) => Some(id),
            None => Route::parse(route)
                .ok()
                .and_then(|canonical| self.route_index.get(&canonical).copied()),
        };

        id.map(|id| NodeRef { tree: self, id }).ok_or_else(|| NotFound {
            route: route.to_owned(),
        })
    }

    /// Depth-first, pre-order traversal of every node.
    ///
    /// Each call starts a fresh traversal.
    #[must_use]
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten {
            tree: self,
            next: 0,
        }
    }

    /// Ancestors of the node owning `route`, root first.
    ///
    /// The node itself is not included. Unknown routes yield no breadcrumbs.
    #[must_use]
    pub fn breadcrumbs(&self, route: &str) -> Vec<Breadcrumb> {
        let Ok(node) = self.resolve(route) else {
            return Vec::new();
        };

        let mut crumbs: Vec<Breadcrumb> = node
            .ancestors()
            .map(|ancestor| Breadcrumb {
                text: ancestor.text().to_owned(),
                link: ancestor.link().cloned(),
            })
            .collect();
        crumbs.reverse();
        crumbs
    }

    /// Nested, serializable view of the whole sidebar.
    #[must_use]
    pub fn nav_items(&self) -> Vec<NavItem> {
        let mut items = self.fold_nav_items(0..self.nodes.len());
        items.reverse();
        items
    }

    /// Build the items of the whole subtrees covering `range`, bottom-up.
    ///
    /// Walking the pre-order arena backwards finishes every child before its
    /// parent. Returns the top-level items of `range` with the first on top.
    fn fold_nav_items(&self, range: Range<usize>) -> Vec<NavItem> {
        let mut finished = Vec::new();
        for node in self.nodes[range].iter().rev() {
            let item = nav_item(node, &mut finished);
            finished.push(item);
        }
        finished
    }

    /// End (exclusive) of the pre-order range holding `id` and its descendants.
    fn subtree_end(&self, id: NodeId) -> usize {
        let depth = self.get(id).depth;
        self.nodes[id.0 + 1..]
            .iter()
            .position(|node| node.depth <= depth)
            .map_or(self.nodes.len(), |offset| id.0 + 1 + offset)
    }

    fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

fn node_link(kind: &NodeKind) -> Option<&Route> {
    match kind {
        NodeKind::Page { link } => Some(link),
        NodeKind::Group { link, .. } => link.as_ref(),
        NodeKind::Label => None,
    }
}

/// Item for `node`, taking its children's items off the top of `finished`.
fn nav_item(node: &Node, finished: &mut Vec<NavItem>) -> NavItem {
    let (collapsed, items) = match &node.kind {
        NodeKind::Group {
            collapsed, items, ..
        } => (
            Some(*collapsed),
            items.iter().filter_map(|_| finished.pop()).collect(),
        ),
        _ => (None, Vec::new()),
    };

    NavItem {
        text: node.text.clone(),
        link: node_link(&node.kind).cloned(),
        collapsed,
        items,
    }
}

/// Borrowed view of one node.
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    tree: &'a NavigationTree,
    id: NodeId,
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl<'a> NodeRef<'a> {
    /// Node id, stable for the lifetime of the tree.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display label.
    #[must_use]
    pub fn text(&self) -> &'a str {
        &self.tree.get(self.id).text
    }

    /// Node variant.
    #[must_use]
    pub fn kind(&self) -> &'a NodeKind {
        &self.tree.get(self.id).kind
    }

    /// Navigation target, for pages and linked groups.
    #[must_use]
    pub fn link(&self) -> Option<&'a Route> {
        node_link(self.kind())
    }

    /// Initial collapsed state. Always `false` for non-groups.
    #[must_use]
    pub fn collapsed(&self) -> bool {
        matches!(self.kind(), NodeKind::Group { collapsed: true, .. })
    }

    /// Whether this node is a leaf page.
    #[must_use]
    pub fn is_page(&self) -> bool {
        matches!(self.kind(), NodeKind::Page { .. })
    }

    /// Whether this node is a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.kind(), NodeKind::Group { .. })
    }

    /// Depth from the root level (root-level nodes are depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.tree.get(self.id).depth
    }

    /// Parent node, `None` at the root level.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.tree.get(self.id).parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// Children in rendered order. Empty for pages and labels.
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a>> + use<'a> {
        let tree = self.tree;
        let items: &'a [NodeId] = match self.kind() {
            NodeKind::Group { items, .. } => items,
            _ => &[],
        };
        items.iter().map(move |&id| NodeRef { tree, id })
    }

    /// Ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        std::iter::successors(self.parent(), NodeRef::parent)
    }

    /// Labels from the root level down to this node.
    #[must_use]
    pub fn label_path(&self) -> LabelPath {
        let mut labels: Vec<String> = std::iter::once(*self)
            .chain(self.ancestors())
            .map(|node| node.text().to_owned())
            .collect();
        labels.reverse();
        LabelPath::new(labels)
    }

    /// Nested [`NavItem`] for this node and its subtree.
    #[must_use]
    pub fn to_nav_item(&self) -> NavItem {
        let end = self.tree.subtree_end(self.id);
        let mut finished = self.tree.fold_nav_items(self.id.0 + 1..end);
        nav_item(self.tree.get(self.id), &mut finished)
    }
}

/// Iterator returned by [`NavigationTree::flatten`].
#[derive(Clone, Debug)]
pub struct Flatten<'a> {
    tree: &'a NavigationTree,
    next: usize,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.tree.nodes.len() {
            return None;
        }
        let id = NodeId(self.next);
        self.next += 1;
        Some(NodeRef {
            tree: self.tree,
            id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tree.nodes.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Flatten<'_> {}

impl FusedIterator for Flatten<'_> {}
