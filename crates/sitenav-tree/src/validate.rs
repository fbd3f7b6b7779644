//! Validation of raw sidebar input.
//!
//! A single depth-first walk over a [`RawTree`], in declared sibling order,
//! checks every invariant while it builds the validated node arena. The walk
//! keeps its own stack, so arbitrarily deep sidebars validate. It
//! either stops at the first violation ([`NavigationTree::validate`]) or
//! keeps going and collects all of them ([`NavigationTree::diagnose`]).

use std::collections::HashMap;

use crate::error::{LabelPath, ValidationError, ValidationErrorKind};
use crate::raw::{RawEntry, RawId, RawNode, RawTree};
use crate::route::Route;
use crate::tree::{NavigationTree, Node, NodeId, NodeKind};

impl NavigationTree {
    /// Validate a raw arena into a navigation tree.
    ///
    /// `collapsed` is normalized to an explicit `false` where omitted and
    /// every link is canonicalized into a [`Route`].
    ///
    /// # Errors
    ///
    /// Returns the first violation met during the depth-first walk.
    pub fn validate(raw: &RawTree) -> Result<Self, ValidationError> {
        let mut walker = Walker::new(raw, true);
        walker.run();

        if let Some(err) = walker.errors.into_iter().next() {
            return Err(err);
        }

        let tree = Self::new(walker.nodes, walker.roots);
        tracing::debug!(
            nodes = tree.len(),
            routes = tree.route_count(),
            "Validated navigation tree"
        );
        Ok(tree)
    }

    /// Validate nested authored nodes.
    ///
    /// # Errors
    ///
    /// Returns the first violation met during the depth-first walk.
    pub fn from_nodes(nodes: &[RawNode]) -> Result<Self, ValidationError> {
        Self::validate(&RawTree::from_nodes(nodes))
    }

    /// Collect every violation instead of stopping at the first.
    ///
    /// Returns an empty list when `raw` is valid. When it is not, the first
    /// element is the error [`NavigationTree::validate`] would return.
    #[must_use]
    pub fn diagnose(raw: &RawTree) -> Vec<ValidationError> {
        let mut walker = Walker::new(raw, false);
        walker.run();
        walker.errors
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    OnStack,
    Done,
}

/// Pending work on the walk stack.
enum Frame {
    /// Check and build an entry listed under `parent` (`None` at root level).
    Enter { id: RawId, parent: Option<NodeId> },
    /// Every descendant of the entry has been walked.
    Exit { id: RawId },
}

struct Walker<'a> {
    raw: &'a RawTree,
    fail_fast: bool,
    visits: Vec<Visit>,
    labels: Vec<String>,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    claimed: HashMap<Route, LabelPath>,
    errors: Vec<ValidationError>,
}

impl<'a> Walker<'a> {
    fn new(raw: &'a RawTree, fail_fast: bool) -> Self {
        Self {
            raw,
            fail_fast,
            visits: vec![Visit::Pending; raw.len()],
            labels: Vec::new(),
            nodes: Vec::with_capacity(raw.len()),
            roots: Vec::new(),
            claimed: HashMap::new(),
            errors: Vec::new(),
        }
    }

    fn stopped(&self) -> bool {
        self.fail_fast && !self.errors.is_empty()
    }

    /// Walk the arena with an explicit stack so nesting depth is bounded by
    /// memory, not by the thread's stack.
    fn run(&mut self) {
        let mut stack: Vec<Frame> = self
            .raw
            .roots()
            .iter()
            .rev()
            .map(|&id| Frame::Enter { id, parent: None })
            .collect();

        while let Some(frame) = stack.pop() {
            if self.stopped() {
                return;
            }
            match frame {
                Frame::Enter { id, parent } => self.enter(id, parent, &mut stack),
                Frame::Exit { id } => {
                    self.labels.pop();
                    self.visits[id.index()] = Visit::Done;
                }
            }
        }
    }

    fn report(&mut self, kind: ValidationErrorKind) {
        self.errors
            .push(ValidationError::new(LabelPath::new(self.labels.clone()), kind));
    }

    /// Report a violation located at `text` under the current path.
    fn report_at(&mut self, text: &str, kind: ValidationErrorKind) {
        self.labels.push(text.to_owned());
        self.report(kind);
        self.labels.pop();
    }

    /// Check one raw entry and, if it is structurally sound, append it to the
    /// output arena and schedule its children.
    fn enter(&mut self, id: RawId, parent: Option<NodeId>, stack: &mut Vec<Frame>) {
        let raw = self.raw;
        let Some(entry) = raw.entry(id) else {
            // Located at the listing node; the entry has no label of its own
            self.report(ValidationErrorKind::UnknownEntry { id });
            return;
        };

        // Reentry checks come first: walking into a revisited subtree again
        // would report its errors twice, or never terminate.
        match self.visits[id.index()] {
            Visit::Pending => {}
            Visit::OnStack => {
                self.report_at(&entry.text, ValidationErrorKind::CyclicStructure);
                return;
            }
            Visit::Done => {
                self.report_at(&entry.text, ValidationErrorKind::SharedNode);
                return;
            }
        }

        self.visits[id.index()] = Visit::OnStack;
        self.labels.push(entry.text.clone());
        // Pops the label and settles the visit once the subtree is done,
        // including when the entry itself is rejected below.
        stack.push(Frame::Exit { id });

        let Some(node_id) = self.build(entry, parent) else {
            return;
        };
        match parent {
            Some(parent) => {
                if let NodeKind::Group { items, .. } = &mut self.nodes[parent.0].kind {
                    items.push(node_id);
                }
            }
            None => self.roots.push(node_id),
        }

        if let Some(children) = entry.items.as_deref() {
            // Reverse so siblings pop in declared order
            stack.extend(children.iter().rev().map(|&child| Frame::Enter {
                id: child,
                parent: Some(node_id),
            }));
        }
    }

    /// Run the per-node checks and append the node, in pre-order.
    fn build(&mut self, entry: &RawEntry, parent: Option<NodeId>) -> Option<NodeId> {
        if entry.text.trim().is_empty() {
            self.report(ValidationErrorKind::EmptyLabel);
            if self.stopped() {
                return None;
            }
        }

        let link = match entry.link.as_deref().map(|link| (link, Route::parse(link))) {
            None => None,
            Some((_, Ok(route))) => self.claim(route),
            Some((link, Err(reason))) => {
                self.report(ValidationErrorKind::MalformedLink {
                    link: link.to_owned(),
                    reason,
                });
                None
            }
        };
        if self.stopped() {
            return None;
        }

        let kind = match entry.items.as_deref() {
            Some([]) if entry.link.is_none() => {
                self.report(ValidationErrorKind::AmbiguousNode);
                return None;
            }
            Some([]) | None => {
                if entry.collapsed.is_some() {
                    tracing::warn!(
                        path = %LabelPath::new(self.labels.clone()),
                        "collapsed has no effect on a node without items"
                    );
                }
                match link {
                    Some(link) => NodeKind::Page { link },
                    None if entry.link.is_some() => return None,
                    None => NodeKind::Label,
                }
            }
            Some(_) => {
                if link.is_some() {
                    tracing::warn!(
                        path = %LabelPath::new(self.labels.clone()),
                        "Group carries a link; label navigates and items expand"
                    );
                }
                NodeKind::Group {
                    link,
                    collapsed: entry.collapsed.unwrap_or(false),
                    items: Vec::new(),
                }
            }
        };

        let node_id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            text: entry.text.clone(),
            kind,
            parent,
            depth: self.labels.len(),
        });
        Some(node_id)
    }

    /// Record `route` as owned by the current node, reporting a duplicate if
    /// another node already owns it.
    fn claim(&mut self, route: Route) -> Option<Route> {
        if let Some(first) = self.claimed.get(&route) {
            let first = first.clone();
            self.report(ValidationErrorKind::DuplicateLink { route, first });
            return None;
        }
        self.claimed
            .insert(route.clone(), LabelPath::new(self.labels.clone()));
        Some(route)
    }
}
