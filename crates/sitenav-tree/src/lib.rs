//! Sidebar navigation tree for sitenav.
//!
//! This crate provides:
//! - [`RawNode`] / [`RawTree`]: the sidebar as authored, before validation
//! - [`NavigationTree`]: the validated, immutable tree a renderer walks
//! - [`Route`]: canonical content routes used as `link` values
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use sitenav_tree::{NavigationTree, RawNode};
//!
//! let sidebar = vec![
//!     RawNode::page("Introduction", "/"),
//!     RawNode::group(
//!         "Generic Protocol",
//!         vec![RawNode::page("Overview", "/protocol/overview")],
//!     ),
//! ];
//! let tree = NavigationTree::from_nodes(&sidebar)?;
//!
//! // Build a sidebar or site map
//! let labels: Vec<_> = tree.flatten().map(|node| node.text()).collect();
//! assert_eq!(labels, ["Introduction", "Generic Protocol", "Overview"]);
//!
//! // Map the current page back to its sidebar entry
//! let active = tree.resolve("/protocol/overview")?;
//! assert_eq!(active.parent().unwrap().text(), "Generic Protocol");
//! # Ok(())
//! # }
//! ```

mod error;
mod raw;
mod route;
mod tree;
mod validate;

pub use error::{LabelPath, NotFound, ValidationError, ValidationErrorKind};
pub use raw::{RawEntry, RawId, RawNode, RawTree};
pub use route::{Route, RouteError};
pub use tree::{Breadcrumb, Flatten, NavItem, NavigationTree, NodeId, NodeKind, NodeRef};
