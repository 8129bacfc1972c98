//! Namespace arena nodes.
//!
//! Namespaces form a tree keyed by dotted-path segments, stored as an arena
//! owned by the [`crate::Graph`]. Exactly one node exists per unique path
//! prefix; the graph's path index enforces the sharing invariant.

use std::collections::BTreeMap;

use crate::element::Element;

/// Index of a node in the graph's arena.
pub type NodeId = usize;

/// Segment names that collide with declaration keywords get
/// underscore-wrapped, the same rule member names follow. Kahlua's
/// `integration.function` package is the known offender.
pub(crate) fn sanitize_segment(segment: &str) -> String {
    if segment == "function" {
        format!("_{segment}_")
    } else {
        segment.to_string()
    }
}

/// Apply segment sanitizing across every segment of a dotted path.
pub(crate) fn sanitize_path(path: &str) -> String {
    path.split('.')
        .map(sanitize_segment)
        .collect::<Vec<_>>()
        .join(".")
}

/// Stable address of an element: its owning namespace node plus leaf name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementKey {
    pub node: NodeId,
    pub name: String,
}

/// One dotted-path segment, owning child namespaces and named elements.
///
/// Children and elements are kept in `BTreeMap`s so every traversal is
/// lexicographic without explicit sorting.
#[derive(Debug)]
pub struct NamespaceNode {
    /// Full dotted path; empty for the root.
    pub path: String,
    /// Last path segment, sanitized for declaration output; empty for the
    /// root.
    pub name: String,
    pub(crate) children: BTreeMap<String, NodeId>,
    pub(crate) elements: BTreeMap<String, Element>,
}

impl NamespaceNode {
    pub(crate) fn new(path: String) -> Self {
        let name = sanitize_segment(path.rsplit('.').next().unwrap_or(""));
        Self {
            path,
            name,
            children: BTreeMap::new(),
            elements: BTreeMap::new(),
        }
    }

    /// Child namespaces by segment name, in lexicographic order.
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Elements by leaf name, in lexicographic order.
    pub fn elements(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.elements.iter().map(|(name, el)| (name.as_str(), el))
    }

}
