//! The type graph: dotted-path resolution and the walk pass.
//!
//! The graph owns the namespace arena and drives the single expansion pass.
//! Resolution is infallible by design: a path the model cannot resolve
//! degrades to an opaque alias placeholder instead of failing the run.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use tsbind_model::{TypeModel, TypeRef};

use crate::element::{ClassProjection, Element, EnumProjection, TypeAlias};
use crate::namespace::{ElementKey, NamespaceNode, NodeId, sanitize_path};
use crate::settings::{Recursion, Settings};

pub struct Graph<'m> {
    pub(crate) model: &'m dyn TypeModel,
    pub(crate) settings: Settings,
    nodes: Vec<NamespaceNode>,
    /// Full dotted path -> arena node. One node per unique path prefix.
    paths: FxHashMap<String, NodeId>,
    /// Qualified class paths already resolved to an element this run.
    resolved: FxHashSet<String>,
    /// Elements awaiting their walk, in creation order.
    queue: VecDeque<ElementKey>,
    /// Every element key in creation order, for umbrella pruning.
    generated: Vec<ElementKey>,
    walking: bool,
}

impl<'m> Graph<'m> {
    pub fn new(settings: Settings, model: &'m dyn TypeModel) -> Self {
        let root = NamespaceNode::new(String::new());
        let mut paths = FxHashMap::default();
        paths.insert(String::new(), 0);
        Self {
            model,
            settings,
            nodes: vec![root],
            paths,
            resolved: FxHashSet::default(),
            queue: VecDeque::new(),
            generated: Vec::new(),
            walking: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether the current pass is mid-expansion. Decides eager-vs-lazy
    /// resolution of newly encountered types.
    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn node(&self, id: NodeId) -> &NamespaceNode {
        &self.nodes[id]
    }

    pub fn root(&self) -> &NamespaceNode {
        &self.nodes[0]
    }

    pub fn element(&self, key: &ElementKey) -> Option<&Element> {
        self.nodes[key.node].elements.get(&key.name)
    }

    /// Element keys in creation order.
    pub fn generated(&self) -> &[ElementKey] {
        &self.generated
    }

    /// Non-creating lookup of an element by qualified path.
    pub fn find(&self, qualified: &str) -> Option<&Element> {
        let (ns, leaf) = qualified.rsplit_once('.').unwrap_or(("", qualified));
        let id = *self.paths.get(ns)?;
        self.nodes[id].elements.get(leaf)
    }

    /// Register a type as reachable. Idempotent: a no-op once resolved.
    pub fn add(&mut self, qualified: &str) {
        let _ = self.resolve(qualified);
    }

    /// Resolve a dotted path to its cached element, creating intermediate
    /// namespace nodes on demand.
    ///
    /// A full class/enum projection is built when the model resolves the
    /// path and (it is an enum, or no walk is in progress, or the recursion
    /// policy is `All`); otherwise the path degrades to an alias placeholder
    /// so mention-only types never trigger unbounded expansion.
    pub fn resolve(&mut self, qualified: &str) -> Option<ElementKey> {
        if qualified.is_empty() {
            return None;
        }

        let (ns_path, leaf) = qualified.rsplit_once('.').unwrap_or(("", qualified));
        let node = self.ensure_namespace(ns_path);
        let key = ElementKey {
            node,
            name: leaf.to_string(),
        };

        if !self.resolved.insert(qualified.to_string()) {
            return Some(key);
        }

        let desc = self.model.resolve(qualified).cloned();
        let expand = match &desc {
            Some(d) => {
                d.is_enum || !self.walking || self.settings.recursion == Recursion::All
            }
            None => false,
        };

        let element = match desc {
            Some(d) if expand && d.is_enum => {
                trace!(path = qualified, "projecting enum");
                Element::Enum(EnumProjection::new(d))
            }
            Some(d) if expand => {
                trace!(path = qualified, "projecting class");
                Element::Class(ClassProjection::new(d))
            }
            other => {
                trace!(path = qualified, resolved = other.is_some(), "alias placeholder");
                Element::Alias(TypeAlias {
                    path: qualified.to_string(),
                    resolved: other.is_some(),
                    arity: self.model.arity(qualified),
                })
            }
        };

        self.nodes[node].elements.insert(leaf.to_string(), element);
        self.generated.push(key.clone());
        self.queue.push_back(key.clone());
        Some(key)
    }

    /// Drive one full expansion pass over every registered element and,
    /// transitively, every type their members mention. Termination is
    /// guaranteed by the resolved-path cache, not by depth limiting.
    pub fn walk(&mut self) {
        self.walking = true;
        let mut expanded = 0usize;
        while let Some(key) = self.queue.pop_front() {
            let Some(mut element) = self.nodes[key.node].elements.remove(&key.name) else {
                continue;
            };
            element.walk(self);
            self.nodes[key.node].elements.insert(key.name.clone(), element);
            expanded += 1;
        }
        self.walking = false;
        debug!(elements = expanded, "walk pass complete");
    }

    /// Map a raw type reference to its projected form: script aliases
    /// applied, wildcard generic padding added, sentinel family collapsed,
    /// and every mentioned named type registered on the graph.
    pub fn project(&mut self, ty: &TypeRef) -> TypeRef {
        if self.is_sentinel(ty) {
            return TypeRef::Wildcard;
        }
        match ty {
            TypeRef::Primitive(p) => TypeRef::Primitive(*p),
            TypeRef::Variable(name) => TypeRef::Variable(name.clone()),
            TypeRef::Wildcard => TypeRef::Wildcard,
            TypeRef::Named(path) => self.project_named(path, true),
            TypeRef::Generic { base, args } => {
                let base = match base.as_ref() {
                    // The base keeps its own args; no padding.
                    TypeRef::Named(path) => self.project_named(path, false),
                    other => self.project(other),
                };
                TypeRef::Generic {
                    base: Box::new(base),
                    args: args.iter().map(|a| self.project(a)).collect(),
                }
            }
            TypeRef::Array { elem, dims } => TypeRef::Array {
                elem: Box::new(self.project(elem)),
                dims: *dims,
            },
            TypeRef::Union(members) => {
                TypeRef::Union(members.iter().map(|m| self.project(m)).collect())
            }
            TypeRef::Optional(inner) => TypeRef::Optional(Box::new(self.project(inner))),
        }
    }

    fn project_named(&mut self, path: &str, pad: bool) -> TypeRef {
        self.add(path);
        if let Some(alias) = self.model.script_alias(path) {
            return TypeRef::named(alias);
        }
        let arity = self.model.arity(path);
        // Reserved-word segments are sanitized so declaration references
        // match the sanitized namespace blocks.
        let display = sanitize_path(path);
        if pad && arity > 0 {
            // References without explicit arguments get wildcard padding.
            TypeRef::Generic {
                base: Box::new(TypeRef::named(display)),
                args: vec![TypeRef::Wildcard; arity],
            }
        } else {
            TypeRef::named(display)
        }
    }

    /// The untyped-object sentinel family: the object root itself and its
    /// 1- through 10-dimensional array forms. Seeing one collapses the
    /// enclosing union entirely.
    pub fn is_sentinel(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Named(path) => path == self.model.object_root(),
            TypeRef::Array { elem, dims } if (1..=10).contains(dims) => {
                matches!(elem.as_ref(), TypeRef::Named(path) if path == self.model.object_root())
            }
            _ => false,
        }
    }

    fn ensure_namespace(&mut self, path: &str) -> NodeId {
        if path.is_empty() {
            return 0;
        }
        if let Some(id) = self.paths.get(path) {
            return *id;
        }
        let mut current = 0;
        let mut prefix = String::new();
        for segment in path.split('.') {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(segment);
            current = match self.paths.get(&prefix) {
                Some(id) => *id,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(NamespaceNode::new(prefix.clone()));
                    self.paths.insert(prefix.clone(), id);
                    self.nodes[current]
                        .children
                        .insert(segment.to_string(), id);
                    id
                }
            };
        }
        current
    }

    /// Emit one nested declaration block for a namespace subtree: child
    /// namespaces first, then elements, both in lexicographic order, each
    /// one level deeper than `prefix`.
    pub fn compile_namespace(&self, id: NodeId, prefix: &str) -> String {
        let node = &self.nodes[id];
        let mut out = format!("{prefix}export namespace {} {{\n", node.name);
        let inner = format!("{prefix}  ");
        for (_, child) in node.children() {
            out.push_str(&self.compile_namespace(child, &inner));
            out.push('\n');
        }
        for (_, element) in node.elements() {
            out.push_str(&element.compile(&inner, &self.settings));
            out.push('\n');
        }
        out.push_str(prefix);
        out.push('}');
        out
    }
}
