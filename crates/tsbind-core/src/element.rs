//! Compiled units: class projections, enum projections, alias placeholders.
//!
//! An element is created once on first resolve, cached for the remainder of
//! the run, and never mutated after compilation starts reading it.

use indexmap::IndexMap;

use tsbind_model::{ClassDesc, TypeRef, simple_name};

use crate::cluster::MethodCluster;
use crate::graph::Graph;
use crate::namespace::sanitize_path;
use crate::settings::Settings;

/// The polymorphic compiled unit keyed by (namespace, leaf name).
#[derive(Debug)]
pub enum Element {
    Class(ClassProjection),
    Enum(EnumProjection),
    Alias(TypeAlias),
}

impl Element {
    /// Fully-qualified reflected path.
    pub fn qualified(&self) -> &str {
        match self {
            Self::Class(class) => &class.desc.name,
            Self::Enum(en) => &en.name,
            Self::Alias(alias) => &alias.path,
        }
    }

    pub fn simple_name(&self) -> &str {
        simple_name(self.qualified())
    }

    /// Generic type-parameter arity, for wildcard padding in references.
    pub fn arity(&self) -> usize {
        match self {
            Self::Class(class) => class.desc.arity(),
            Self::Enum(_) => 0,
            Self::Alias(alias) => alias.arity,
        }
    }

    /// Whether this element binds a constructible runtime value.
    pub fn is_class_like(&self) -> bool {
        matches!(self, Self::Class(_) | Self::Enum(_))
    }

    /// Whether the reflected path resolved to a known class.
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::Class(_) | Self::Enum(_) => true,
            Self::Alias(alias) => alias.resolved,
        }
    }

    pub(crate) fn walk(&mut self, graph: &mut Graph<'_>) {
        match self {
            Self::Class(class) => class.walk(graph),
            // Enum members and alias targets carry no expandable types.
            Self::Enum(_) | Self::Alias(_) => {}
        }
    }

    pub fn compile(&self, prefix: &str, settings: &Settings) -> String {
        match self {
            Self::Class(class) => class.compile(prefix, settings),
            Self::Enum(en) => en.compile(prefix),
            Self::Alias(alias) => alias.compile(prefix),
        }
    }
}

/// A field with its projected type.
#[derive(Debug)]
pub struct ProjectedField {
    pub name: String,
    pub is_static: bool,
    pub ty: TypeRef,
}

/// A fully-expanded class: clusters per (dispatch name, static-kind),
/// projected fields, and the extended class when resolvable.
#[derive(Debug)]
pub struct ClassProjection {
    pub desc: ClassDesc,
    pub superclass: Option<TypeRef>,
    pub fields: Vec<ProjectedField>,
    pub clusters: Vec<MethodCluster>,
}

impl ClassProjection {
    pub fn new(desc: ClassDesc) -> Self {
        Self {
            desc,
            superclass: None,
            fields: Vec::new(),
            clusters: Vec::new(),
        }
    }

    /// Static clusters of this class, in name order.
    pub fn static_clusters(&self) -> impl Iterator<Item = &MethodCluster> {
        self.clusters.iter().filter(|c| c.is_static && c.exists)
    }

    fn walk(&mut self, graph: &mut Graph<'_>) {
        if let Some(superclass) = self.desc.superclass.clone() {
            let projected = graph.project(&superclass);
            // An extends clause against the wildcard is meaningless.
            if projected != TypeRef::Wildcard {
                self.superclass = Some(projected);
            }
        }

        for field in self.desc.fields.clone() {
            let ty = graph.project(&field.ty);
            self.fields.push(ProjectedField {
                name: field.name,
                is_static: field.is_static,
                ty,
            });
        }

        // Group overloads by (dispatch name, static-kind), dropping
        // blacklisted members before they reach any renderer.
        let mut groups: IndexMap<(String, bool), Vec<tsbind_model::MethodDesc>> = IndexMap::new();
        for method in self.desc.methods.clone() {
            if graph.settings().is_blacklisted(&self.desc.name, &method.name) {
                continue;
            }
            groups
                .entry((method.name.clone(), method.is_static))
                .or_default()
                .push(method);
        }

        for ((dispatch, is_static), overloads) in groups {
            self.clusters
                .push(MethodCluster::build(graph, dispatch, is_static, overloads));
        }
        // Static declarations first, each group in name order.
        self.clusters
            .sort_by(|a, b| b.is_static.cmp(&a.is_static).then_with(|| a.name.cmp(&b.name)));
    }

    fn compile(&self, prefix: &str, settings: &Settings) -> String {
        let mut out = format!("{prefix}export class {}", simple_name(&self.desc.name));
        if !self.desc.type_params.is_empty() {
            out.push_str(&format!("<{}>", self.desc.type_params.join(", ")));
        }
        if let Some(superclass) = &self.superclass {
            out.push_str(&format!(" extends {}", superclass.render_decl()));
        }
        out.push_str(" {\n");

        let inner = format!("{prefix}  ");
        for field in &self.fields {
            out.push_str(&inner);
            if field.is_static {
                out.push_str("static ");
            }
            if settings.read_only {
                out.push_str("readonly ");
            }
            out.push_str(&format!("{}: {};\n", field.name, field.ty.render_decl()));
        }

        for cluster in self.clusters.iter().filter(|c| c.exists) {
            out.push_str(&cluster.compile(&inner, settings));
            out.push('\n');
        }

        out.push_str(prefix);
        out.push('}');
        out
    }
}

/// An enum projection: ordered member names, no structural expansion.
#[derive(Debug)]
pub struct EnumProjection {
    pub name: String,
    pub constants: Vec<String>,
}

impl EnumProjection {
    pub fn new(desc: ClassDesc) -> Self {
        Self {
            name: desc.name,
            constants: desc.constants,
        }
    }

    fn compile(&self, prefix: &str) -> String {
        let mut out = format!("{prefix}export enum {} {{\n", simple_name(&self.name));
        for constant in &self.constants {
            out.push_str(&format!("{prefix}  {constant},\n"));
        }
        out.push_str(prefix);
        out.push('}');
        out
    }
}

/// An opaque forward reference: a type alias carrying only the path.
#[derive(Debug)]
pub struct TypeAlias {
    pub path: String,
    /// Whether the model could resolve the path at all. Unresolved aliases
    /// degrade to `any`.
    pub resolved: bool,
    pub arity: usize,
}

impl TypeAlias {
    fn compile(&self, prefix: &str) -> String {
        let target = if self.resolved {
            let mut target = sanitize_path(&self.path);
            if self.arity > 0 {
                target.push_str(&format!("<{}>", vec!["any"; self.arity].join(", ")));
            }
            target
        } else {
            "any".to_string()
        };
        format!("{prefix}export type {} = {target};", simple_name(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_projection_lists_members_in_declared_order() {
        let en = EnumProjection {
            name: "demo.Direction".to_string(),
            constants: vec!["NORTH".to_string(), "SOUTH".to_string(), "EAST".to_string()],
        };
        assert_eq!(
            en.compile("  "),
            "  export enum Direction {\n    NORTH,\n    SOUTH,\n    EAST,\n  }"
        );
    }

    #[test]
    fn unresolved_alias_degrades_to_any() {
        let alias = TypeAlias {
            path: "ghost.Missing".to_string(),
            resolved: false,
            arity: 0,
        };
        assert_eq!(alias.compile(""), "export type Missing = any;");
    }

    #[test]
    fn resolved_alias_points_at_reflected_path_with_padding() {
        let alias = TypeAlias {
            path: "java.util.Map".to_string(),
            resolved: true,
            arity: 2,
        };
        assert_eq!(
            alias.compile(""),
            "export type Map = java.util.Map<any, any>;"
        );
    }
}
