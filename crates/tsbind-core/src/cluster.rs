//! Method-overload clustering.
//!
//! All overloads sharing a dispatch name and static-kind compile into one
//! exported declaration. The cluster synthesizes a column-wise union per
//! parameter slot and a union over return types, under a deterministic
//! total order so output is reproducible regardless of enumeration order.

use std::cmp::Ordering;

use indexmap::IndexMap;

use tsbind_model::{MethodDesc, TypeRef};

use crate::graph::Graph;
use crate::settings::Settings;

/// Deterministic total order over overloads:
/// parameter count, then each parameter's qualified type name in declaration
/// order, then the qualified return type name.
pub fn overload_order(a: &MethodDesc, b: &MethodDesc) -> Ordering {
    a.params
        .len()
        .cmp(&b.params.len())
        .then_with(|| {
            for (pa, pb) in a.params.iter().zip(&b.params) {
                let cmp = pa.ty.qualified_name().cmp(&pb.ty.qualified_name());
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            Ordering::Equal
        })
        .then_with(|| a.returns.qualified_name().cmp(&b.returns.qualified_name()))
}

/// Column-wise union data for one parameter slot.
#[derive(Debug, Default)]
struct SlotUnion {
    /// Distinct projected types, insertion-ordered, keyed by qualified name.
    types: IndexMap<String, TypeRef>,
    /// The sentinel was seen here; the whole slot renders as the wildcard.
    collapsed: bool,
    non_primitive_seen: bool,
    vararg_seen: bool,
}

impl SlotUnion {
    fn record(&mut self, graph: &mut Graph<'_>, raw: &TypeRef, vararg: bool) {
        self.non_primitive_seen |= !raw.is_primitive();
        self.vararg_seen |= vararg;
        if graph.is_sentinel(raw) {
            // Whole-slot collapse: prior and later members are discarded.
            self.collapsed = true;
            return;
        }
        let projected = graph.project(raw);
        self.types
            .entry(projected.qualified_name())
            .or_insert(projected);
    }

    fn synthesize(&self, use_null: bool) -> TypeRef {
        if self.collapsed {
            // `any` subsumes null; no widening on a collapsed slot.
            return TypeRef::Wildcard;
        }
        let mut ty = if self.types.len() == 1 {
            self.types[0].clone()
        } else {
            TypeRef::Union(self.types.values().cloned().collect())
        };
        if use_null && self.non_primitive_seen {
            ty = TypeRef::Optional(Box::new(ty));
        }
        ty
    }
}

/// The overload set for one (dispatch name, static-kind) pair, with its
/// synthesized per-slot and return unions.
#[derive(Debug)]
pub struct MethodCluster {
    /// Exported name, possibly remapped by an override-name annotation.
    pub name: String,
    pub dispatch_name: String,
    pub is_static: bool,
    /// False only for degenerate empty clusters, which every renderer skips.
    pub exists: bool,
    pub min_param_count: usize,
    overloads: Vec<MethodDesc>,
    slots: Vec<SlotUnion>,
    returns: SlotUnion,
    /// Generic type-parameter names across overloads, deduplicated in order.
    type_params: Vec<String>,
}

impl MethodCluster {
    /// Build a cluster from every overload of `dispatch_name` with the given
    /// static-kind, projecting each mentioned type through the graph.
    pub fn build(
        graph: &mut Graph<'_>,
        dispatch_name: String,
        is_static: bool,
        mut overloads: Vec<MethodDesc>,
    ) -> Self {
        overloads.sort_by(overload_order);

        let exists = !overloads.is_empty();
        let name = overloads
            .first()
            .map(|m| m.declared_name().to_string())
            .unwrap_or_else(|| dispatch_name.clone());
        let min_param_count = overloads
            .iter()
            .map(|m| m.params.len())
            .min()
            .unwrap_or(0);

        let mut slots: Vec<SlotUnion> = Vec::new();
        let mut returns = SlotUnion::default();
        let mut type_params: Vec<String> = Vec::new();

        for method in &overloads {
            for (index, param) in method.params.iter().enumerate() {
                if slots.len() <= index {
                    slots.push(SlotUnion::default());
                }
                slots[index].record(graph, &param.ty, param.vararg);
            }
            returns.record(graph, &method.returns, false);
            for tp in &method.type_params {
                if !type_params.contains(tp) {
                    type_params.push(tp.clone());
                }
            }
        }

        Self {
            name,
            dispatch_name,
            is_static,
            exists,
            min_param_count,
            overloads,
            slots,
            returns,
            type_params,
        }
    }

    /// Overloads in cluster order.
    pub fn overloads(&self) -> &[MethodDesc] {
        &self.overloads
    }

    /// The synthesized union for parameter slot `index`.
    pub fn slot_type(&self, index: usize, use_null: bool) -> TypeRef {
        self.slots[index].synthesize(use_null)
    }

    /// The synthesized return union.
    pub fn return_type(&self, use_null: bool) -> TypeRef {
        self.returns.synthesize(use_null)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Whether slot `index` ever held the variadic terminal parameter.
    pub fn slot_is_vararg(&self, index: usize) -> bool {
        self.slots[index].vararg_seen
    }

    /// Declaration-doc block listing each overload's parameter signature and
    /// return type; the shim renderer's authoring aid.
    fn docs(&self, prefix: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        if self.is_static {
            lines.push("@noSelf".to_string());
            lines.push(String::new());
        }
        lines.push("Method Parameters:".to_string());
        for method in &self.overloads {
            let sig = if method.params.is_empty() {
                "(Empty)".to_string()
            } else {
                let parts: Vec<String> = method
                    .params
                    .iter()
                    .map(|p| {
                        let ty = if p.vararg {
                            match &p.ty {
                                TypeRef::Array { elem, dims: 1 } => {
                                    format!("{}...", elem.render_doc())
                                }
                                other => format!("{}...", other.render_doc()),
                            }
                        } else {
                            p.ty.render_doc()
                        };
                        format!("{ty} {}", p.name)
                    })
                    .collect();
                format!("({})", parts.join(", "))
            };
            lines.push(format!(" - {sig}: {}", method.returns.render_doc()));
        }

        let mut out = format!("{prefix}/**\n");
        for line in lines {
            if line.is_empty() {
                out.push_str(&format!("{prefix} *\n"));
            } else {
                out.push_str(&format!("{prefix} * {line}\n"));
            }
        }
        out.push_str(&format!("{prefix} */"));
        out
    }

    fn signature(&self, use_null: bool) -> String {
        let mut out = String::new();
        if !self.type_params.is_empty() {
            out.push_str(&format!("<{}>", self.type_params.join(", ")));
        }
        out.push('(');
        let params: Vec<String> = (0..self.slots.len())
            .map(|index| {
                let ty = self.slot_type(index, use_null);
                // A trailing vararg slot renders as a rest parameter, which
                // requires an array type and admits no `?` marker.
                if index + 1 == self.slots.len()
                    && self.slot_is_vararg(index)
                    && matches!(ty, TypeRef::Array { .. })
                {
                    return format!("...arg{index}: {}", ty.render_decl());
                }
                let optional = if index >= self.min_param_count { "?" } else { "" };
                format!("arg{index}{optional}: {}", ty.render_decl())
            })
            .collect();
        out.push_str(&params.join(", "));
        out.push_str(&format!("): {};", self.return_type(use_null).render_decl()));
        out
    }

    /// Class-member declaration form.
    pub fn compile(&self, prefix: &str, settings: &Settings) -> String {
        let mut out = self.docs(prefix);
        out.push('\n');
        out.push_str(prefix);
        if self.is_static {
            out.push_str("static ");
        }
        out.push_str(&sanitize_name(&self.name));
        out.push_str(&self.signature(settings.use_null));
        out
    }

    /// Free-function declaration form, for the umbrella module block.
    pub fn compile_function(&self, prefix: &str, settings: &Settings) -> String {
        let mut out = self.docs(prefix);
        out.push('\n');
        out.push_str(prefix);
        out.push_str("export function ");
        out.push_str(&sanitize_name(&self.name));
        out.push_str(&self.signature(settings.use_null));
        out
    }

    /// Shim binding form, using the first overload's parameter names. The
    /// table member carries the sanitized name; the forwarded call must hit
    /// the runtime global, which is never sanitized.
    pub fn compile_shim(&self, table: &str) -> String {
        let params = self
            .overloads
            .first()
            .map(|m| {
                m.params
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        format!(
            "function {table}.{member}({params}) return {target}({params}) end",
            member = sanitize_name(&self.name),
            target = self.name,
        )
    }
}

/// Names that collide with scripting-layer keywords get underscore-wrapped.
pub(crate) fn sanitize_name(name: &str) -> String {
    if name == "instanceof" {
        format!("_{name}_")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsbind_model::{ClassDesc, ManifestModel, ParamDesc};

    fn method(name: &str, params: &[&str], returns: &str) -> MethodDesc {
        MethodDesc {
            name: name.to_string(),
            exported_name: None,
            is_static: false,
            params: params
                .iter()
                .enumerate()
                .map(|(i, ty)| ParamDesc {
                    name: format!("arg{i}"),
                    ty: TypeRef::parse(ty),
                    vararg: false,
                })
                .collect(),
            returns: TypeRef::parse(returns),
            type_params: vec![],
        }
    }

    fn build(overloads: Vec<MethodDesc>) -> MethodCluster {
        let model = ManifestModel::new();
        let mut graph = Graph::new(Settings::default(), &model);
        MethodCluster::build(&mut graph, "m".to_string(), false, overloads)
    }

    #[test]
    fn ordering_is_total_and_input_independent() {
        let a = method("m", &["int"], "void");
        let b = method("m", &["int", "int"], "void");
        let c = method("m", &["java.lang.String"], "void");
        let d = method("m", &["int"], "int");

        let forward = build(vec![a.clone(), b.clone(), c.clone(), d.clone()]);
        let reverse = build(vec![d, c, b, a]);

        let names = |cluster: &MethodCluster| {
            cluster
                .overloads()
                .iter()
                .map(|m| {
                    let params: Vec<String> =
                        m.params.iter().map(|p| p.ty.qualified_name()).collect();
                    format!("({}): {}", params.join(","), m.returns.qualified_name())
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&forward), names(&reverse));
        // count first, then param types, then return type
        assert_eq!(
            names(&forward),
            ["(int): int", "(int): void", "(java.lang.String): void", "(int,int): void"]
        );
    }

    #[test]
    fn slot_union_accumulates_distinct_types() {
        let cluster = build(vec![
            method("m", &["int"], "void"),
            method("m", &["java.lang.String"], "void"),
        ]);
        assert_eq!(cluster.min_param_count, 1);
        assert_eq!(cluster.slot_type(0, false).render_decl(), "number | string");
    }

    #[test]
    fn trailing_slots_become_optional() {
        let cluster = build(vec![
            method("m", &["int"], "void"),
            method("m", &["int", "int"], "void"),
        ]);
        assert_eq!(cluster.min_param_count, 1);
        assert_eq!(cluster.slot_count(), 2);
        assert_eq!(cluster.slot_type(1, false).render_decl(), "number");
        let compiled = cluster.compile("", &Settings::default());
        assert!(compiled.contains("(arg0: number, arg1?: number): void;"), "{compiled}");
    }

    #[test]
    fn sentinel_collapses_entire_slot_union() {
        let cluster = build(vec![
            method("m", &["java.lang.String"], "void"),
            method("m", &["java.lang.Object"], "void"),
            method("m", &["int"], "void"),
        ]);
        assert_eq!(cluster.slot_type(0, false), TypeRef::Wildcard);
    }

    #[test]
    fn sentinel_array_collapses_return_union() {
        let cluster = build(vec![
            method("m", &[], "java.lang.String"),
            method("m", &[], "java.lang.Object[][]"),
        ]);
        assert_eq!(cluster.return_type(false), TypeRef::Wildcard);
    }

    #[test]
    fn null_widening_marks_non_primitive_slots_only() {
        let settings = Settings {
            use_null: true,
            ..Settings::default()
        };
        let cluster = build(vec![method("m", &["java.lang.String", "int"], "java.lang.String")]);
        let compiled = cluster.compile("", &settings);
        assert!(
            compiled.contains("(arg0: string | null, arg1: number): string | null;"),
            "{compiled}"
        );
    }

    #[test]
    fn exported_name_overrides_dispatch_name() {
        let model = ManifestModel::new();
        let mut graph = Graph::new(Settings::default(), &model);
        let mut m = method("getMaxPlayers", &[], "int");
        m.exported_name = Some("getServerMaxPlayers".to_string());
        let cluster =
            MethodCluster::build(&mut graph, "getMaxPlayers".to_string(), false, vec![m]);
        assert_eq!(cluster.name, "getServerMaxPlayers");
        assert_eq!(cluster.dispatch_name, "getMaxPlayers");
    }

    #[test]
    fn generic_type_params_are_collected_across_overloads() {
        let mut a = method("m", &[], "void");
        a.type_params = vec!["T".to_string()];
        let mut b = method("m", &["int"], "void");
        b.type_params = vec!["T".to_string(), "U".to_string()];
        let cluster = build(vec![a, b]);
        let compiled = cluster.compile("", &Settings::default());
        assert!(compiled.contains("m<T, U>("), "{compiled}");
    }

    #[test]
    fn empty_cluster_is_marked_nonexistent() {
        let cluster = build(vec![]);
        assert!(!cluster.exists);
    }

    #[test]
    fn keyword_names_are_sanitized() {
        let cluster = build(vec![MethodDesc {
            name: "instanceof".to_string(),
            ..method("instanceof", &["java.lang.Object"], "boolean")
        }]);
        let compiled = cluster.compile("", &Settings::default());
        assert!(compiled.contains("_instanceof_(arg0: any): boolean;"), "{compiled}");
    }

    #[test]
    fn trailing_vararg_slot_renders_as_rest_parameter() {
        let mut m = method("log", &["java.lang.String", "int[]"], "void");
        m.params[1].vararg = true;
        let cluster = build(vec![m]);
        let compiled = cluster.compile("", &Settings::default());
        assert!(
            compiled.contains("log(arg0: string, ...arg1: number[]): void;"),
            "{compiled}"
        );
    }

    #[test]
    fn shim_member_is_sanitized_but_forwards_to_runtime_name() {
        let cluster = build(vec![MethodDesc {
            name: "instanceof".to_string(),
            ..method("instanceof", &["java.lang.Object"], "boolean")
        }]);
        assert_eq!(
            cluster.compile_shim("Exports"),
            "function Exports._instanceof_(arg0) return instanceof(arg0) end"
        );
    }

    #[test]
    fn shim_form_forwards_first_overload_params() {
        let model = ManifestModel::new();
        let mut graph = Graph::new(Settings::default(), &model);
        let mut m = method("getSquare", &["int", "int"], "java.lang.Object");
        m.params[0].name = "x".to_string();
        m.params[1].name = "y".to_string();
        let cluster = MethodCluster::build(&mut graph, "getSquare".to_string(), true, vec![m]);
        assert_eq!(
            cluster.compile_shim("Exports"),
            "function Exports.getSquare(x, y) return getSquare(x, y) end"
        );
    }

    #[test]
    fn mentioned_types_are_registered_on_the_graph() {
        let mut model = ManifestModel::new();
        model.insert(ClassDesc {
            name: "demo.Holder".to_string(),
            ..ClassDesc::default()
        });
        let mut graph = Graph::new(Settings::default(), &model);
        let _ = MethodCluster::build(
            &mut graph,
            "m".to_string(),
            false,
            vec![method("m", &["demo.Holder"], "void")],
        );
        assert!(graph.find("demo.Holder").is_some());
    }
}
