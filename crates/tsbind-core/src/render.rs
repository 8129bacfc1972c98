//! Artifact assembly.
//!
//! Two independent renderers over the same populated tree: per-namespace
//! declaration files plus umbrella/reference files, and the Lua runtime
//! shim. Everything here is read-only over the graph; all text is
//! materialized in memory and handed to the caller's output sink.

use std::path::PathBuf;

use tracing::debug;

use crate::driver::Compiler;
use crate::element::Element;
use crate::namespace::sanitize_path;

/// Marker bracketing generated regions spliced into hand-authored files.
pub const PARTIAL_START: &str = "[PARTIAL:START]";
pub const PARTIAL_STOP: &str = "[PARTIAL:STOP]";

const DECL_DIR: &str = "decl";
const REFERENCE_FILE: &str = "reference.partial.d.ts";
const UMBRELLA_FILE: &str = "api.partial.d.ts";

/// One rendered output file. Paths are relative to the output directory.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub text: String,
}

impl Compiler<'_> {
    /// Render every artifact of the run: one declaration file per top-level
    /// namespace, the reference list, the umbrella module, and the shim.
    pub fn render(&self) -> Vec<Artifact> {
        let mut artifacts = Vec::new();
        let mut decl_files = Vec::new();

        for (_, id) in self.graph.root().children() {
            let node = self.graph.node(id);
            let file_name = format!("{}.d.ts", node.path.replace('.', "_"));
            let mut text = String::from("/** @noSelfInFile */\n");
            text.push_str(&format!(
                "declare module '{}' {{\n",
                self.settings().module_name
            ));
            text.push_str(&self.graph.compile_namespace(id, "  "));
            text.push_str("\n}\n");
            decl_files.push(file_name.clone());
            artifacts.push(Artifact {
                path: PathBuf::from(DECL_DIR).join(file_name),
                text,
            });
        }

        artifacts.push(self.render_reference(&decl_files));
        artifacts.push(self.render_umbrella());
        artifacts.push(self.render_shim());
        debug!(count = artifacts.len(), "rendered artifacts");
        artifacts
    }

    /// The reference-list file: one `/// <reference />` line per
    /// declaration file, sorted, bracketed by the partial markers.
    fn render_reference(&self, decl_files: &[String]) -> Artifact {
        let mut lines: Vec<String> = decl_files
            .iter()
            .map(|f| format!("/// <reference path=\"{DECL_DIR}/{f}\" />\n"))
            .collect();
        lines.sort();

        let mut text = format!("// {PARTIAL_START}\n");
        for line in lines {
            text.push_str(&line);
        }
        text.push_str(&format!("// {PARTIAL_STOP}\n"));
        Artifact {
            path: PathBuf::from(REFERENCE_FILE),
            text,
        }
    }

    /// The umbrella module: re-exports every distinct top-level simple name
    /// (most recently created wins on collision) and the global class's
    /// static methods as free functions.
    fn render_umbrella(&self) -> Artifact {
        let mut text = String::from("/** @noSelfInFile */\n");
        text.push_str(&format!("/// <reference path=\"{REFERENCE_FILE}\" />\n"));
        text.push_str(&format!(
            "declare module '{}' {{\n",
            self.settings().module_name
        ));
        text.push_str(&format!("  // {PARTIAL_START}\n"));

        let mut classes = String::new();
        let mut types = String::new();
        for element in self.pruned_elements() {
            let name = element.simple_name();
            let mut target = sanitize_path(element.qualified());
            if element.arity() > 0 {
                target.push_str(&format!(
                    "<{}>",
                    vec!["any"; element.arity()].join(", ")
                ));
            }
            if element.is_class_like() {
                classes.push_str(&format!("  /** @customConstructor {name}.new */\n"));
                classes.push_str(&format!("  export class {name} extends {target} {{}}\n"));
            } else {
                types.push_str(&format!("  export type {name} = {target};\n"));
            }
        }
        text.push_str(&classes);
        text.push('\n');
        text.push_str(&types);
        text.push('\n');

        for cluster in self.global_clusters() {
            text.push_str(&cluster.compile_function("  ", self.settings()));
            text.push('\n');
        }
        // Event arbitration hooks for custom listener solutions.
        text.push_str("  export function addEventListener(id: string, listener: any): void;\n");
        text.push_str("  export function removeEventListener(id: string, listener: any): void;\n");

        text.push_str(&format!("  // {PARTIAL_STOP}\n"));
        text.push_str("}\n");
        Artifact {
            path: PathBuf::from(UMBRELLA_FILE),
            text,
        }
    }

    /// The dynamic-language shim: fixed utility bindings, the global
    /// class's function forwards, then one global-lookup binding per
    /// distinct top-level class/enum simple name.
    fn render_shim(&self) -> Artifact {
        let mut text = String::from("local Exports = {}\n");
        text.push_str(&format!("-- {PARTIAL_START}\n"));
        text.push_str("function Exports.tonumber(arg) return tonumber(arg) end\n");
        text.push_str("function Exports.tostring(arg) return tostring(arg) end\n");
        text.push_str("function Exports.global(id) return _G[id] end\n");
        text.push_str("function Exports.loadstring(lua) return loadstring(lua) end\n");
        text.push_str("function Exports.execute(lua) return loadstring(lua)() end\n");
        text.push_str("function Exports.addEventListener(id, func) Events[id].Add(func) end\n");
        text.push_str("function Exports.removeEventListener(id, func) Events[id].Remove(func) end\n");

        for cluster in self.global_clusters() {
            text.push_str(&cluster.compile_shim("Exports"));
            text.push('\n');
        }

        for element in self.pruned_elements() {
            if !element.is_class_like() {
                continue;
            }
            let name = element.simple_name();
            text.push_str(&format!(
                "Exports.{name} = loadstring(\"return _G['{name}']\")()\n"
            ));
        }

        text.push_str(&format!("-- {PARTIAL_STOP}\n"));
        text.push_str("return Exports\n");

        // Named after the module so require-style loading resolves it.
        Artifact {
            path: PathBuf::from(format!("{}.lua", self.module_stem())),
            text,
        }
    }

    /// Generated elements pruned to distinct top-level simple names:
    /// iterate in reverse creation order so the most recent wins, then sort
    /// by simple name. Unresolved aliases never surface here.
    fn pruned_elements(&self) -> Vec<&Element> {
        let mut seen: Vec<&str> = Vec::new();
        let mut pruned: Vec<&Element> = Vec::new();
        for key in self.graph.generated().iter().rev() {
            let Some(element) = self.graph.element(key) else {
                continue;
            };
            if !element.is_resolved() {
                continue;
            }
            let name = element.simple_name();
            if seen.contains(&name) {
                continue;
            }
            seen.push(name);
            pruned.push(element);
        }
        pruned.sort_by_key(|e| e.simple_name().to_string());
        pruned
    }

    /// Static clusters of the configured global class, in name order.
    fn global_clusters(&self) -> Vec<&crate::cluster::MethodCluster> {
        let Some(global) = self.settings().global_class.as_deref() else {
            return Vec::new();
        };
        match self.graph.find(global) {
            Some(Element::Class(class)) => class.static_clusters().collect(),
            _ => Vec::new(),
        }
    }

    fn module_stem(&self) -> &str {
        let module = self.settings().module_name.as_str();
        module.rsplit('/').next().unwrap_or(module)
    }
}
