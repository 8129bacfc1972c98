//! Policy knobs for a projection run.

use rustc_hash::FxHashSet;

/// How encountered-but-unregistered types are expanded during the walk.
///
/// Cycle safety comes from the resolved-path cache, not from this policy:
/// it controls output fidelity, never termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recursion {
    /// Types reached only in parameter/return position stay opaque aliases.
    #[default]
    None,
    /// Every encountered type is fully expanded.
    All,
}

/// Configuration for one projection run. Immutable once the walk starts.
#[derive(Debug, Clone)]
pub struct Settings {
    pub recursion: Recursion,
    /// Widen non-primitive slots and returns with `| null`.
    pub use_null: bool,
    /// Render fields as `readonly`.
    pub read_only: bool,
    /// Module name the declaration files and shim are wrapped in.
    pub module_name: String,
    /// Fully-qualified member references (`a.b.Type#member`) excluded from
    /// every renderer.
    pub blacklist: FxHashSet<String>,
    /// Class whose static methods become the umbrella's free functions and
    /// the shim's function bindings.
    pub global_class: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recursion: Recursion::None,
            use_null: false,
            read_only: true,
            module_name: "@tsbind/runtime".to_string(),
            blacklist: FxHashSet::default(),
            global_class: None,
        }
    }
}

impl Settings {
    /// Whether `class#method` is blacklisted.
    pub fn is_blacklisted(&self, class: &str, method: &str) -> bool {
        if self.blacklist.is_empty() {
            return false;
        }
        self.blacklist.contains(&format!("{class}#{method}"))
    }
}
