//! The compiler driver.
//!
//! Owns the policy and the graph for one run: register root classes, trigger
//! exactly one walk pass, then render artifacts over the frozen tree.

use tracing::debug;

use tsbind_model::{TypeModel, simple_name};

use crate::graph::Graph;
use crate::settings::Settings;

pub struct Compiler<'m> {
    pub graph: Graph<'m>,
}

impl<'m> Compiler<'m> {
    pub fn new(settings: Settings, model: &'m dyn TypeModel) -> Self {
        Self {
            graph: Graph::new(settings, model),
        }
    }

    pub fn settings(&self) -> &Settings {
        self.graph.settings()
    }

    /// Register a root class. Roots resolve eagerly (before the walk), so
    /// they always get a full projection regardless of recursion policy.
    pub fn add(&mut self, qualified: &str) {
        self.graph.add(qualified);
    }

    /// Register a set of roots in simple-name order, so registration order
    /// in the manifest cannot change the output.
    pub fn add_all<'a>(&mut self, roots: impl IntoIterator<Item = &'a str>) {
        let mut roots: Vec<&str> = roots.into_iter().collect();
        roots.sort_by_key(|r| (simple_name(r).to_string(), r.to_string()));
        roots.dedup();
        for root in roots {
            self.add(root);
        }
    }

    /// Expand the reachable type closure. One pass per run.
    pub fn walk(&mut self) {
        debug!(roots = self.graph.generated().len(), "starting walk");
        self.graph.walk();
    }
}
