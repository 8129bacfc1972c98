//! Type-projection engine for the tsbind generator.
//!
//! Projects a reflected class surface (a [`tsbind_model::TypeModel`]) into
//! two artifact sets: statically-typed declaration files and a Lua runtime
//! binding shim. The pipeline is strictly sequential and one-shot:
//!
//! 1. root classes are registered on the [`Compiler`]
//! 2. one [`Graph::walk`] pass expands the reachable type closure under the
//!    recursion policy, populating the namespace arena
//! 3. `compile`/`render` read the frozen tree and materialize artifact text

// Policy knobs: recursion, null widening, blacklist
pub mod settings;
pub use settings::{Recursion, Settings};

// Namespace arena nodes and element keys
pub mod namespace;
pub use namespace::{ElementKey, NamespaceNode, NodeId};

// The walk driver and dotted-path resolver
pub mod graph;
pub use graph::Graph;

// Compiled units: class/enum projections and alias placeholders
pub mod element;
pub use element::{ClassProjection, Element, EnumProjection, TypeAlias};

// Overload clustering and union synthesis
pub mod cluster;
pub use cluster::MethodCluster;

// Compiler driver
pub mod driver;
pub use driver::Compiler;

// Artifact assembly
pub mod render;
pub use render::{Artifact, PARTIAL_START, PARTIAL_STOP};
