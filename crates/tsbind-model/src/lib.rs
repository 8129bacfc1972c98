//! Reflected type metadata for the tsbind projection engine.
//!
//! This crate provides the read-only model the projection core consumes:
//! - Type-reference expressions (`TypeRef`, `Primitive`) with one renderer
//!   per output syntax
//! - Class/method/field descriptors (`ClassDesc`, `MethodDesc`, ...)
//! - The `TypeModel` capability trait
//! - A JSON manifest loader (`ManifestModel`)

// Type-reference expressions and the type-string parser
pub mod tyref;
pub use tyref::{Primitive, TypeRef};

// Class/method/field descriptors
pub mod desc;
pub use desc::{ClassDesc, FieldDesc, MethodDesc, ParamDesc, simple_name};

// The TypeModel capability trait
pub mod model;
pub use model::{TypeModel, script_alias};

// JSON manifest loading
pub mod manifest;
pub use manifest::{ManifestError, ManifestModel};
