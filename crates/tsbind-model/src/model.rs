//! The `TypeModel` capability trait.
//!
//! The projection engine never touches the host runtime directly; everything
//! it needs from reflection is behind this trait so metadata can come from a
//! parsed manifest, a live introspection adapter, or a test fixture.

use crate::desc::ClassDesc;

/// Read-only access to the reflected class surface.
pub trait TypeModel {
    /// Look up a class by fully-qualified dotted name.
    fn resolve(&self, qualified: &str) -> Option<&ClassDesc>;

    /// The "untyped object" root type. It and its array forms are the
    /// sentinel family that collapses unions to the wildcard.
    fn object_root(&self) -> &str;

    fn is_enum(&self, qualified: &str) -> bool {
        self.resolve(qualified).map(|c| c.is_enum).unwrap_or(false)
    }

    /// Generic type-parameter arity, 0 when unknown.
    fn arity(&self, qualified: &str) -> usize {
        self.resolve(qualified).map(|c| c.arity()).unwrap_or(0)
    }

    /// A scripting-layer spelling for well-known host types, if any.
    fn script_alias(&self, qualified: &str) -> Option<&str> {
        script_alias(qualified)
    }
}

/// Built-in projections for host standard-library types that have a native
/// scripting-layer equivalent.
pub fn script_alias(qualified: &str) -> Option<&'static str> {
    Some(match qualified {
        "java.lang.String" | "java.lang.CharSequence" | "java.lang.Character" => "string",
        "java.lang.Boolean" => "boolean",
        "java.lang.Byte"
        | "java.lang.Short"
        | "java.lang.Integer"
        | "java.lang.Long"
        | "java.lang.Float"
        | "java.lang.Double"
        | "java.lang.Number" => "number",
        "java.lang.Void" => "void",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_cover_boxed_numerics() {
        assert_eq!(script_alias("java.lang.Integer"), Some("number"));
        assert_eq!(script_alias("java.lang.String"), Some("string"));
        assert_eq!(script_alias("zombie.iso.IsoObject"), None);
    }
}
