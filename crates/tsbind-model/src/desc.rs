//! Class, method, and field descriptors.
//!
//! These are the immutable facts the projection engine reads. They are
//! produced by a metadata loader (see [`crate::manifest`]) and never mutated
//! by the core.

use crate::tyref::TypeRef;

/// The simple (unqualified) name of a dotted type path. Nested-class
/// separators (`$`) are stripped down to the innermost name.
pub fn simple_name(qualified: &str) -> &str {
    let last = qualified.rsplit('.').next().unwrap_or(qualified);
    last.rsplit('$').next().unwrap_or(last)
}

/// A reflected class: identity, shape, and members.
#[derive(Debug, Clone, Default)]
pub struct ClassDesc {
    /// Fully-qualified dotted name.
    pub name: String,
    /// Whether this class is an enum.
    pub is_enum: bool,
    /// Declared generic type-parameter names, in order.
    pub type_params: Vec<String>,
    /// The extended class, when one is declared.
    pub superclass: Option<TypeRef>,
    pub methods: Vec<MethodDesc>,
    pub fields: Vec<FieldDesc>,
    /// Enum members in declared order. Empty for non-enums.
    pub constants: Vec<String>,
}

impl ClassDesc {
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Generic type-parameter arity.
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }
}

/// A single reflected method overload.
#[derive(Debug, Clone)]
pub struct MethodDesc {
    /// The dispatch name the runtime invokes.
    pub name: String,
    /// Alternative exported name from an override-name annotation.
    pub exported_name: Option<String>,
    pub is_static: bool,
    pub params: Vec<ParamDesc>,
    pub returns: TypeRef,
    /// Generic type-parameter names declared on the method itself.
    pub type_params: Vec<String>,
}

impl MethodDesc {
    /// The name this overload is declared under in generated output.
    pub fn declared_name(&self) -> &str {
        self.exported_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct ParamDesc {
    pub name: String,
    pub ty: TypeRef,
    /// True for the variadic terminal parameter.
    pub vararg: bool,
}

#[derive(Debug, Clone)]
pub struct FieldDesc {
    pub name: String,
    pub ty: TypeRef,
    pub is_static: bool,
}
