//! Type-reference expressions.
//!
//! Reflected type names arrive as strings (`"java.util.List<java.lang.String>[]"`).
//! Instead of substituting on those strings, everything downstream works on a
//! small expression tree with one renderer per output syntax:
//!
//! - [`TypeRef::render_decl`] — TypeScript declaration syntax
//! - [`TypeRef::render_doc`] — simple names for shim doc blocks

use crate::desc::simple_name;

/// Primitive value types of the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Void,
}

impl Primitive {
    /// Parse a reflected primitive name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "char" => Self::Char,
            "void" => Self::Void,
            _ => return None,
        })
    }

    /// The reflected source name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
            Self::Void => "void",
        }
    }

    /// The scripting-layer type this primitive projects to.
    pub fn script_name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Char => "string",
            Self::Void => "void",
            _ => "number",
        }
    }
}

/// A reference to a type, as it appears in a method or field signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A primitive value type.
    Primitive(Primitive),
    /// A class or interface by fully-qualified dotted path.
    Named(String),
    /// A generic type variable in scope (`T`).
    Variable(String),
    /// A parameterized type.
    Generic { base: Box<TypeRef>, args: Vec<TypeRef> },
    /// An array type. `dims` is always >= 1.
    Array { elem: Box<TypeRef>, dims: usize },
    /// A synthesized union of alternatives.
    Union(Vec<TypeRef>),
    /// The untyped wildcard (`any`).
    Wildcard,
    /// A null-widened type (`T | null`).
    Optional(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(path: impl Into<String>) -> Self {
        Self::Named(path.into())
    }

    /// Parse a reflected type string with no generic variables in scope.
    pub fn parse(text: &str) -> Self {
        Self::parse_with_vars(text, &[])
    }

    /// Parse a reflected type string. Single-segment names listed in `vars`
    /// become [`TypeRef::Variable`] instead of [`TypeRef::Named`].
    pub fn parse_with_vars(text: &str, vars: &[String]) -> Self {
        let mut parser = Parser {
            text: text.trim(),
            pos: 0,
            vars,
        };
        parser.parse_type()
    }

    /// True for primitive value types; drives nullability widening.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// The fully-qualified display name, used as the total-order key when
    /// sorting overloads. Faithful to the reflected spelling.
    pub fn qualified_name(&self) -> String {
        match self {
            Self::Primitive(p) => p.name().to_string(),
            Self::Named(path) => path.clone(),
            Self::Variable(name) => name.clone(),
            Self::Generic { base, args } => {
                let args: Vec<String> = args.iter().map(|a| a.qualified_name()).collect();
                format!("{}<{}>", base.qualified_name(), args.join(", "))
            }
            Self::Array { elem, dims } => {
                format!("{}{}", elem.qualified_name(), "[]".repeat(*dims))
            }
            Self::Union(members) => {
                let members: Vec<String> = members.iter().map(|m| m.qualified_name()).collect();
                members.join(" | ")
            }
            Self::Wildcard => "?".to_string(),
            Self::Optional(inner) => format!("{} | null", inner.qualified_name()),
        }
    }

    /// Render in TypeScript declaration syntax.
    pub fn render_decl(&self) -> String {
        match self {
            Self::Primitive(p) => p.script_name().to_string(),
            Self::Named(path) => path.clone(),
            Self::Variable(name) => name.clone(),
            Self::Generic { base, args } => {
                let args: Vec<String> = args.iter().map(|a| a.render_decl()).collect();
                format!("{}<{}>", base.render_decl(), args.join(", "))
            }
            Self::Array { elem, dims } => {
                format!("{}{}", elem.render_decl(), "[]".repeat(*dims))
            }
            Self::Union(members) => {
                let members: Vec<String> = members.iter().map(|m| m.render_decl()).collect();
                members.join(" | ")
            }
            Self::Wildcard => "any".to_string(),
            Self::Optional(inner) => format!("{} | null", inner.render_decl()),
        }
    }

    /// Render with simple names only, for shim doc blocks.
    pub fn render_doc(&self) -> String {
        match self {
            Self::Primitive(p) => p.name().to_string(),
            Self::Named(path) => simple_name(path).to_string(),
            Self::Variable(name) => name.clone(),
            Self::Generic { base, .. } => base.render_doc(),
            Self::Array { elem, dims } => {
                format!("{}{}", elem.render_doc(), "[]".repeat(*dims))
            }
            Self::Union(members) => {
                let members: Vec<String> = members.iter().map(|m| m.render_doc()).collect();
                members.join(" | ")
            }
            Self::Wildcard => "any".to_string(),
            Self::Optional(inner) => format!("{} | null", inner.render_doc()),
        }
    }
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
    vars: &'a [String],
}

impl Parser<'_> {
    fn parse_type(&mut self) -> TypeRef {
        self.skip_ws();

        // Bounded wildcards lose their bound: `? extends Foo` projects to any.
        if self.peek() == Some('?') {
            self.pos += 1;
            self.skip_ws();
            if self.eat_word("extends") || self.eat_word("super") {
                let _ = self.parse_type();
            }
            return self.finish_suffix(TypeRef::Wildcard);
        }

        let path = self.take_path();
        let mut base = if let Some(p) = Primitive::from_name(&path) {
            TypeRef::Primitive(p)
        } else if !path.contains('.') && self.vars.iter().any(|v| v == &path) {
            TypeRef::Variable(path)
        } else {
            TypeRef::Named(path)
        };

        self.skip_ws();
        if self.peek() == Some('<') {
            self.pos += 1;
            let mut args = Vec::new();
            loop {
                args.push(self.parse_type());
                self.skip_ws();
                match self.peek() {
                    Some(',') => {
                        self.pos += 1;
                    }
                    Some('>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => break,
                }
            }
            base = TypeRef::Generic {
                base: Box::new(base),
                args,
            };
        }

        self.finish_suffix(base)
    }

    fn finish_suffix(&mut self, base: TypeRef) -> TypeRef {
        let mut dims = 0;
        loop {
            self.skip_ws();
            if self.text[self.pos..].starts_with("[]") {
                self.pos += 2;
                dims += 1;
            } else {
                break;
            }
        }
        if dims == 0 {
            base
        } else {
            TypeRef::Array {
                elem: Box::new(base),
                dims,
            }
        }
    }

    fn take_path(&mut self) -> String {
        let start = self.pos;
        for (offset, c) in self.text[self.pos..].char_indices() {
            if matches!(c, '<' | '>' | ',' | '[' | ' ') {
                self.pos = start + offset;
                return self.text[start..self.pos].to_string();
            }
        }
        self.pos = self.text.len();
        self.text[start..].to_string()
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if self.text[self.pos..].starts_with(word) {
            self.pos += word.len();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while self.peek() == Some(' ') {
            self.pos += 1;
        }
    }
}
