//! JSON manifest loading.
//!
//! A manifest is a flat description of the host application's exposed class
//! surface, produced offline by whatever tool can see the host runtime.
//! Loading one is the only fallible step of a run: a manifest that cannot be
//! read or parsed aborts the whole transform, mirroring a reflection-access
//! failure against a live host.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::desc::{ClassDesc, FieldDesc, MethodDesc, ParamDesc};
use crate::model::TypeModel;
use crate::tyref::TypeRef;

/// Default sentinel root when the manifest does not name one.
pub const DEFAULT_OBJECT_ROOT: &str = "java.lang.Object";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A [`TypeModel`] backed by a parsed JSON manifest.
#[derive(Debug, Default)]
pub struct ManifestModel {
    module: Option<String>,
    object_root: Option<String>,
    exposed: Vec<String>,
    classes: FxHashMap<String, ClassDesc>,
}

impl ManifestModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_str(&text)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = serde_json::from_str(text)?;
        let mut model = Self {
            module: raw.module,
            object_root: raw.object_root,
            exposed: raw.exposed,
            classes: FxHashMap::default(),
        };
        for class in raw.classes {
            model.insert(class.into_desc());
        }
        Ok(model)
    }

    /// Register a descriptor directly. Replaces any previous entry with the
    /// same qualified name.
    pub fn insert(&mut self, desc: ClassDesc) {
        self.classes.insert(desc.name.clone(), desc);
    }

    pub fn set_object_root(&mut self, root: impl Into<String>) {
        self.object_root = Some(root.into());
    }

    /// Module name suggested by the manifest, if any.
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// The initial root-class registration list.
    pub fn exposed(&self) -> &[String] {
        &self.exposed
    }
}

impl TypeModel for ManifestModel {
    fn resolve(&self, qualified: &str) -> Option<&ClassDesc> {
        self.classes.get(qualified)
    }

    fn object_root(&self) -> &str {
        self.object_root.as_deref().unwrap_or(DEFAULT_OBJECT_ROOT)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawManifest {
    module: Option<String>,
    object_root: Option<String>,
    exposed: Vec<String>,
    classes: Vec<RawClass>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawClass {
    name: String,
    #[serde(rename = "enum")]
    is_enum: bool,
    type_params: Vec<String>,
    superclass: Option<String>,
    methods: Vec<RawMethod>,
    fields: Vec<RawField>,
    constants: Vec<String>,
}

impl RawClass {
    fn into_desc(self) -> ClassDesc {
        let class_vars = self.type_params.clone();
        let methods = self
            .methods
            .into_iter()
            .map(|m| m.into_desc(&class_vars))
            .collect();
        let fields = self
            .fields
            .into_iter()
            .map(|f| FieldDesc {
                name: f.name,
                ty: TypeRef::parse_with_vars(&f.ty, &class_vars),
                is_static: f.is_static,
            })
            .collect();
        ClassDesc {
            superclass: self
                .superclass
                .map(|s| TypeRef::parse_with_vars(&s, &class_vars)),
            name: self.name,
            is_enum: self.is_enum,
            type_params: self.type_params,
            methods,
            fields,
            constants: self.constants,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawMethod {
    name: String,
    exported_name: Option<String>,
    #[serde(rename = "static")]
    is_static: bool,
    params: Vec<RawParam>,
    returns: Option<String>,
    type_params: Vec<String>,
}

impl RawMethod {
    fn into_desc(self, class_vars: &[String]) -> MethodDesc {
        let mut vars = class_vars.to_vec();
        vars.extend(self.type_params.iter().cloned());
        let params = self
            .params
            .into_iter()
            .enumerate()
            .map(|(index, p)| ParamDesc {
                name: if p.name.is_empty() {
                    format!("arg{index}")
                } else {
                    p.name
                },
                ty: TypeRef::parse_with_vars(&p.ty, &vars),
                vararg: p.vararg,
            })
            .collect();
        MethodDesc {
            returns: self
                .returns
                .map(|r| TypeRef::parse_with_vars(&r, &vars))
                .unwrap_or(TypeRef::Primitive(crate::tyref::Primitive::Void)),
            name: self.name,
            exported_name: self.exported_name,
            is_static: self.is_static,
            params,
            type_params: self.type_params,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawParam {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    vararg: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(rename = "static")]
    is_static: bool,
}
