// Thu Jan 15 2026 - Alex

use crate::structure::{FieldDeclaration, StructureError, TypeRef, TypeRegistry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JSON document declaring structs in dependency order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaFile {
    pub structs: Vec<StructDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

impl FieldDef {
    pub fn declaration(&self) -> FieldDeclaration {
        let ty = match self.count {
            Some(count) => TypeRef::array(TypeRef::named(self.ty.clone()), count),
            None => TypeRef::named(self.ty.clone()),
        };
        FieldDeclaration::new(self.name.clone(), ty)
    }
}

impl StructDef {
    pub fn declarations(&self) -> Vec<FieldDeclaration> {
        self.fields.iter().map(FieldDef::declaration).collect()
    }
}

impl SchemaFile {
    pub fn from_json(text: &str) -> Result<Self, StructureError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StructureError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Defines every struct in document order, stopping at the first invalid one.
    pub fn register(&self, registry: &TypeRegistry) -> Result<usize, StructureError> {
        for def in &self.structs {
            registry.define(&def.name, &def.declarations())?;
        }
        Ok(self.structs.len())
    }

    pub fn into_registry(self) -> Result<TypeRegistry, StructureError> {
        let registry = TypeRegistry::new();
        self.register(&registry)?;
        Ok(registry)
    }
}
