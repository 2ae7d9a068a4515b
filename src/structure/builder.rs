// Tue Jan 13 2026 - Alex

use crate::structure::layout::compile;
use crate::structure::{
    BuiltinTypes, CompositeType, DeclarationError, FieldDeclaration, TypeRef, TypeResolver,
};
use std::sync::Arc;

pub struct StructureBuilder {
    name: String,
    fields: Vec<FieldDeclaration>,
}

impl StructureBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.fields.push(FieldDeclaration::new(name, ty));
        self
    }

    pub fn array(mut self, name: impl Into<String>, element: impl Into<TypeRef>, count: i64) -> Self {
        self.fields
            .push(FieldDeclaration::new(name, TypeRef::array(element, count)));
        self
    }

    pub fn declarations(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compiles against the built-in primitives only.
    pub fn build(self) -> Result<Arc<CompositeType>, DeclarationError> {
        self.build_with(&BuiltinTypes)
    }

    pub fn build_with(self, resolver: &dyn TypeResolver) -> Result<Arc<CompositeType>, DeclarationError> {
        compile(self.name, &self.fields, resolver)
    }
}
