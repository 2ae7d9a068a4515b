// Tue Jan 13 2026 - Alex

use crate::structure::annotation::annotate;
use crate::structure::layout::compile;
use crate::structure::render::render_with_annotations;
use crate::structure::{
    AnnotationContent, AnnotationPlacement, BuiltinTypes, CompositeType, DeclarationError,
    FieldDeclaration, FieldType, RenderOptions, StructureError, TypeResolver, ValueTree,
};
use ahash::AHashMap;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

type AnnotationKey = (String, AnnotationContent, AnnotationPlacement, usize);

/// Compiled struct types by name, plus memoised annotation prefixes.
///
/// Types are immutable once stored, so readers share them freely. Redefining a
/// name stores a new type and drops the cached annotations of the old one.
pub struct TypeRegistry {
    types: RwLock<IndexMap<String, Arc<CompositeType>>>,
    annotations: RwLock<AHashMap<AnnotationKey, Arc<[String]>>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            types: RwLock::new(IndexMap::new()),
            annotations: RwLock::new(AHashMap::new()),
        }
    }

    /// Compiles `declarations` against the primitives and every type defined so far.
    pub fn define(
        &self,
        name: &str,
        declarations: &[FieldDeclaration],
    ) -> Result<Arc<CompositeType>, DeclarationError> {
        let compiled = compile(name, declarations, self)?;
        self.insert(compiled.clone());
        Ok(compiled)
    }

    pub fn insert(&self, ty: Arc<CompositeType>) {
        let name = ty.name().to_string();
        let previous = self.types.write().insert(name.clone(), ty);
        if previous.is_some() {
            log::warn!("redefined struct {}", name);
            // only after the new type is visible, so any memo written from here on is fresh
            self.annotations.write().retain(|key, _| key.0 != name);
        } else {
            log::info!("registered struct {}", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<CompositeType>> {
        self.types.read().get(name).cloned()
    }

    pub fn require(&self, name: &str) -> Result<Arc<CompositeType>, StructureError> {
        self.get(name)
            .ok_or_else(|| StructureError::TypeNotFound(name.to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        self.types.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    pub fn clear(&self) {
        self.types.write().clear();
        self.annotations.write().clear();
    }

    /// Annotation prefixes for a registered type, computed once per option set.
    pub fn annotations(
        &self,
        name: &str,
        content: AnnotationContent,
        placement: AnnotationPlacement,
        level: usize,
    ) -> Result<Arc<[String]>, StructureError> {
        let key = (name.to_string(), content, placement, level);
        if let Some(cached) = self.annotations.read().get(&key) {
            return Ok(cached.clone());
        }

        // the type is read under the memo's write lock so a concurrent redefinition
        // cannot slip in between lookup and insert
        let mut memo = self.annotations.write();
        if let Some(cached) = memo.get(&key) {
            return Ok(cached.clone());
        }
        let ty = self.require(name)?;
        let notes: Arc<[String]> = annotate(&ty, content, placement, level).into();
        memo.insert(key, notes.clone());
        Ok(notes)
    }

    pub fn cached_annotation_sets(&self) -> usize {
        self.annotations.read().len()
    }

    pub fn render(&self, name: &str, tree: &ValueTree, options: &RenderOptions) -> Result<String, StructureError> {
        let notes = self.annotations(name, options.content, options.placement, options.indent)?;
        render_with_annotations(tree, &notes, options)
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, name: &str) -> Option<FieldType> {
        self.get(name)
            .map(FieldType::Composite)
            .or_else(|| BuiltinTypes.resolve(name))
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.names())
            .field("cached_annotation_sets", &self.cached_annotation_sets())
            .finish()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
