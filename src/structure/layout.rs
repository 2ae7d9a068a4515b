// Tue Jan 13 2026 - Alex

use crate::structure::array::synthesize_array;
use crate::structure::{
    Alignment, AnnotationData, DeclarationError, Field, FieldDeclaration, FieldIssue, FieldType,
    PackedFormat, TypeRef, TypeResolver,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Compiled layout of a fixed-size struct. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeType {
    name: String,
    fields: Vec<Field>,
    size: usize,
    alignment: Alignment,
    format: PackedFormat,
    annotations: Vec<AnnotationData>,
    synthetic: bool,
}

impl CompositeType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Total bytes, including internal padding. No trailing padding is added.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn alignment(&self) -> usize {
        self.alignment.as_usize()
    }

    pub fn format(&self) -> &PackedFormat {
        &self.format
    }

    /// One entry per leaf primitive, nested structs flattened, offsets from this struct's start.
    pub fn annotations(&self) -> &[AnnotationData] {
        &self.annotations
    }

    /// Distance between consecutive elements of an array of this type: the size
    /// rounded up to the alignment.
    pub fn stride(&self) -> usize {
        self.alignment.align(self.size)
    }

    pub fn leaf_count(&self) -> usize {
        self.annotations.len()
    }

    /// True for types produced by [`synthesize_array`].
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    fn from_fields(
        name: String,
        fields: Vec<(String, bool, FieldType)>,
        synthetic: bool,
    ) -> Self {
        let mut offset = 0usize;
        let mut alignment = Alignment::BYTE;
        let mut format = PackedFormat::new();
        let mut annotations = Vec::new();
        let mut compiled = Vec::with_capacity(fields.len());

        for (field_name, anonymous, ty) in fields {
            let field_align = Alignment::new(ty.alignment());
            let padding = field_align.padding_for(offset);
            format.push_padding(padding);
            offset += padding;

            match &ty {
                FieldType::Primitive(prim) => {
                    annotations.push(AnnotationData::new(field_name.clone(), prim.size(), offset));
                    format.push_field(*prim);
                }
                FieldType::Composite(nested) => {
                    let prefixed = anonymous || nested.is_synthetic();
                    for entry in nested.annotations() {
                        let entry_name = if prefixed {
                            format!("{}_{}", field_name, entry.name)
                        } else {
                            entry.name.clone()
                        };
                        annotations.push(AnnotationData::new(
                            entry_name,
                            entry.size,
                            offset + entry.offset,
                        ));
                    }
                    format.extend(nested.format());
                }
            }

            let size = ty.size();
            compiled.push(Field::new(field_name, offset, ty, anonymous));
            offset += size;
            alignment = alignment.max(field_align);
        }

        log::debug!(
            "compiled {}: size=0x{:X} align={} format={}",
            name,
            offset,
            alignment.as_usize(),
            format
        );

        Self {
            name,
            fields: compiled,
            size: offset,
            alignment,
            format,
            annotations,
            synthetic,
        }
    }
}

/// Compiles a declaration list into a struct layout. Every invalid field is reported.
pub fn compile(
    name: impl Into<String>,
    declarations: &[FieldDeclaration],
    resolver: &dyn TypeResolver,
) -> Result<Arc<CompositeType>, DeclarationError> {
    compile_declarations(name.into(), declarations, resolver, false)
}

pub(crate) fn compile_declarations(
    name: String,
    declarations: &[FieldDeclaration],
    resolver: &dyn TypeResolver,
    synthetic: bool,
) -> Result<Arc<CompositeType>, DeclarationError> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(declarations.len());

    for decl in declarations {
        if !seen.insert(decl.name()) {
            issues.push(FieldIssue::DuplicateField {
                field: decl.name().to_string(),
            });
            continue;
        }
        if let Some(ty) = resolve(decl.name(), decl.ty(), resolver, &mut issues) {
            fields.push((decl.name().to_string(), decl.is_anonymous(), ty));
        }
    }

    if !issues.is_empty() {
        log::debug!("rejected {}: {} invalid field(s)", name, issues.len());
        return Err(DeclarationError::new(name, issues));
    }

    Ok(Arc::new(CompositeType::from_fields(name, fields, synthetic)))
}

fn resolve(
    field: &str,
    ty: &TypeRef,
    resolver: &dyn TypeResolver,
    issues: &mut Vec<FieldIssue>,
) -> Option<FieldType> {
    match ty {
        TypeRef::Resolved(ty) => Some(ty.clone()),
        TypeRef::Named(type_name) => {
            let resolved = resolver.resolve(type_name);
            if resolved.is_none() {
                issues.push(FieldIssue::UnsupportedType {
                    field: field.to_string(),
                    type_name: type_name.clone(),
                });
            }
            resolved
        }
        TypeRef::Array(element, count) => {
            let element = resolve(field, element, resolver, issues);
            if *count <= 0 {
                issues.push(FieldIssue::InvalidCount {
                    field: field.to_string(),
                    count: *count,
                });
                return None;
            }
            match synthesize_array(element?, *count as usize) {
                Ok(array) => Some(FieldType::Composite(array)),
                Err(err) => {
                    issues.extend(err.issues);
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{BuiltinTypes, PrimitiveType, StructureBuilder};

    fn padded() -> Arc<CompositeType> {
        StructureBuilder::new("A")
            .field("_0", PrimitiveType::U8)
            .field("_4", PrimitiveType::U32)
            .field("_8", PrimitiveType::U8)
            .field("_A", PrimitiveType::U16)
            .build()
            .unwrap()
    }

    #[test]
    fn test_padded_layout() {
        let layout = padded();
        assert_eq!(layout.size(), 0xC);
        assert_eq!(layout.alignment(), 4);
        assert_eq!(layout.format().to_string(), "<BxxxIBxH");

        let offsets: Vec<usize> = layout.annotations().iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0x0, 0x4, 0x8, 0xA]);
    }

    #[test]
    fn test_size_accounts_for_leaves_and_padding() {
        let layout = padded();
        let leaves: usize = layout.annotations().iter().map(|a| a.size).sum();
        assert_eq!(leaves + layout.format().padding(), layout.size());
    }

    #[test]
    fn test_no_trailing_padding() {
        let layout = StructureBuilder::new("T")
            .field("a", PrimitiveType::U32)
            .field("b", PrimitiveType::U8)
            .build()
            .unwrap();
        assert_eq!(layout.size(), 5);
        assert_eq!(layout.alignment(), 4);
    }

    #[test]
    fn test_nested_flattening() {
        let inner = StructureBuilder::new("Inner")
            .field("x", PrimitiveType::U16)
            .field("y", PrimitiveType::U32)
            .build()
            .unwrap();
        let outer = StructureBuilder::new("Outer")
            .field("tag", PrimitiveType::U8)
            .field("inner", inner.clone())
            .field("tail", PrimitiveType::U8)
            .build()
            .unwrap();

        assert_eq!(outer.alignment(), 4);
        assert_eq!(outer.get_field("inner").unwrap().offset(), 4);
        assert_eq!(outer.size(), 4 + inner.size() + 1);
        assert_eq!(outer.format().to_string(), "<BxxxHxxIB");

        let names: Vec<&str> = outer.annotations().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["tag", "x", "y", "tail"]);

        for (nested, flat) in inner.annotations().iter().zip(&outer.annotations()[1..3]) {
            assert_eq!(flat.offset, nested.offset + 4);
            assert_eq!(flat.size, nested.size);
        }
    }

    #[test]
    fn test_array_field_naming() {
        let point = StructureBuilder::new("Point")
            .field("x", PrimitiveType::U8)
            .field("y", PrimitiveType::U8)
            .build()
            .unwrap();
        let layout = StructureBuilder::new("Shape")
            .array("pts", point, 2)
            .array("ids", PrimitiveType::U16, 2)
            .build()
            .unwrap();

        let names: Vec<&str> = layout.annotations().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["pts_0_x", "pts_0_y", "pts_1_x", "pts_1_y", "ids_0", "ids_1"]);
        assert_eq!(layout.size(), 8);
        assert_eq!(layout.format().to_string(), "<BBBBHH");
    }

    #[test]
    fn test_every_invalid_field_reported() {
        let err = StructureBuilder::new("Bad")
            .field("a", PrimitiveType::U8)
            .field("b", "int")
            .field("c", "float")
            .array("d", PrimitiveType::U8, 0)
            .field("a", PrimitiveType::U16)
            .build()
            .unwrap_err();

        assert_eq!(err.type_name, "Bad");
        assert_eq!(err.issues.len(), 4);
        assert!(err.mentions("b"));
        assert!(err.mentions("c"));
        assert!(err.mentions("d"));
        assert!(err.issues.contains(&FieldIssue::DuplicateField { field: "a".to_string() }));
    }

    #[test]
    fn test_compile_is_idempotent() {
        let decls = vec![
            FieldDeclaration::new("a", PrimitiveType::U8),
            FieldDeclaration::new("b", "u16"),
        ];
        let first = compile("B", &decls, &BuiltinTypes).unwrap();
        let second = compile("B", &decls, &BuiltinTypes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stride_matches_array_spacing() {
        let rec = StructureBuilder::new("Rec")
            .field("word", PrimitiveType::U32)
            .field("flag", PrimitiveType::U8)
            .build()
            .unwrap();
        assert_eq!(rec.size(), 5);
        assert_eq!(rec.stride(), 8);

        let array = synthesize_array(rec.clone(), 3).unwrap();
        for (i, field) in array.fields().iter().enumerate() {
            assert_eq!(field.offset(), i * rec.stride());
        }
        assert_eq!(padded().stride(), padded().size());
    }

    #[test]
    fn test_empty_struct() {
        let layout = compile("Empty", &[], &BuiltinTypes).unwrap();
        assert_eq!(layout.size(), 0);
        assert_eq!(layout.alignment(), 1);
        assert_eq!(layout.format().to_string(), "<");
    }
}
