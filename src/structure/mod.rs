// Tue Jan 15 2026 - Alex

pub mod alignment;
pub mod annotation;
pub mod array;
pub mod builder;
pub mod cache;
pub mod error;
pub mod field;
pub mod format;
pub mod layout;
pub mod parser;
pub mod render;
pub mod schema;
pub mod serializer;
pub mod type_info;
pub mod value;

pub use alignment::{padding_needed, Alignment};
pub use annotation::{annotate, AnnotationContent, AnnotationData, AnnotationPlacement};
pub use array::synthesize_array;
pub use builder::StructureBuilder;
pub use cache::TypeRegistry;
pub use error::{DeclarationError, FieldIssue, StructureError, TruncatedInputError};
pub use field::{Field, FieldDeclaration};
pub use format::{FormatCode, PackedFormat};
pub use layout::{compile, CompositeType};
pub use parser::{encode, parse};
pub use render::{render, render_with_annotations, RenderOptions};
pub use schema::{FieldDef, SchemaFile, StructDef};
pub use serializer::SerializableLayout;
pub use type_info::{
    BuiltinTypes, FieldType, PrimitiveType, PrimitiveValue, TypeRef, TypeResolver, UnknownPrimitive,
};
pub use value::ValueTree;
