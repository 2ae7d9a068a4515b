// Tue Jan 13 2026 - Alex

use crate::structure::{Alignment, FieldType, TypeRef};
use std::fmt;

/// A field as written by the user, before its type is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    name: String,
    ty: TypeRef,
    anonymous: bool,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            anonymous: false,
        }
    }

    /// Array elements carry no display name of their own; their position names them.
    pub fn anonymous(index: usize, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: index.to_string(),
            ty: ty.into(),
            anonymous: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }
}

/// A compiled field: resolved type plus its byte offset inside the owning struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    offset: usize,
    ty: FieldType,
    anonymous: bool,
}

impl Field {
    pub fn new(name: String, offset: usize, ty: FieldType, anonymous: bool) -> Self {
        Self {
            name,
            offset,
            ty,
            anonymous,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn ty(&self) -> &FieldType {
        &self.ty
    }

    pub fn size(&self) -> usize {
        self.ty.size()
    }

    pub fn alignment(&self) -> Alignment {
        Alignment::new(self.ty.alignment())
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ 0x{:X}: {}", self.name, self.offset, self.ty)
    }
}
