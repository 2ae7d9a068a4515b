// Tue Jan 13 2026 - Alex

use crate::structure::CompositeType;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Fixed-width little-endian integer types a field can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 6] = [
        Self::U8,
        Self::I8,
        Self::U16,
        Self::I16,
        Self::U32,
        Self::I32,
    ];

    pub fn size(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 => 4,
        }
    }

    /// Natural alignment, always equal to the size.
    pub fn alignment(self) -> usize {
        self.size()
    }

    /// Packed-format code for this type.
    pub fn format_char(self) -> char {
        match self {
            Self::U8 => 'B',
            Self::I8 => 'b',
            Self::U16 => 'H',
            Self::I16 => 'h',
            Self::U32 => 'I',
            Self::I32 => 'i',
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32)
    }

    pub fn min_value(self) -> i64 {
        match self {
            Self::U8 | Self::U16 | Self::U32 => 0,
            Self::I8 => i8::MIN as i64,
            Self::I16 => i16::MIN as i64,
            Self::I32 => i32::MIN as i64,
        }
    }

    pub fn max_value(self) -> i64 {
        match self {
            Self::U8 => u8::MAX as i64,
            Self::I8 => i8::MAX as i64,
            Self::U16 => u16::MAX as i64,
            Self::I16 => i16::MAX as i64,
            Self::U32 => u32::MAX as i64,
            Self::I32 => i32::MAX as i64,
        }
    }

    pub fn contains(self, value: i64) -> bool {
        value >= self.min_value() && value <= self.max_value()
    }

    /// Mask covering every bit of this type's width.
    pub fn bit_mask(self) -> u64 {
        (1u64 << (self.size() * 8)) - 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::U16 => "u16",
            Self::I16 => "i16",
            Self::U32 => "u32",
            Self::I32 => "i32",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPrimitive(pub String);

impl fmt::Display for UnknownPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown primitive type `{}`", self.0)
    }
}

impl std::error::Error for UnknownPrimitive {}

impl FromStr for PrimitiveType {
    type Err = UnknownPrimitive;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "u8" | "uint8" | "uint8_t" => Ok(Self::U8),
            "i8" | "int8" | "int8_t" => Ok(Self::I8),
            "u16" | "uint16" | "uint16_t" => Ok(Self::U16),
            "i16" | "int16" | "int16_t" => Ok(Self::I16),
            "u32" | "uint32" | "uint32_t" => Ok(Self::U32),
            "i32" | "int32" | "int32_t" => Ok(Self::I32),
            _ => Err(UnknownPrimitive(s.to_string())),
        }
    }
}

/// A resolved field type: either a primitive or an already compiled composite.
#[derive(Debug, Clone)]
pub enum FieldType {
    Primitive(PrimitiveType),
    Composite(Arc<CompositeType>),
}

impl FieldType {
    pub fn size(&self) -> usize {
        match self {
            Self::Primitive(ty) => ty.size(),
            Self::Composite(ty) => ty.size(),
        }
    }

    pub fn alignment(&self) -> usize {
        match self {
            Self::Primitive(ty) => ty.alignment(),
            Self::Composite(ty) => ty.alignment(),
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(ty) => ty.name(),
            Self::Composite(ty) => ty.name(),
        }
    }
}

impl PartialEq for FieldType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primitive(a), Self::Primitive(b)) => a == b,
            (Self::Composite(a), Self::Composite(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl Eq for FieldType {}

impl From<PrimitiveType> for FieldType {
    fn from(ty: PrimitiveType) -> Self {
        Self::Primitive(ty)
    }
}

impl From<Arc<CompositeType>> for FieldType {
    fn from(ty: Arc<CompositeType>) -> Self {
        Self::Composite(ty)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field type as written in a declaration, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Resolved(FieldType),
    Named(String),
    Array(Box<TypeRef>, i64),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn array(element: impl Into<TypeRef>, count: i64) -> Self {
        Self::Array(Box::new(element.into()), count)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(ty) => write!(f, "{}", ty),
            Self::Named(name) => f.write_str(name),
            Self::Array(elem, count) => write!(f, "{}[{}]", elem, count),
        }
    }
}

impl From<PrimitiveType> for TypeRef {
    fn from(ty: PrimitiveType) -> Self {
        Self::Resolved(FieldType::Primitive(ty))
    }
}

impl From<FieldType> for TypeRef {
    fn from(ty: FieldType) -> Self {
        Self::Resolved(ty)
    }
}

impl From<Arc<CompositeType>> for TypeRef {
    fn from(ty: Arc<CompositeType>) -> Self {
        Self::Resolved(FieldType::Composite(ty))
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// Looks up type names used in declarations.
pub trait TypeResolver {
    fn resolve(&self, name: &str) -> Option<FieldType>;
}

/// Resolves only the built-in primitive names.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTypes;

impl TypeResolver for BuiltinTypes {
    fn resolve(&self, name: &str) -> Option<FieldType> {
        name.parse::<PrimitiveType>().ok().map(FieldType::Primitive)
    }
}

/// A primitive paired with a value inside its representable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveValue {
    ty: PrimitiveType,
    value: i64,
}

impl PrimitiveValue {
    pub fn new(ty: PrimitiveType, value: i64) -> Option<Self> {
        ty.contains(value).then_some(Self { ty, value })
    }

    /// For values decoded at the type's own width, which are in range by construction.
    pub(crate) fn from_raw(ty: PrimitiveType, value: i64) -> Self {
        debug_assert!(ty.contains(value));
        Self { ty, value }
    }

    pub fn ty(&self) -> PrimitiveType {
        self.ty
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Raw bit pattern at the primitive's width (two's complement for signed types).
    pub fn bits(&self) -> u64 {
        (self.value as u64) & self.ty.bit_mask()
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:0width$X}", self.bits(), width = self.ty.size() * 2)
    }
}
