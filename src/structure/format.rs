// Wed Jan 14 2026 - Alex

use crate::structure::{PrimitiveType, PrimitiveValue};
use bytes::{Buf, BufMut};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCode {
    Field(PrimitiveType),
    Pad(usize),
}

impl FormatCode {
    pub fn size(&self) -> usize {
        match self {
            Self::Field(ty) => ty.size(),
            Self::Pad(n) => *n,
        }
    }
}

/// Byte-level description of a compiled struct: primitive codes and padding runs in
/// declaration order. Only the outermost struct carries the byte-order marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedFormat {
    codes: Vec<FormatCode>,
}

impl PackedFormat {
    pub const BYTE_ORDER_MARKER: char = '<';

    pub fn new() -> Self {
        Self::default()
    }

    pub fn codes(&self) -> &[FormatCode] {
        &self.codes
    }

    pub fn push_field(&mut self, ty: PrimitiveType) {
        self.codes.push(FormatCode::Field(ty));
    }

    pub fn push_padding(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        if let Some(FormatCode::Pad(run)) = self.codes.last_mut() {
            *run += count;
        } else {
            self.codes.push(FormatCode::Pad(count));
        }
    }

    /// Splices a nested struct's codes in place; its byte-order marker is implicit.
    pub fn extend(&mut self, nested: &PackedFormat) {
        for code in &nested.codes {
            match *code {
                FormatCode::Field(ty) => self.push_field(ty),
                FormatCode::Pad(n) => self.push_padding(n),
            }
        }
    }

    pub fn size(&self) -> usize {
        self.codes.iter().map(FormatCode::size).sum()
    }

    pub fn padding(&self) -> usize {
        self.codes
            .iter()
            .map(|code| match code {
                FormatCode::Pad(n) => *n,
                FormatCode::Field(_) => 0,
            })
            .sum()
    }

    pub fn field_count(&self) -> usize {
        self.codes
            .iter()
            .filter(|code| matches!(code, FormatCode::Field(_)))
            .count()
    }

    /// Codes without the marker, e.g. `BxxxIBxH`.
    pub fn body(&self) -> String {
        let mut out = String::new();
        for code in &self.codes {
            match code {
                FormatCode::Field(ty) => out.push(ty.format_char()),
                FormatCode::Pad(n) => out.extend(std::iter::repeat('x').take(*n)),
            }
        }
        out
    }

    /// Reads one value per field code, skipping padding. The caller checks the length.
    pub fn unpack(&self, mut data: &[u8]) -> Vec<PrimitiveValue> {
        let mut values = Vec::with_capacity(self.field_count());
        for code in &self.codes {
            match *code {
                FormatCode::Pad(n) => data.advance(n),
                FormatCode::Field(ty) => {
                    let raw = match ty {
                        PrimitiveType::U8 => data.get_u8() as i64,
                        PrimitiveType::I8 => data.get_i8() as i64,
                        PrimitiveType::U16 => data.get_u16_le() as i64,
                        PrimitiveType::I16 => data.get_i16_le() as i64,
                        PrimitiveType::U32 => data.get_u32_le() as i64,
                        PrimitiveType::I32 => data.get_i32_le() as i64,
                    };
                    values.push(PrimitiveValue::from_raw(ty, raw));
                }
            }
        }
        values
    }

    /// Writes `values` in code order, zero-filling padding.
    pub fn pack<'a, I>(&self, values: I) -> Result<Vec<u8>, String>
    where
        I: IntoIterator<Item = &'a PrimitiveValue>,
    {
        let mut out = Vec::with_capacity(self.size());
        let mut values = values.into_iter();
        for (index, code) in self.codes.iter().enumerate() {
            match *code {
                FormatCode::Pad(n) => out.put_bytes(0, n),
                FormatCode::Field(ty) => {
                    let value = values
                        .next()
                        .ok_or_else(|| format!("missing value for code #{}", index))?;
                    if value.ty() != ty {
                        return Err(format!(
                            "code #{} expects {}, got {}",
                            index,
                            ty,
                            value.ty()
                        ));
                    }
                    match ty {
                        PrimitiveType::U8 => out.put_u8(value.value() as u8),
                        PrimitiveType::I8 => out.put_i8(value.value() as i8),
                        PrimitiveType::U16 => out.put_u16_le(value.value() as u16),
                        PrimitiveType::I16 => out.put_i16_le(value.value() as i16),
                        PrimitiveType::U32 => out.put_u32_le(value.value() as u32),
                        PrimitiveType::I32 => out.put_i32_le(value.value() as i32),
                    }
                }
            }
        }
        if values.next().is_some() {
            return Err("more values than field codes".to_string());
        }
        Ok(out)
    }
}

impl fmt::Display for PackedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::BYTE_ORDER_MARKER, self.body())
    }
}
