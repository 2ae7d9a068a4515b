// Wed Jan 15 2026 - Alex

use crate::memory::MemoryError;
use bytes::Buf;

/// Random-access source of raw bytes, such as a ROM image.
pub trait ByteSource: Send + Sync {
    /// Exactly `len` bytes from `offset`, or everything from `offset` when `len` is `None`.
    fn read_bytes(&self, offset: usize, len: Option<usize>) -> Result<Vec<u8>, MemoryError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Splits `total_len` bytes at `offset` into `element_size` chunks; a short tail is dropped.
    fn read_table(
        &self,
        offset: usize,
        total_len: usize,
        element_size: usize,
    ) -> Result<Vec<Vec<u8>>, MemoryError> {
        if element_size == 0 {
            return Err(MemoryError::InvalidElementSize(element_size));
        }
        let data = self.read_bytes(offset, Some(total_len))?;
        Ok(data
            .chunks_exact(element_size)
            .map(<[u8]>::to_vec)
            .collect())
    }

    /// Reads a table of integers of `element_size` bytes each (1 to 8).
    fn read_int_table(
        &self,
        offset: usize,
        total_len: usize,
        element_size: usize,
        endian: Endian,
        signed: bool,
    ) -> Result<Vec<i64>, MemoryError> {
        if element_size == 0 || element_size > 8 {
            return Err(MemoryError::InvalidElementSize(element_size));
        }
        let table = self.read_table(offset, total_len, element_size)?;
        Ok(table
            .iter()
            .map(|chunk| decode_int(chunk, endian, signed))
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

fn decode_int(mut chunk: &[u8], endian: Endian, signed: bool) -> i64 {
    let width = chunk.len();
    match (endian, signed) {
        (Endian::Little, false) => chunk.get_uint_le(width) as i64,
        (Endian::Little, true) => chunk.get_int_le(width),
        (Endian::Big, false) => chunk.get_uint(width) as i64,
        (Endian::Big, true) => chunk.get_int(width),
    }
}
