// Thu Jan 15 2026 - Alex

use crate::memory::MemoryError;
use bytes::Buf;

/// Splits a blob prefixed by `count: u32` and `count` little-endian `u32` offsets.
///
/// Chunk `i` runs from its offset to the next one; the last chunk runs to the end
/// of the blob.
pub fn split_blob(blob: &[u8]) -> Result<Vec<&[u8]>, MemoryError> {
    let mut header = blob;
    if header.remaining() < 4 {
        return Err(MemoryError::UnexpectedEnd {
            needed: 4,
            available: blob.len(),
        });
    }
    let count = header.get_u32_le() as usize;

    let table_len = count
        .checked_mul(4)
        .and_then(|n| n.checked_add(4))
        .ok_or_else(|| MemoryError::MalformedBlob(format!("entry count {} overflows", count)))?;
    if table_len > blob.len() {
        return Err(MemoryError::UnexpectedEnd {
            needed: table_len,
            available: blob.len(),
        });
    }

    let offsets: Vec<usize> = (0..count).map(|_| header.get_u32_le() as usize).collect();

    let mut chunks = Vec::with_capacity(count);
    for (i, &start) in offsets.iter().enumerate() {
        let end = offsets.get(i + 1).copied().unwrap_or(blob.len());
        if start > end || end > blob.len() {
            return Err(MemoryError::MalformedBlob(format!(
                "entry {} spans 0x{:X}..0x{:X} in a 0x{:X}-byte blob",
                i,
                start,
                end,
                blob.len()
            )));
        }
        chunks.push(&blob[start..end]);
    }

    Ok(chunks)
}
