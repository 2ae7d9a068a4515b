// Thu Jan 15 2026 - Alex

use crate::memory::MemoryError;

pub const LZ77_MAGIC: u8 = 0x10;

const HEADER_LEN: usize = 4;
const MIN_MATCH: usize = 3;

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], MemoryError> {
        let end = self.pos + n;
        if end > self.data.len() {
            return Err(MemoryError::UnexpectedEnd {
                needed: end,
                available: self.data.len(),
            });
        }
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn byte(&mut self) -> Result<u8, MemoryError> {
        Ok(self.take(1)?[0])
    }
}

/// Decompressed length announced by an LZ77 header, after checking its magic byte.
pub fn decompressed_len(data: &[u8]) -> Result<usize, MemoryError> {
    let header = data.get(..HEADER_LEN).ok_or(MemoryError::UnexpectedEnd {
        needed: HEADER_LEN,
        available: data.len(),
    })?;
    let word = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let magic = (word & 0xFF) as u8;
    if magic != LZ77_MAGIC {
        return Err(MemoryError::InvalidMagic {
            expected: LZ77_MAGIC,
            found: magic,
        });
    }
    Ok((word >> 8) as usize)
}

/// Decodes a GBA BIOS-style LZ77 stream.
///
/// Each flag byte governs the next eight tokens, most significant bit first. A clear
/// bit is one literal byte; a set bit is a two-byte back-reference whose high nibble
/// is the copy length minus three and whose remaining twelve bits are the distance
/// minus one.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, MemoryError> {
    let expected = decompressed_len(data)?;
    let mut reader = Reader {
        data,
        pos: HEADER_LEN,
    };
    let mut out = Vec::with_capacity(expected);

    while out.len() < expected {
        let flags = reader.byte()?;
        log::trace!("lz77 block flags={:08b} at 0x{:X}", flags, reader.pos - 1);

        for bit in 0..8 {
            if out.len() >= expected {
                break;
            }

            if flags & (0x80 >> bit) == 0 {
                out.push(reader.byte()?);
                continue;
            }

            let pair = reader.take(2)?;
            let displacement = (((pair[0] & 0x0F) as usize) << 8) | pair[1] as usize;
            let length = (pair[0] >> 4) as usize + MIN_MATCH;

            if displacement + 1 > out.len() {
                return Err(MemoryError::InvalidBackReference {
                    displacement,
                    written: out.len(),
                });
            }

            for _ in 0..length {
                let byte = out[out.len() - displacement - 1];
                out.push(byte);
            }
        }
    }

    out.truncate(expected);
    Ok(out)
}
