// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Out of bounds: 0x{len:X} bytes at 0x{offset:X} exceed image size 0x{image_len:X}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        image_len: usize,
    },
    #[error("Invalid LZ77 magic: expected 0x{expected:02X}, found 0x{found:02X}")]
    InvalidMagic { expected: u8, found: u8 },
    #[error("Unexpected end of data: need {needed} bytes, have {available}")]
    UnexpectedEnd { needed: usize, available: usize },
    #[error("Back-reference 0x{displacement:X} reaches before start of output (0x{written:X} bytes written)")]
    InvalidBackReference { displacement: usize, written: usize },
    #[error("Malformed blob: {0}")]
    MalformedBlob(String),
    #[error("Invalid element size: {0}")]
    InvalidElementSize(usize),
}
