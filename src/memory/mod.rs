// Tue Jan 13 2026 - Alex

pub mod blob;
pub mod error;
pub mod image;
pub mod lz77;
pub mod traits;

pub use blob::split_blob;
pub use error::MemoryError;
pub use image::RomImage;
pub use lz77::decompress;
pub use traits::{ByteSource, Endian};
