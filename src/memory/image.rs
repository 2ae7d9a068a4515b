// Tue Jan 13 2026 - Alex

use crate::memory::{ByteSource, MemoryError};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

enum Backing {
    Mapped(Arc<Mmap>),
    Owned(Arc<Vec<u8>>),
}

/// Read-only binary image, memory-mapped from disk or held in memory.
pub struct RomImage {
    backing: Backing,
    path: Option<PathBuf>,
}

impl RomImage {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MemoryError> {
        let file = File::open(path.as_ref())?;
        // SAFETY: the image is opened read-only and never written through this mapping.
        let mmap = unsafe { Mmap::map(&file) }?;
        log::debug!("mapped {} (0x{:X} bytes)", path.as_ref().display(), mmap.len());
        Ok(Self {
            backing: Backing::Mapped(Arc::new(mmap)),
            path: Some(path.as_ref().to_path_buf()),
        })
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            backing: Backing::Owned(Arc::new(data)),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn as_slice(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped(mmap) => mmap.as_ref(),
            Backing::Owned(data) => data.as_slice(),
        }
    }

    /// Borrowing variant of [`ByteSource::read_bytes`].
    pub fn slice(&self, offset: usize, len: Option<usize>) -> Result<&[u8], MemoryError> {
        let data = self.as_slice();
        let image_len = data.len();
        let end = match len {
            Some(len) => offset.checked_add(len),
            None => Some(image_len),
        };
        match end {
            Some(end) if offset <= image_len && end <= image_len => Ok(&data[offset..end]),
            _ => Err(MemoryError::OutOfBounds {
                offset,
                len: len.unwrap_or(0),
                image_len,
            }),
        }
    }
}

impl ByteSource for RomImage {
    fn read_bytes(&self, offset: usize, len: Option<usize>) -> Result<Vec<u8>, MemoryError> {
        let bytes = self.slice(offset, len)?;
        log::debug!("read 0x{:X} bytes at 0x{:X}", bytes.len(), offset);
        Ok(bytes.to_vec())
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Endian;
    use std::io::Write;

    fn image() -> RomImage {
        RomImage::from_bytes((0u8..16).collect())
    }

    #[test]
    fn test_read_bytes() {
        let rom = image();
        assert_eq!(rom.read_bytes(2, Some(3)).unwrap(), vec![2, 3, 4]);
        assert_eq!(rom.read_bytes(14, None).unwrap(), vec![14, 15]);
        assert_eq!(rom.read_bytes(16, None).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_read_out_of_bounds() {
        let rom = image();
        assert!(matches!(
            rom.read_bytes(15, Some(2)),
            Err(MemoryError::OutOfBounds { offset: 15, len: 2, image_len: 16 })
        ));
        assert!(rom.read_bytes(17, None).is_err());
        assert!(rom.read_bytes(1, Some(usize::MAX)).is_err());
    }

    #[test]
    fn test_read_table() {
        let rom = image();
        let table = rom.read_table(4, 7, 2).unwrap();
        assert_eq!(table, vec![vec![4, 5], vec![6, 7], vec![8, 9]]);
        assert!(rom.read_table(0, 4, 0).is_err());
    }

    #[test]
    fn test_read_int_table() {
        let rom = RomImage::from_bytes(vec![0x34, 0x12, 0xFF, 0xFF]);
        assert_eq!(rom.read_int_table(0, 4, 2, Endian::Little, false).unwrap(), vec![0x1234, 0xFFFF]);
        assert_eq!(rom.read_int_table(0, 4, 2, Endian::Little, true).unwrap(), vec![0x1234, -1]);
    }

    #[test]
    fn test_open_mapped_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xAA, 0xBB, 0xCC]).unwrap();
        file.flush().unwrap();

        let rom = RomImage::open(file.path()).unwrap();
        assert_eq!(rom.len(), 3);
        assert_eq!(rom.read_bytes(1, Some(2)).unwrap(), vec![0xBB, 0xCC]);
        assert_eq!(rom.path(), Some(file.path()));
    }
}
