// Tue Jan 13 2026 - Alex

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Alignment {
    value: usize,
}

impl Alignment {
    pub const BYTE: Alignment = Alignment { value: 1 };

    pub fn new(value: usize) -> Self {
        assert!(value > 0, "alignment must be non-zero");
        Self { value }
    }

    pub fn as_usize(&self) -> usize {
        self.value
    }

    /// Bytes to insert before `offset` so it lands on a multiple of this alignment.
    pub fn padding_for(&self, offset: usize) -> usize {
        padding_needed(offset, self.value)
    }

    pub fn align(&self, offset: usize) -> usize {
        offset + self.padding_for(offset)
    }

    pub fn is_aligned(&self, offset: usize) -> bool {
        offset % self.value == 0
    }

    pub fn max(self, other: Alignment) -> Alignment {
        if other.value > self.value {
            other
        } else {
            self
        }
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::BYTE
    }
}

impl From<usize> for Alignment {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

pub fn padding_needed(offset: usize, size: usize) -> usize {
    (size - offset % size) % size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_needed() {
        assert_eq!(padding_needed(0, 2), 0);
        assert_eq!(padding_needed(1, 2), 1);
        assert_eq!(padding_needed(2, 2), 0);
        assert_eq!(padding_needed(1, 4), 3);
        assert_eq!(padding_needed(9, 4), 3);
        assert_eq!(padding_needed(7, 1), 0);
    }

    #[test]
    fn test_align() {
        let align = Alignment::new(4);
        assert_eq!(align.align(5), 8);
        assert_eq!(align.align(8), 8);
        assert!(align.is_aligned(12));
        assert!(!align.is_aligned(6));
    }

    #[test]
    fn test_max() {
        assert_eq!(Alignment::BYTE.max(Alignment::new(4)).as_usize(), 4);
        assert_eq!(Alignment::new(2).max(Alignment::BYTE).as_usize(), 2);
    }
}
