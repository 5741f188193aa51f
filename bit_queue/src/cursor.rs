//! Bit positions over MSB-first byte storage.

/// An absolute bit position; bit 0 is the most significant bit of byte 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BitIndex(pub usize);

impl BitIndex {
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    #[inline]
    pub fn byte(self) -> usize {
        self.0 / 8
    }

    /// Position inside the byte, 0 being the MSB.
    #[inline]
    pub fn offset(self) -> u8 {
        (self.0 % 8) as u8
    }

    #[inline]
    pub fn mask(self) -> u8 {
        0x80 >> self.offset()
    }

    #[inline]
    pub fn is_byte_aligned(self) -> bool {
        self.offset() == 0
    }
}

impl From<usize> for BitIndex {
    #[inline]
    fn from(bit: usize) -> Self {
        BitIndex(bit)
    }
}

/// A scan position that walks forward one bit at a time.
///
/// The shift is a 0..8 counter rather than a rotating `0x80..0x01` mask, so
/// rolling over to the next byte is a plain comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct BitScan {
    byte: usize,
    shift: u8,
}

impl BitScan {
    #[inline]
    pub(crate) fn at(index: BitIndex) -> Self {
        Self {
            byte: index.byte(),
            shift: index.offset(),
        }
    }

    #[inline]
    pub(crate) fn byte(&self) -> usize {
        self.byte
    }

    #[inline]
    pub(crate) fn mask(&self) -> u8 {
        0x80 >> self.shift
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.shift += 1;
        if self.shift == 8 {
            self.shift = 0;
            self.byte += 1;
        }
    }
}
