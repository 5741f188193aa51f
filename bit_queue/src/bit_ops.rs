//! MSB-first bit access and the bit-run copy every queue operation is built on.

use crate::cursor::{BitIndex, BitScan};

/// Bytes needed to hold `bits` bits.
#[inline]
pub const fn bytes_for(bits: usize) -> usize {
    bits.div_ceil(8)
}

#[inline]
pub fn get_bit(slice: &[u8], pos: usize) -> bool {
    let idx = BitIndex(pos);
    slice[idx.byte()] & idx.mask() != 0
}

#[inline]
pub fn set_bit(slice: &mut [u8], pos: usize, bit: bool) {
    let idx = BitIndex(pos);
    if bit {
        slice[idx.byte()] |= idx.mask();
    } else {
        slice[idx.byte()] &= !idx.mask();
    }
}

/// Copies `count` bits from `src` at `src_pos` into `dst` at `dst_pos`.
///
/// Bits of `dst` outside `dst_pos..dst_pos + count` keep their values whichever
/// path runs, so the aligned and misaligned copies are indistinguishable.
///
/// # Panics
///
/// Panics if either range runs past the end of its slice.
pub fn copy_bits(src: &[u8], src_pos: usize, dst: &mut [u8], dst_pos: usize, count: usize) {
    if count == 0 {
        return;
    }
    let from = BitIndex(src_pos);
    let to = BitIndex(dst_pos);
    if from.is_byte_aligned() && to.is_byte_aligned() {
        copy_aligned(src, from.byte(), dst, to.byte(), count);
    } else {
        copy_scan(src, from, dst, to, count);
    }
}

fn copy_aligned(src: &[u8], src_byte: usize, dst: &mut [u8], dst_byte: usize, count: usize) {
    let whole = count / 8;
    let tail = count % 8;

    dst[dst_byte..dst_byte + whole].copy_from_slice(&src[src_byte..src_byte + whole]);

    if tail != 0 {
        // low bits of the last byte lie past the run
        let keep = 0xFFu8 >> tail;
        let last = &mut dst[dst_byte + whole];
        *last = (*last & keep) | (src[src_byte + whole] & !keep);
    }
}

fn copy_scan(src: &[u8], from: BitIndex, dst: &mut [u8], to: BitIndex, count: usize) {
    let mut read = BitScan::at(from);
    let mut write = BitScan::at(to);

    for _ in 0..count {
        if src[read.byte()] & read.mask() != 0 {
            dst[write.byte()] |= write.mask();
        } else {
            dst[write.byte()] &= !write.mask();
        }
        read.advance();
        write.advance();
    }
}
