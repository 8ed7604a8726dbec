//! Sequential bit reader over a packed payload.
//!
//! Bits are read MSB-first within each byte:
//! - Bit position 0 in a byte is bit 7 (MSB)
//! - Bit position 7 in a byte is bit 0 (LSB)
//!
//! The reader is bounded by an explicit bit count, so zero padding after the
//! last meaningful bit is never returned.

#![allow(clippy::cast_possible_truncation)]

use crate::error::{HuffmanError, Result};

/// Sequential bit reader.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    /// Source data.
    data: &'a [u8],
    /// Total number of meaningful bits.
    num_bits: u64,
    /// Current bit position.
    bit_pos: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader over the first `num_bits` bits of `data`.
    ///
    /// # Errors
    /// [`HuffmanError::TruncatedStream`] if `data` holds fewer than `num_bits` bits.
    pub fn new(data: &'a [u8], num_bits: u64) -> Result<Self> {
        let available = (data.len() as u64).saturating_mul(8);
        if available < num_bits {
            return Err(HuffmanError::TruncatedStream {
                consumed: available,
                pending: usize::try_from(num_bits - available).unwrap_or(usize::MAX),
            });
        }

        Ok(Self {
            data,
            num_bits,
            bit_pos: 0,
        })
    }

    /// Current bit position.
    #[inline]
    pub fn position(&self) -> u64 {
        self.bit_pos
    }

    /// Number of meaningful bits left.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.num_bits - self.bit_pos
    }

    /// True while meaningful bits remain.
    #[inline]
    pub fn has_bits(&self) -> bool {
        self.bit_pos < self.num_bits
    }

    /// Read a single bit, or `None` once all meaningful bits are consumed.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.bit_pos >= self.num_bits {
            return None;
        }

        let byte_index = (self.bit_pos >> 3) as usize;
        let bit_index = (self.bit_pos & 7) as u32;
        let bit = (self.data[byte_index] >> (7 - bit_index)) & 1 == 1;

        self.bit_pos += 1;
        Some(bit)
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}
