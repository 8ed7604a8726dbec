//! Variable-length bit buffer for building the packed payload.
//!
//! Bits are appended sequentially using MSB-first ordering:
//! - First bit appended goes to bit position 7
//! - Second bit goes to position 6, etc.
//!
//! The final byte is zero padded in its low-order bits.

#![allow(clippy::cast_possible_truncation)]

use crate::code::PrefixCode;

/// Variable-length bit buffer.
///
/// Uses a 64-bit accumulator and flushes whole bytes as they fill up.
#[derive(Clone, Debug, Default)]
pub struct BitBuffer {
    /// Byte storage for flushed bits.
    data: Vec<u8>,
    /// Total number of bits in the buffer.
    num_bits: u64,
    /// Accumulator for pending bits.
    acc: u64,
    /// Number of bits in the accumulator.
    acc_len: usize,
}

impl BitBuffer {
    /// Create a new empty bit buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer expected to hold about `num_bits` bits.
    pub fn with_capacity(num_bits: u64) -> Self {
        Self {
            data: Vec::with_capacity(usize::try_from(num_bits.saturating_add(7) / 8).unwrap_or(0)),
            ..Self::default()
        }
    }

    /// Total number of meaningful bits appended.
    #[inline]
    pub fn len(&self) -> u64 {
        self.num_bits
    }

    /// True when no bit has been appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Flush complete bytes from accumulator to data buffer.
    fn flush_acc(&mut self) {
        while self.acc_len >= 8 {
            self.acc_len -= 8;
            self.data.push((self.acc >> self.acc_len) as u8);
            self.acc &= (1u64 << self.acc_len) - 1;
        }
    }

    /// Append the low `num_bits` bits of `value`, most significant first.
    ///
    /// # Panics
    /// Panics if `num_bits` is greater than 8.
    #[inline]
    pub fn append_value(&mut self, value: u8, num_bits: usize) {
        assert!(num_bits <= 8, "at most 8 bits per call");
        if num_bits == 0 {
            return;
        }

        let mask = (1u64 << num_bits) - 1;
        self.acc = (self.acc << num_bits) | (u64::from(value) & mask);
        self.acc_len += num_bits;
        self.num_bits += num_bits as u64;

        self.flush_acc();
    }

    /// Append every bit of `code`.
    pub fn append_code(&mut self, code: &PrefixCode) {
        let mut remaining = code.len();
        for &byte in code.as_bytes() {
            let take = remaining.min(8);
            self.append_value(byte >> (8 - take), take);
            remaining -= take;
        }
    }

    /// Consume the buffer, returning packed bytes (the last one zero padded)
    /// and the meaningful bit count.
    pub fn finish(mut self) -> (Vec<u8>, u64) {
        if self.acc_len > 0 {
            let last = (self.acc << (8 - self.acc_len)) as u8;
            self.data.push(last);
        }
        (self.data, self.num_bits)
    }
}
