//! Prefix codes and the symbol to code table.
//!
//! Codes are derived from a [`HuffmanTree`] in one depth-first pass: a left
//! branch appends `0`, a right branch appends `1`, and every leaf receives the
//! path that led to it. A tree consisting of a single leaf has no branches, so
//! that leaf is given the fixed one-bit code `0`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::decode_table::DecodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Longest code a header can describe.
pub const MAX_CODE_LEN: usize = u8::MAX as usize;

/// Variable-length bit sequence, stored MSB-first in packed bytes.
///
/// Bits past `len` in the last byte are always zero.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct PrefixCode {
    bytes: Vec<u8>,
    len: usize,
}

impl PrefixCode {
    /// Create an empty code.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a code from packed MSB-first bytes.
    ///
    /// Returns `None` if `bytes` is not exactly `ceil(len / 8)` long or if any
    /// bit past `len` is set.
    pub fn from_packed(bytes: Vec<u8>, len: usize) -> Option<Self> {
        if bytes.len() != (len + 7) / 8 {
            return None;
        }
        let used = len % 8;
        if used != 0 {
            let last = *bytes.last()?;
            if last & (0xFF >> used) != 0 {
                return None;
            }
        }
        Some(Self { bytes, len })
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        let bit_offset = self.len % 8;
        if bit_offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> bit_offset;
            }
        }
        self.len += 1;
    }

    /// Remove and return the last bit.
    pub fn pop(&mut self) -> Option<bool> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let bit_offset = self.len % 8;
        let mask = 0x80 >> bit_offset;
        let last = self.bytes.last_mut()?;
        let bit = *last & mask != 0;
        *last &= !mask;
        if bit_offset == 0 {
            self.bytes.pop();
        }
        Some(bit)
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for the zero-length code, which no table accepts.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `index` (0 = first bit emitted).
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range");
        self.bytes[index / 8] & (0x80 >> (index % 8)) != 0
    }

    /// Bits in emission order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.bit(i))
    }

    /// Packed MSB-first bytes, zero padded.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.len <= other.len && (0..self.len).all(|i| self.bit(i) == other.bit(i))
    }
}

impl fmt::Display for PrefixCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for PrefixCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrefixCode({self})")
    }
}

impl FromStr for PrefixCode {
    type Err = String;

    /// Parse a string of `0` and `1` characters.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut code = Self::new();
        for c in s.chars() {
            match c {
                '0' => code.push(false),
                '1' => code.push(true),
                other => return Err(format!("invalid bit character {other:?}")),
            }
        }
        Ok(code)
    }
}

/// Symbol to code mapping, kept sorted by symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, PrefixCode>,
}

impl CodeTable {
    /// Derive the code of every leaf of `tree`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        Self::from_root(Some(tree.root()))
    }

    /// Derive codes from an optional root.
    ///
    /// # Errors
    /// [`HuffmanError::NoTree`] if `root` is `None`.
    pub fn from_root(root: Option<&Node>) -> Result<Self> {
        let root = root.ok_or(HuffmanError::NoTree)?;
        let mut table = Self::default();

        match root {
            Node::Leaf { symbol, .. } => {
                let mut code = PrefixCode::new();
                code.push(false);
                table.codes.insert(*symbol, code);
            }
            Node::Internal { .. } => {
                let mut path = PrefixCode::new();
                table.collect(root, &mut path)?;
            }
        }

        for (symbol, code) in &table.codes {
            tracing::trace!(symbol, code = %code, "assigned code");
        }
        Ok(table)
    }

    fn collect(&mut self, node: &Node, path: &mut PrefixCode) -> Result<()> {
        match node {
            Node::Leaf { symbol, .. } => {
                if self.codes.insert(*symbol, path.clone()).is_some() {
                    return Err(HuffmanError::TreeConstruction(format!(
                        "symbol 0x{symbol:02x} appears in more than one leaf"
                    )));
                }
            }
            Node::Internal { left, right, .. } => {
                path.push(false);
                self.collect(left, path)?;
                path.pop();

                path.push(true);
                self.collect(right, path)?;
                path.pop();
            }
        }
        Ok(())
    }

    /// Build a table from explicit codes, checking that it is decodable.
    ///
    /// # Errors
    /// [`HuffmanError::HeaderIntegrity`] if a symbol repeats, a code is empty
    /// or longer than [`MAX_CODE_LEN`], or one code is a prefix of another.
    pub fn from_codes<I>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, PrefixCode)>,
    {
        Self::from_codes_with_decoder(codes).map(|(table, _)| table)
    }

    /// Like [`from_codes`](Self::from_codes), also returning the decode trie
    /// built while checking the codes.
    pub(crate) fn from_codes_with_decoder<I>(codes: I) -> Result<(Self, DecodeTable)>
    where
        I: IntoIterator<Item = (u8, PrefixCode)>,
    {
        let mut table = Self::default();
        for (symbol, code) in codes {
            if code.is_empty() || code.len() > MAX_CODE_LEN {
                return Err(HuffmanError::HeaderIntegrity(format!(
                    "code for 0x{symbol:02x} has invalid length {}",
                    code.len()
                )));
            }
            if table.codes.insert(symbol, code).is_some() {
                return Err(HuffmanError::HeaderIntegrity(format!(
                    "symbol 0x{symbol:02x} listed twice"
                )));
            }
        }
        let decoder = DecodeTable::new(&table)?;
        Ok((table, decoder))
    }

    /// Code for `symbol`, if it has one.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<&PrefixCode> {
        self.codes.get(&symbol)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True for the table of an empty input.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs sorted by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &PrefixCode)> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(PrefixCode::len).max().unwrap_or(0)
    }

    /// Sum of frequency times code length: the exact payload size in bits.
    ///
    /// Symbols missing from the table contribute nothing. Returns `None` if
    /// the sum does not fit in a `u64`.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> Option<u64> {
        frequencies
            .iter()
            .filter_map(|e| self.get(e.symbol).map(|c| (e.count, c.len() as u64)))
            .try_fold(0u64, |total, (count, len)| {
                total.checked_add(count.checked_mul(len)?)
            })
    }

    /// Code to symbol view for decoding.
    pub fn decode_table(&self) -> Result<DecodeTable> {
        DecodeTable::new(self)
    }
}
