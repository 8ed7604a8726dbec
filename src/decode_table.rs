//! Code to symbol lookup used by the decoder.
//!
//! The table is a binary trie stored as an arena: node `0` is the root and
//! every branch refers to its child by index. Inserting the codes of a
//! [`CodeTable`] into the trie is also where the prefix-free property is
//! checked, since a violation shows up as a code ending on a branch or
//! passing through another symbol.

use crate::code::CodeTable;
use crate::error::{HuffmanError, Result};

/// Index of the root node.
pub(crate) const ROOT: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Empty,
    Branch(usize),
    Symbol(u8),
}

/// Result of feeding one bit to the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Bits so far are a proper prefix of some code; continue from this node.
    Pending(usize),
    /// Bits so far form a complete code.
    Symbol(u8),
    /// No code starts with the bits so far.
    Invalid,
}

/// Arena trie mapping codes back to symbols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeTable {
    nodes: Vec<[Slot; 2]>,
    symbols: usize,
}

impl DecodeTable {
    /// Build the trie for `table`.
    ///
    /// # Errors
    /// [`HuffmanError::HeaderIntegrity`] if a code is empty or the codes are
    /// not prefix-free.
    pub fn new(table: &CodeTable) -> Result<Self> {
        let mut trie = Self {
            nodes: vec![[Slot::Empty; 2]],
            symbols: 0,
        };

        for (symbol, code) in table.iter() {
            let Some(last) = code.len().checked_sub(1) else {
                return Err(HuffmanError::HeaderIntegrity(format!(
                    "empty code for 0x{symbol:02x}"
                )));
            };

            let mut node = ROOT;
            for (depth, bit) in code.iter().enumerate() {
                let branch = usize::from(bit);
                match (trie.nodes[node][branch], depth == last) {
                    (Slot::Empty, true) => trie.nodes[node][branch] = Slot::Symbol(symbol),
                    (Slot::Empty, false) => {
                        let next = trie.nodes.len();
                        trie.nodes[node][branch] = Slot::Branch(next);
                        trie.nodes.push([Slot::Empty; 2]);
                        node = next;
                    }
                    (Slot::Branch(next), false) => node = next,
                    (Slot::Branch(_), true) => {
                        return Err(HuffmanError::HeaderIntegrity(format!(
                            "code {code} for 0x{symbol:02x} is a prefix of another code"
                        )));
                    }
                    (Slot::Symbol(other), true) => {
                        return Err(HuffmanError::HeaderIntegrity(format!(
                            "0x{other:02x} and 0x{symbol:02x} share code {code}"
                        )));
                    }
                    (Slot::Symbol(other), false) => {
                        return Err(HuffmanError::HeaderIntegrity(format!(
                            "code of 0x{other:02x} is a prefix of code {code} for 0x{symbol:02x}"
                        )));
                    }
                }
            }
            trie.symbols += 1;
        }

        Ok(trie)
    }

    /// Advance from `node` by one bit.
    #[inline]
    pub(crate) fn step(&self, node: usize, bit: bool) -> Step {
        match self.nodes[node][usize::from(bit)] {
            Slot::Empty => Step::Invalid,
            Slot::Branch(next) => Step::Pending(next),
            Slot::Symbol(symbol) => Step::Symbol(symbol),
        }
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.symbols
    }

    /// True for the table of an empty input; every bit is invalid.
    pub fn is_empty(&self) -> bool {
        self.symbols == 0
    }
}
