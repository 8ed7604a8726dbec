//! Bit unpacking: turns a packed payload back into symbols.
//!
//! The decoder walks the [`DecodeTable`] one bit at a time. The current trie
//! node stands for the bits accumulated since the last emitted symbol; it
//! returns to the root every time a complete code is matched.

use crate::bitreader::BitReader;
use crate::decode_table::{DecodeTable, Step, ROOT};
use crate::error::{HuffmanError, Result};

/// Decode exactly `bit_count` bits of `payload`.
///
/// Padding bits beyond `bit_count` are never read.
///
/// # Errors
/// - [`HuffmanError::TruncatedStream`] if `payload` is shorter than `bit_count`
///   bits, or the last code is left unfinished
/// - [`HuffmanError::InvalidCode`] if the bits stop matching any code
pub fn unpack(payload: &[u8], bit_count: u64, table: &DecodeTable) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(payload, bit_count)?;
    let mut output = Vec::with_capacity(usize::try_from(bit_count / 2).unwrap_or(0));

    let mut node = ROOT;
    let mut pending = 0usize;

    while let Some(bit) = reader.read_bit() {
        match table.step(node, bit) {
            Step::Symbol(symbol) => {
                output.push(symbol);
                node = ROOT;
                pending = 0;
            }
            Step::Pending(next) => {
                node = next;
                pending += 1;
            }
            Step::Invalid => {
                return Err(HuffmanError::InvalidCode {
                    position: reader.position() - 1,
                });
            }
        }
    }

    if pending > 0 {
        return Err(HuffmanError::TruncatedStream {
            consumed: bit_count,
            pending,
        });
    }

    tracing::debug!(bit_count, symbols = output.len(), "unpacked payload");
    Ok(output)
}
