//! Bit packing: rewrites a byte sequence as concatenated prefix codes.

use crate::bitbuffer::BitBuffer;
use crate::code::CodeTable;
use crate::error::{HuffmanError, Result};

/// Packed payload plus the number of meaningful bits in it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedBits {
    /// MSB-first bytes; the last one is zero padded.
    pub bytes: Vec<u8>,
    /// Meaningful bits, excluding padding.
    pub bit_count: u64,
}

/// Replace every symbol of `data` by its code from `table`.
///
/// # Errors
/// [`HuffmanError::UnknownSymbol`] on the first symbol with no code.
pub fn pack(data: &[u8], table: &CodeTable) -> Result<PackedBits> {
    let mut output = BitBuffer::with_capacity(data.len() as u64 * 4);

    for (position, &symbol) in data.iter().enumerate() {
        let code = table
            .get(symbol)
            .ok_or(HuffmanError::UnknownSymbol { symbol, position })?;
        output.append_code(code);
    }

    let (bytes, bit_count) = output.finish();
    tracing::debug!(
        symbols = data.len(),
        bit_count,
        bytes = bytes.len(),
        "packed payload"
    );
    Ok(PackedBits { bytes, bit_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::PrefixCode;
    use crate::frequency::FrequencyTable;
    use crate::tree::HuffmanTree;

    fn table(codes: &[(u8, &str)]) -> CodeTable {
        CodeTable::from_codes(
            codes
                .iter()
                .map(|&(s, c)| (s, c.parse::<PrefixCode>().unwrap())),
        )
        .unwrap()
    }

    #[test]
    fn test_pack_aaab() {
        let freqs = FrequencyTable::count(b"aaab");
        let tree = HuffmanTree::build(&freqs).unwrap();
        let codes = CodeTable::from_tree(&tree).unwrap();

        let packed = pack(b"aaab", &codes).unwrap();
        assert_eq!(packed.bit_count, 4);
        // a = 1, b = 0 -> 1110 padded with 0000
        assert_eq!(packed.bytes, vec![0xE0]);
    }

    #[test]
    fn test_pack_empty() {
        let packed = pack(b"", &table(&[(b'a', "0")])).unwrap();
        assert_eq!(packed, PackedBits::default());
    }

    #[test]
    fn test_pack_explicit_codes() {
        let codes = table(&[(b'a', "0"), (b'b', "10"), (b'c', "11")]);
        let packed = pack(b"abcab", &codes).unwrap();
        // 0 10 11 0 10 -> 01011010
        assert_eq!(packed.bit_count, 8);
        assert_eq!(packed.bytes, vec![0x5A]);
    }

    #[test]
    fn test_bit_count_matches_weighted_length() {
        let data = b"peter piper picked a peck of pickled peppers";
        let freqs = FrequencyTable::count(data);
        let codes = CodeTable::from_tree(&HuffmanTree::build(&freqs).unwrap()).unwrap();

        let packed = pack(data, &codes).unwrap();
        assert_eq!(Some(packed.bit_count), codes.weighted_length(&freqs));
        assert_eq!(packed.bytes.len() as u64, (packed.bit_count + 7) / 8);
    }

    #[test]
    fn test_unknown_symbol() {
        let codes = table(&[(b'a', "0"), (b'b', "1")]);
        let result = pack(b"abba!", &codes);
        assert!(matches!(
            result,
            Err(HuffmanError::UnknownSymbol {
                symbol: b'!',
                position: 4
            })
        ));
    }
}
