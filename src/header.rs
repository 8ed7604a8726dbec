//! Binary header carrying the code table and the payload bit count.
//!
//! ## Layout (little-endian)
//! ```text
//! u16                 symbol count (0-256)
//! repeated per symbol, ascending by symbol value:
//!   u8                symbol
//!   u8                code length in bits (1-255)
//!   ceil(len/8) bytes code bits, MSB-first, zero padded
//! u64                 total meaningful payload bits
//! ```
//! Every field is length-prefixed or fixed-width, so symbol and code values
//! can take any byte value.

#![allow(clippy::cast_possible_truncation)]

use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::code::{CodeTable, PrefixCode};
use crate::decode_table::DecodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::ALPHABET_SIZE;

/// Decoded header fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub table: CodeTable,
    pub bit_count: u64,
    /// Decode trie built while validating `table`.
    pub decoder: DecodeTable,
}

/// Write the header for `table` and `bit_count`.
///
/// # Errors
/// [`HuffmanError::HeaderIntegrity`] if a code cannot be described by a
/// one-byte length, or an I/O error from `writer`.
pub fn write_header<W: Write>(writer: &mut W, table: &CodeTable, bit_count: u64) -> Result<()> {
    writer.write_u16::<LittleEndian>(table.len() as u16)?;

    for (symbol, code) in table.iter() {
        let len = u8::try_from(code.len())
            .ok()
            .filter(|&len| len > 0)
            .ok_or_else(|| {
                HuffmanError::HeaderIntegrity(format!(
                    "code for 0x{symbol:02x} has unencodable length {}",
                    code.len()
                ))
            })?;
        writer.write_u8(symbol)?;
        writer.write_u8(len)?;
        writer.write_all(code.as_bytes())?;
    }

    writer.write_u64::<LittleEndian>(bit_count)?;
    Ok(())
}

/// Serialize the header into a fresh buffer.
pub fn encode_header(table: &CodeTable, bit_count: u64) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(2 + table.len() * 3 + 8);
    write_header(&mut bytes, table, bit_count)?;
    Ok(bytes)
}

/// Parse a header from the start of `data`.
///
/// Returns the header and the number of bytes it occupied.
///
/// # Errors
/// - [`HuffmanError::HeaderParse`] if a field is missing or out of range
/// - [`HuffmanError::HeaderIntegrity`] if symbols are repeated or unsorted,
///   padding bits inside a code are set, the codes are not prefix-free, or an
///   empty table declares payload bits
pub fn parse_header(data: &[u8]) -> Result<(Header, usize)> {
    let mut cursor = Cursor::new(data);

    let count = usize::from(
        cursor
            .read_u16::<LittleEndian>()
            .map_err(|_| parse_error(&cursor, "symbol count"))?,
    );
    if count > ALPHABET_SIZE {
        return Err(HuffmanError::HeaderParse {
            field: "symbol count",
            offset: 0,
        });
    }

    let mut codes = Vec::with_capacity(count);
    let mut previous: Option<u8> = None;

    for _ in 0..count {
        let symbol = cursor
            .read_u8()
            .map_err(|_| parse_error(&cursor, "symbol"))?;
        if previous.is_some_and(|p| p >= symbol) {
            return Err(HuffmanError::HeaderIntegrity(format!(
                "symbol 0x{symbol:02x} out of order or repeated"
            )));
        }
        previous = Some(symbol);

        let len_offset = cursor.position() as usize;
        let len = usize::from(
            cursor
                .read_u8()
                .map_err(|_| parse_error(&cursor, "code length"))?,
        );
        if len == 0 {
            return Err(HuffmanError::HeaderParse {
                field: "code length",
                offset: len_offset,
            });
        }

        let mut bits = vec![0u8; (len + 7) / 8];
        cursor
            .read_exact(&mut bits)
            .map_err(|_| parse_error(&cursor, "code bits"))?;
        let code = PrefixCode::from_packed(bits, len).ok_or_else(|| {
            HuffmanError::HeaderIntegrity(format!(
                "code for 0x{symbol:02x} has non-zero padding bits"
            ))
        })?;

        codes.push((symbol, code));
    }

    let bit_count = cursor
        .read_u64::<LittleEndian>()
        .map_err(|_| parse_error(&cursor, "bit count"))?;

    let (table, decoder) = CodeTable::from_codes_with_decoder(codes)?;
    if table.is_empty() && bit_count != 0 {
        return Err(HuffmanError::HeaderIntegrity(format!(
            "empty code table declares {bit_count} payload bits"
        )));
    }

    tracing::debug!(
        symbols = table.len(),
        max_code_len = table.max_code_len(),
        bit_count,
        "parsed header"
    );
    Ok((
        Header {
            table,
            bit_count,
            decoder,
        },
        cursor.position() as usize,
    ))
}

fn parse_error(cursor: &Cursor<&[u8]>, field: &'static str) -> HuffmanError {
    HuffmanError::HeaderParse {
        field,
        offset: cursor.position() as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::tree::HuffmanTree;

    fn table_for(data: &[u8]) -> CodeTable {
        CodeTable::from_tree(&HuffmanTree::build(&FrequencyTable::count(data)).unwrap()).unwrap()
    }

    #[test]
    fn test_aaab_layout() {
        let bytes = encode_header(&table_for(b"aaab"), 4).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x02, 0x00, // two symbols
                b'a', 0x01, 0x80, // a -> "1"
                b'b', 0x01, 0x00, // b -> "0"
                0x04, 0, 0, 0, 0, 0, 0, 0, // 4 bits
            ]
        );
    }

    #[test]
    fn test_round_trip() {
        let table = table_for(b"colon: newline\n and 0/1 text must survive\x00\xff");
        let bytes = encode_header(&table, 12345).unwrap();

        let (header, used) = parse_header(&bytes).unwrap();
        assert_eq!(used, bytes.len());
        assert_eq!(header.table, table);
        assert_eq!(header.bit_count, 12345);
        assert_eq!(header.decoder, table.decode_table().unwrap());
    }

    #[test]
    fn test_empty_table() {
        let bytes = encode_header(&CodeTable::default(), 0).unwrap();
        assert_eq!(bytes.len(), 10);

        let (header, used) = parse_header(&bytes).unwrap();
        assert!(header.table.is_empty());
        assert_eq!(header.bit_count, 0);
        assert_eq!(used, 10);
    }

    #[test]
    fn test_empty_table_with_bits() {
        let bytes = encode_header(&CodeTable::default(), 8).unwrap();
        assert!(matches!(
            parse_header(&bytes),
            Err(HuffmanError::HeaderIntegrity(_))
        ));
    }

    #[test]
    fn test_trailing_bytes_not_consumed() {
        let mut bytes = encode_header(&table_for(b"xy"), 2).unwrap();
        let len = bytes.len();
        bytes.extend_from_slice(&[0xAA, 0xBB]);

        let (_, used) = parse_header(&bytes).unwrap();
        assert_eq!(used, len);
    }

    #[test]
    fn test_truncated_symbol_count() {
        assert!(matches!(
            parse_header(&[0x01]),
            Err(HuffmanError::HeaderParse {
                field: "symbol count",
                ..
            })
        ));
    }

    #[test]
    fn test_truncated_code_bits() {
        // one symbol with a 9-bit code, but only one code byte present
        let data = [0x01, 0x00, b'a', 0x09, 0xFF];
        assert!(matches!(
            parse_header(&data),
            Err(HuffmanError::HeaderParse {
                field: "code bits",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_bit_count() {
        let mut bytes = encode_header(&table_for(b"aaab"), 4).unwrap();
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            parse_header(&bytes),
            Err(HuffmanError::HeaderParse {
                field: "bit count",
                ..
            })
        ));
    }

    #[test]
    fn test_symbol_count_too_large() {
        assert!(matches!(
            parse_header(&[0x01, 0x01]),
            Err(HuffmanError::HeaderParse {
                field: "symbol count",
                offset: 0
            })
        ));
    }

    #[test]
    fn test_zero_code_length() {
        let data = [0x01, 0x00, b'a', 0x00];
        assert!(matches!(
            parse_header(&data),
            Err(HuffmanError::HeaderParse {
                field: "code length",
                offset: 3
            })
        ));
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let data = [
            0x02, 0x00, //
            b'a', 0x02, 0x40, // a -> "01"
            b'b', 0x02, 0x40, // b -> "01"
            0x04, 0, 0, 0, 0, 0, 0, 0,
        ];
        assert!(matches!(
            parse_header(&data),
            Err(HuffmanError::HeaderIntegrity(_))
        ));
    }

    #[test]
    fn test_prefix_codes_rejected() {
        let data = [
            0x02, 0x00, //
            b'a', 0x01, 0x00, // a -> "0"
            b'b', 0x02, 0x00, // b -> "00"
            0x04, 0, 0, 0, 0, 0, 0, 0,
        ];
        assert!(matches!(
            parse_header(&data),
            Err(HuffmanError::HeaderIntegrity(_))
        ));
    }

    #[test]
    fn test_repeated_symbol_rejected() {
        let data = [
            0x02, 0x00, //
            b'a', 0x01, 0x00, //
            b'a', 0x01, 0x80, //
            0x04, 0, 0, 0, 0, 0, 0, 0,
        ];
        assert!(matches!(
            parse_header(&data),
            Err(HuffmanError::HeaderIntegrity(_))
        ));
    }

    #[test]
    fn test_padding_bits_rejected() {
        let data = [
            0x01, 0x00, //
            b'a', 0x01, 0x01, // "0" with a stray padding bit
            0x00, 0, 0, 0, 0, 0, 0, 0,
        ];
        assert!(matches!(
            parse_header(&data),
            Err(HuffmanError::HeaderIntegrity(_))
        ));
    }
}
