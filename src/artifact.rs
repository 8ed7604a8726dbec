//! Complete compressed artifact: header followed by the packed payload.

use crate::code::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::header::{parse_header, write_header, Header};

/// Code table, payload bit count and packed payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodedArtifact {
    pub table: CodeTable,
    pub bit_count: u64,
    pub payload: Vec<u8>,
}

impl EncodedArtifact {
    /// Serialize header and payload.
    ///
    /// # Errors
    /// [`HuffmanError::TruncatedStream`] / [`HuffmanError::TrailingData`] if
    /// `payload` is not exactly `ceil(bit_count / 8)` bytes, so nothing is
    /// written that [`parse`](Self::parse) would reject.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        check_payload_len(self.bit_count, &self.payload)?;
        let mut bytes = Vec::with_capacity(2 + self.table.len() * 3 + 8 + self.payload.len());
        write_header(&mut bytes, &self.table, self.bit_count)?;
        bytes.extend_from_slice(&self.payload);
        Ok(bytes)
    }

    /// Parse an artifact without decoding its payload.
    ///
    /// # Errors
    /// Header errors from [`parse_header`], plus
    /// [`HuffmanError::TruncatedStream`] / [`HuffmanError::TrailingData`] when
    /// the payload length disagrees with the bit count.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (header, payload) = split(data)?;
        Ok(Self {
            table: header.table,
            bit_count: header.bit_count,
            payload: payload.to_vec(),
        })
    }

    /// Payload size in bytes implied by `bit_count`.
    pub fn payload_len(bit_count: u64) -> Result<usize> {
        let bytes = bit_count / 8 + u64::from(bit_count % 8 != 0);
        usize::try_from(bytes).map_err(|_| HuffmanError::HeaderParse {
            field: "bit count",
            offset: 0,
        })
    }
}

/// Parse the header of `data` and return it with the exact payload slice.
pub(crate) fn split(data: &[u8]) -> Result<(Header, &[u8])> {
    let (header, header_len) = parse_header(data)?;
    let payload = &data[header_len..];
    check_payload_len(header.bit_count, payload)?;
    Ok((header, payload))
}

fn check_payload_len(bit_count: u64, payload: &[u8]) -> Result<()> {
    let expected = EncodedArtifact::payload_len(bit_count)?;

    if payload.len() < expected {
        return Err(HuffmanError::TruncatedStream {
            consumed: payload.len() as u64 * 8,
            pending: usize::try_from(bit_count - payload.len() as u64 * 8)
                .unwrap_or(usize::MAX),
        });
    }
    if payload.len() > expected {
        return Err(HuffmanError::TrailingData {
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::PrefixCode;

    fn aaab_artifact() -> EncodedArtifact {
        EncodedArtifact {
            table: CodeTable::from_codes([
                (b'a', "1".parse::<PrefixCode>().unwrap()),
                (b'b', "0".parse::<PrefixCode>().unwrap()),
            ])
            .unwrap(),
            bit_count: 4,
            payload: vec![0xE0],
        }
    }

    #[test]
    fn test_round_trip() {
        let artifact = aaab_artifact();
        let bytes = artifact.to_bytes().unwrap();
        assert_eq!(bytes.len(), 2 + 3 + 3 + 8 + 1);
        assert_eq!(EncodedArtifact::parse(&bytes).unwrap(), artifact);
    }

    #[test]
    fn test_missing_payload() {
        let mut bytes = aaab_artifact().to_bytes().unwrap();
        bytes.pop();
        assert!(matches!(
            EncodedArtifact::parse(&bytes),
            Err(HuffmanError::TruncatedStream {
                consumed: 0,
                pending: 4
            })
        ));
    }

    #[test]
    fn test_trailing_data() {
        let mut bytes = aaab_artifact().to_bytes().unwrap();
        bytes.push(0x00);
        assert!(matches!(
            EncodedArtifact::parse(&bytes),
            Err(HuffmanError::TrailingData {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_to_bytes_rejects_inconsistent_payload() {
        let mut artifact = aaab_artifact();
        artifact.payload.push(0x00);
        assert!(matches!(
            artifact.to_bytes(),
            Err(HuffmanError::TrailingData {
                expected: 1,
                actual: 2
            })
        ));

        artifact.payload.clear();
        assert!(matches!(
            artifact.to_bytes(),
            Err(HuffmanError::TruncatedStream {
                consumed: 0,
                pending: 4
            })
        ));

        artifact.bit_count = 0;
        assert_eq!(artifact.to_bytes().unwrap().len(), 2 + 3 + 3 + 8);
    }

    #[test]
    fn test_payload_len() {
        assert_eq!(EncodedArtifact::payload_len(0).unwrap(), 0);
        assert_eq!(EncodedArtifact::payload_len(1).unwrap(), 1);
        assert_eq!(EncodedArtifact::payload_len(8).unwrap(), 1);
        assert_eq!(EncodedArtifact::payload_len(9).unwrap(), 2);
    }
}
