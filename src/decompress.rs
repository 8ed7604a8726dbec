//! Huffman decompression pipeline.
//!
//! artifact → header → [`DecodeTable`](crate::DecodeTable) → [`unpack`] → bytes

use crate::artifact::{split, EncodedArtifact};
use crate::decode::unpack;
use crate::error::Result;

/// Decompress an artifact produced by [`compress`](crate::compress).
///
/// # Errors
///
/// Returns [`HuffmanError`](crate::HuffmanError) if:
/// - the header is truncated or malformed (`HeaderParse`)
/// - the stored codes are not prefix-free (`HeaderIntegrity`)
/// - the payload is shorter than its bit count or ends mid-code (`TruncatedStream`)
/// - the payload is longer than its bit count implies (`TrailingData`)
/// - the bits stop matching any stored code (`InvalidCode`)
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let (header, payload) = split(data)?;
    unpack(payload, header.bit_count, &header.decoder)
}

/// Decode an already parsed artifact.
pub fn decode(artifact: &EncodedArtifact) -> Result<Vec<u8>> {
    let decoder = artifact.table.decode_table()?;
    unpack(&artifact.payload, artifact.bit_count, &decoder)
}
