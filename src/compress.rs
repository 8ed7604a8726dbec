//! Huffman compression pipeline.
//!
//! bytes → [`FrequencyTable`] → [`HuffmanTree`] → [`CodeTable`] →
//! [`pack`] + header → [`EncodedArtifact`]

use crate::artifact::EncodedArtifact;
use crate::code::CodeTable;
use crate::encode::pack;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// Build the code table and packed payload for `data`.
///
/// Empty input yields an artifact with an empty table and no payload; the
/// tree is never built in that case.
pub fn encode(data: &[u8]) -> Result<EncodedArtifact> {
    let frequencies = FrequencyTable::count(data);
    if frequencies.is_empty() {
        tracing::debug!("empty input, writing empty artifact");
        return Ok(EncodedArtifact::default());
    }

    let table = {
        let tree = HuffmanTree::build(&frequencies)?;
        CodeTable::from_tree(&tree)?
    };
    tracing::debug!(
        symbols = frequencies.len(),
        input_bytes = data.len(),
        max_code_len = table.max_code_len(),
        "derived code table"
    );

    encode_with_table(data, table)
}

/// Encode `data` with an existing code table.
///
/// # Errors
/// [`HuffmanError::UnknownSymbol`](crate::HuffmanError::UnknownSymbol) if
/// `data` holds a symbol the table has no code for.
pub fn encode_with_table(data: &[u8], table: CodeTable) -> Result<EncodedArtifact> {
    let packed = pack(data, &table)?;
    Ok(EncodedArtifact {
        table,
        bit_count: packed.bit_count,
        payload: packed.bytes,
    })
}

/// Compress `data` into a self-describing artifact.
///
/// # Example
///
/// ```
/// let artifact = huffpack::compress(b"aaab").unwrap();
/// assert_eq!(huffpack::decompress(&artifact).unwrap(), b"aaab");
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    encode(data)?.to_bytes()
}

/// Compress `data` reusing a code table built for other input.
pub fn compress_with_table(data: &[u8], table: &CodeTable) -> Result<Vec<u8>> {
    encode_with_table(data, table.clone())?.to_bytes()
}
