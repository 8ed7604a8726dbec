//! # huffpack
//!
//! Lossless byte-oriented Huffman compression with a self-describing,
//! length-prefixed binary header.
//!
//! ## Design
//!
//! - **Safe Rust** - `#![forbid(unsafe_code)]`
//! - **Deterministic** - fixed tie-break, identical input gives identical output
//! - **Explicit bit count** - padding is never decoded
//! - **Validated headers** - non prefix-free tables are rejected before decoding
//!
//! ## API Overview
//!
//! ### High-Level Functions
//!
//! - [`compress()`] - Compress an entire input buffer into an artifact
//! - [`decompress()`] - Decompress an entire artifact
//! - [`compress_with_table()`] - Compress with a previously built [`CodeTable`]
//!
//! ### Pipeline Components
//!
//! - [`FrequencyTable`] - Symbol counts
//! - [`HuffmanTree`] - Optimal binary tree over the counts
//! - [`CodeTable`] / [`PrefixCode`] - Symbol to code mapping
//! - [`pack`] / [`unpack`] - Bit packing and unpacking
//! - [`write_header`] / [`parse_header`] - Code table serialization
//! - [`EncodedArtifact`] - Header plus payload
//!
//! ### Bit I/O
//!
//! - [`BitBuffer`] - Variable-length MSB-first output buffer
//! - [`BitReader`] - Bounded MSB-first bit reader
//!
//! ## Usage
//!
//! ```rust
//! use huffpack::{compress, decompress};
//!
//! let data = b"abracadabra";
//! let artifact = compress(data).unwrap();
//! assert_eq!(decompress(&artifact).unwrap(), data);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

mod artifact;
mod bitbuffer;
mod bitreader;
mod code;
mod compress;
mod decode;
mod decode_table;
mod decompress;
mod encode;
mod error;
mod frequency;
mod header;
mod tree;

pub use artifact::EncodedArtifact;
pub use bitbuffer::BitBuffer;
pub use bitreader::BitReader;
pub use code::{CodeTable, PrefixCode, MAX_CODE_LEN};
pub use compress::{compress, compress_with_table, encode, encode_with_table};
pub use decode::unpack;
pub use decode_table::DecodeTable;
pub use decompress::{decode, decompress};
pub use encode::{pack, PackedBits};
pub use error::{HuffmanError, Result};
pub use frequency::{FrequencyEntry, FrequencyTable, ALPHABET_SIZE};
pub use header::{encode_header, parse_header, write_header, Header};
pub use tree::{HuffmanTree, Node};
