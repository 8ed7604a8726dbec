//! Error types for Huffman compression/decompression.

use std::io;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffmanError>;

/// Errors that can occur during Huffman compression or decompression.
#[derive(Debug, thiserror::Error)]
pub enum HuffmanError {
    /// Input contains no symbols, so no tree can be built.
    #[error("empty alphabet: input contains no symbols")]
    EmptyAlphabet,

    /// Code generation was asked to walk a missing tree.
    #[error("no tree to generate codes from")]
    NoTree,

    /// Internal invariant violation while building the tree.
    #[error("tree construction failed: {0}")]
    TreeConstruction(String),

    /// Encoder met a symbol absent from the code table.
    #[error("unknown symbol 0x{symbol:02x} at input position {position}")]
    UnknownSymbol { symbol: u8, position: usize },

    /// Header is malformed or truncated.
    #[error("header parse error: bad or missing {field} at byte offset {offset}")]
    HeaderParse { field: &'static str, offset: usize },

    /// Parsed code table violates the prefix-free invariant or is inconsistent.
    #[error("header integrity error: {0}")]
    HeaderIntegrity(String),

    /// Payload ends before the pending bits resolve to a symbol.
    #[error("truncated stream: {pending} unresolved bits after {consumed} bits consumed")]
    TruncatedStream { consumed: u64, pending: usize },

    /// Bits at this position do not continue any stored code.
    #[error("invalid code at payload bit {position}")]
    InvalidCode { position: u64 },

    /// Artifact carries bytes beyond the declared payload.
    #[error("trailing data: expected {expected} bytes, got {actual}")]
    TrailingData { expected: usize, actual: usize },

    /// I/O error while writing an artifact.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl HuffmanError {
    /// Stable identifier for surfacing the failure to end users.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyAlphabet => "empty-alphabet",
            Self::NoTree => "no-tree",
            Self::TreeConstruction(_) => "tree-construction",
            Self::UnknownSymbol { .. } => "unknown-symbol",
            Self::HeaderParse { .. } => "header-parse",
            Self::HeaderIntegrity(_) => "header-integrity",
            Self::TruncatedStream { .. } => "truncated-stream",
            Self::InvalidCode { .. } => "invalid-code",
            Self::TrailingData { .. } => "trailing-data",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HuffmanError::EmptyAlphabet;
        assert!(err.to_string().contains("empty alphabet"));

        let err = HuffmanError::UnknownSymbol {
            symbol: 0x41,
            position: 7,
        };
        assert!(err.to_string().contains("0x41"));
        assert!(err.to_string().contains("position 7"));

        let err = HuffmanError::HeaderParse {
            field: "code length",
            offset: 12,
        };
        assert!(err.to_string().contains("code length"));
        assert!(err.to_string().contains("offset 12"));

        let err = HuffmanError::HeaderIntegrity("duplicate code".to_string());
        assert!(err.to_string().contains("duplicate code"));

        let err = HuffmanError::TruncatedStream {
            consumed: 9,
            pending: 2,
        };
        assert!(err.to_string().contains("2 unresolved bits"));

        let err = HuffmanError::TrailingData {
            expected: 4,
            actual: 6,
        };
        assert!(err.to_string().contains("expected 4"));
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            HuffmanError::EmptyAlphabet,
            HuffmanError::NoTree,
            HuffmanError::TreeConstruction(String::new()),
            HuffmanError::UnknownSymbol {
                symbol: 0,
                position: 0,
            },
            HuffmanError::HeaderParse {
                field: "symbol count",
                offset: 0,
            },
            HuffmanError::HeaderIntegrity(String::new()),
            HuffmanError::TruncatedStream {
                consumed: 0,
                pending: 0,
            },
            HuffmanError::InvalidCode { position: 0 },
            HuffmanError::TrailingData {
                expected: 0,
                actual: 0,
            },
        ];

        let mut codes: Vec<&str> = errors.iter().map(HuffmanError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
