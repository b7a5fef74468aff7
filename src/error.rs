//! Error types for the codec.
//!
//! Every failure is deterministic: a given input always produces the same
//! error, so callers should report it rather than retry.

use thiserror::Error;

/// Errors raised by the encode and decode paths.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffError {
    /// Empty input, empty frequency table or an empty code path.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input.
        message: String,
    },

    /// A code is too long for the one byte length field of the dictionary.
    #[error("Code for symbol {symbol:#04x} is {length} bits long, the dictionary allows at most 255")]
    PathTooLong {
        /// Symbol owning the code.
        symbol: u8,
        /// Length of the code in bits.
        length: usize,
    },

    /// The same symbol was declared twice in the dictionary.
    #[error("Duplicate symbol {symbol:#04x} in dictionary")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: u8,
    },

    /// The dictionary ended before its zero terminator.
    #[error("Unexpected end of stream at byte offset {offset}")]
    UnexpectedEndOfStream {
        /// Byte offset where more data was expected.
        offset: usize,
    },

    /// The payload ended with bits that never resolved to a symbol.
    #[error("Truncated stream: {pending} unresolved bits at bit position {bit_position}")]
    TruncatedStream {
        /// Bit position in the payload where decoding stopped.
        bit_position: usize,
        /// Number of bits accumulated without a match.
        pending: usize,
    },

    /// A decode index fell outside the char heap. Signals a bug.
    #[error("Char heap index {index} out of range for {len} slots")]
    IndexOutOfRange {
        /// Computed index.
        index: usize,
        /// Number of slots in the heap.
        len: usize,
    },

    /// A chunk declared more trailing bits than it carries.
    #[error("Malformed chunk {chunk}: {trailing} trailing bits but only {available} payload bits")]
    MalformedChunk {
        /// Index of the chunk in the body.
        chunk: usize,
        /// Declared trailing bit count.
        trailing: u8,
        /// Payload bits present in the chunk.
        available: usize,
    },

    /// The chunk size cannot hold the longest possible code.
    #[error("Chunk size {size} is below the minimum of {minimum} bytes")]
    InvalidChunkSize {
        /// Requested chunk size in bytes.
        size: usize,
        /// Smallest accepted chunk size.
        minimum: usize,
    },
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, HuffError>;

impl HuffError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an unexpected end of stream error.
    pub fn unexpected_end(offset: usize) -> Self {
        Self::UnexpectedEndOfStream { offset }
    }

    /// Create a truncated stream error.
    pub fn truncated(bit_position: usize, pending: usize) -> Self {
        Self::TruncatedStream {
            bit_position,
            pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HuffError::PathTooLong {
            symbol: 0x41,
            length: 300,
        };
        assert!(err.to_string().contains("0x41"));
        assert!(err.to_string().contains("300"));

        let err = HuffError::unexpected_end(12);
        assert!(err.to_string().contains("offset 12"));

        let err = HuffError::invalid_input("empty");
        assert_eq!(err.to_string(), "Invalid input: empty");
    }
}
