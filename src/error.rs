use thiserror::Error;

/// Errors that can occur when decoding or constructing ULIDs.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Error)]
pub enum Error {
    /// The ULID string is not exactly 26 characters long.
    #[error("invalid ULID string length: expected 26 characters, found {0}")]
    InvalidTextLength(usize),

    /// The ULID string contains a character outside the Crockford Base32 alphabet.
    #[error("invalid character 0x{byte:02X} at position {position}")]
    InvalidCharacter {
        /// The offending code unit.
        byte: u8,
        /// Zero-based position within the input.
        position: usize,
    },

    /// The binary input is not exactly 16 bytes long.
    #[error("invalid ULID binary length: expected 16 bytes, found {0}")]
    InvalidBinaryLength(usize),

    /// The timestamp does not fit into 48 bits.
    #[error("timestamp {0} does not fit into 48 bits")]
    InvalidTimestamp(u64),

    /// The payload is not exactly 10 bytes long.
    #[error("invalid payload length: expected 10 bytes, found {0}")]
    InvalidPayload(usize),

    /// The 80-bit payload wrapped around within a single millisecond.
    #[error("payload overflowed within a single millisecond")]
    PayloadOverflow,
}
