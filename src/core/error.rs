//! Error types for the UDS link layer.

use thiserror::Error;

use super::traits::KeySlot;

/// Errors that can occur when building or parsing frames.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Buffer or node list is shorter than the layout requires.
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    TooShort {
        /// Minimum expected size.
        expected: usize,
        /// Actual size available.
        actual: usize,
    },

    /// LLC header carries an EtherType this layer does not know.
    #[error("unknown ether type: 0x{0:04x}")]
    UnknownEtherType(u16),

    /// LLC header carries a known EtherType other than the one required.
    #[error("unexpected ether type: expected 0x{expected:04x}, got 0x{actual:04x}")]
    UnexpectedEtherType {
        /// EtherType the parser requires.
        expected: u16,
        /// EtherType found in the frame.
        actual: u16,
    },

    /// EAPoL packet magic does not match the expected packet type.
    #[error("unexpected eapol magic: expected 0x{expected:04x}, got 0x{actual:04x}")]
    UnexpectedMagic {
        /// Magic of the requested packet type.
        expected: u16,
        /// Magic found in the frame.
        actual: u16,
    },

    /// Username does not fit in the fixed-width field.
    #[error("username too long: {length} UTF-16 units")]
    UsernameTooLong {
        /// Encoded length in UTF-16 code units.
        length: usize,
    },

    /// Node counts violate `connected <= max <= UDS_MAX_NODES`.
    #[error("node count out of range: {connected} connected, {max} max")]
    NodeCountOutOfRange {
        /// Connected node count.
        connected: u8,
        /// Maximum node count.
        max: u8,
    },

    /// Payload does not fit the 16-bit size fields of the SecureData header.
    #[error("payload too large: {0} bytes")]
    PayloadTooLarge(usize),
}

/// Errors in the CCMP layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// ToDS/FromDS are both set or both clear.
    #[error("invalid frame control: 0x{0:04x} (exactly one of ToDS/FromDS must be set)")]
    InvalidFrameControl(u16),

    /// Input is shorter than the authentication tag.
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Minimum expected size.
        expected: usize,
        /// Actual size received.
        actual: usize,
    },

    /// CCM tag verification failed (corrupted, forged or wrong key).
    #[error("CCM authentication failed")]
    AuthenticationFailed,

    /// CCM encryption failed on well-formed input.
    #[error("CCM encryption failed")]
    EncryptionFailed,

    /// Key-material provider has no key for the slot.
    #[error("configuration error: no key material for {0}")]
    KeyUnavailable(KeySlot),
}

/// Top-level UDS errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UdsError {
    /// Framing error.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Crypto error.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl UdsError {
    /// Check if the offending frame should simply be dropped.
    ///
    /// These are the faults expected from a noisy or hostile medium.
    pub fn is_silent_drop(&self) -> bool {
        matches!(
            self,
            UdsError::Frame(FrameError::TooShort { .. })
                | UdsError::Frame(FrameError::UnknownEtherType(_))
                | UdsError::Frame(FrameError::UnexpectedEtherType { .. })
                | UdsError::Frame(FrameError::UnexpectedMagic { .. })
                | UdsError::Crypto(CryptoError::InvalidFrameControl(_))
                | UdsError::Crypto(CryptoError::BufferTooShort { .. })
                | UdsError::Crypto(CryptoError::AuthenticationFailed)
        )
    }

    /// Check if this error is fatal to the session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            UdsError::Crypto(CryptoError::KeyUnavailable(_))
                | UdsError::Crypto(CryptoError::EncryptionFailed)
        )
    }
}

/// Result type for framing operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
