//! CCMP nonce construction
//!
//! Per IEEE 802.11-2007 8.3.3.3.3, nonces are 13 bytes:
//! - Priority (1 byte): always 0 for UDS
//! - Transmitter address (6 bytes)
//! - Packet number (6 bytes): 4 zero bytes, then the BE16 sequence number
//!
//! Uniqueness of (sender, sequence number) under one key is the caller's
//! obligation; this module never sees more than one frame.

use crate::core::{CCMP_NONCE_SIZE, CCMP_PN_SIZE, MAC_ADDRESS_SIZE, MacAddress};

/// Construct the 6-byte packet number for a sequence number.
pub fn packet_number(sequence_number: u16) -> [u8; CCMP_PN_SIZE] {
    let mut pn = [0u8; CCMP_PN_SIZE];
    pn[4..6].copy_from_slice(&sequence_number.to_be_bytes());
    pn
}

/// Construct a 13-byte CCMP nonce.
///
/// Layout:
/// ```text
/// [ priority = 0 (1) | sender (6) | 0 0 0 0 | seq (BE16) ]
/// ```
pub fn build_ccmp_nonce(sender: &MacAddress, sequence_number: u16) -> [u8; CCMP_NONCE_SIZE] {
    let mut nonce = [0u8; CCMP_NONCE_SIZE];

    // Priority (byte 0) - zero
    nonce[1..7].copy_from_slice(sender.as_bytes());
    nonce[7..13].copy_from_slice(&packet_number(sequence_number));

    nonce
}

/// Parse a nonce back into its sender and sequence number.
///
/// Useful for debugging and testing.
pub fn parse_ccmp_nonce(nonce: &[u8; CCMP_NONCE_SIZE]) -> (MacAddress, u16) {
    let mut sender = [0u8; MAC_ADDRESS_SIZE];
    sender.copy_from_slice(&nonce[1..7]);

    (MacAddress(sender), u16::from_be_bytes([nonce[11], nonce[12]]))
}
