//! AES-CCM data frame protection
//!
//! UDS data frames are protected with CCMP: AES-128 in CCM mode with an
//! 8-byte MIC, the 13-byte nonce from [`build_ccmp_nonce`] and the 22-byte AAD
//! from [`build_aad`]. The output is the ciphertext followed by the tag.

use aes::Aes128;
use ccm::{
    Ccm,
    aead::{
        Aead, KeyInit, Payload,
        consts::{U8, U13},
    },
};
use tracing::debug;
use zeroize::Zeroize;

use super::{aad::build_aad, nonce::build_ccmp_nonce};
use crate::core::{CCMP_KEY_SIZE, CCMP_TAG_SIZE, CryptoError, CryptoResult, MacAddress};

/// AES-128-CCM with an 8-byte tag and a 13-byte nonce.
type UdsCcm = Ccm<Aes128, U8, U13>;

/// A CCMP data key.
///
/// Zeroized on drop for security.
#[derive(Clone, PartialEq, Eq)]
pub struct CcmpKey {
    key: [u8; CCMP_KEY_SIZE],
}

impl CcmpKey {
    /// Create a key from bytes.
    pub fn from_bytes(key: [u8; CCMP_KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Get the raw key bytes.
    ///
    /// # Security
    /// Handle with care - this exposes sensitive key material.
    pub fn as_bytes(&self) -> &[u8; CCMP_KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for CcmpKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CcmpKey(..)")
    }
}

impl Drop for CcmpKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Encrypt the payload of a data frame.
///
/// # Arguments
/// * `payload` - Plaintext (LLC + SecureData + data)
/// * `key` - CCMP data key
/// * `sender`, `receiver`, `bssid` - Addresses of the 802.11 frame
/// * `sequence_number` - Packet number; MUST NOT repeat for a sender under one key
/// * `frame_control` - Frame control field (exactly one DS bit set)
///
/// # Returns
/// Ciphertext with appended 8-byte tag
pub fn encrypt(
    payload: &[u8],
    key: &CcmpKey,
    sender: &MacAddress,
    receiver: &MacAddress,
    bssid: &MacAddress,
    sequence_number: u16,
    frame_control: u16,
) -> CryptoResult<Vec<u8>> {
    let aad = build_aad(sender, receiver, bssid, frame_control)?;
    let nonce = build_ccmp_nonce(sender, sequence_number);

    let cipher = UdsCcm::new(key.as_bytes().into());
    cipher
        .encrypt((&nonce).into(), Payload { msg: payload, aad: &aad })
        .map_err(|_| CryptoError::EncryptionFailed)
}

/// Decrypt and verify the payload of a data frame.
///
/// Takes the same addressing parameters as [`encrypt`]. On tag mismatch no
/// plaintext is returned.
///
/// # Returns
/// Decrypted payload, or [`CryptoError::AuthenticationFailed`]
pub fn decrypt(
    ciphertext: &[u8],
    key: &CcmpKey,
    sender: &MacAddress,
    receiver: &MacAddress,
    bssid: &MacAddress,
    sequence_number: u16,
    frame_control: u16,
) -> CryptoResult<Vec<u8>> {
    if ciphertext.len() < CCMP_TAG_SIZE {
        return Err(CryptoError::BufferTooShort {
            expected: CCMP_TAG_SIZE,
            actual: ciphertext.len(),
        });
    }

    let aad = build_aad(sender, receiver, bssid, frame_control)?;
    let nonce = build_ccmp_nonce(sender, sequence_number);

    let cipher = UdsCcm::new(key.as_bytes().into());
    cipher
        .decrypt((&nonce).into(), Payload { msg: ciphertext, aad: &aad })
        .map_err(|_| {
            debug!(%sender, sequence_number, len = ciphertext.len(), "CCMP authentication failed");
            CryptoError::AuthenticationFailed
        })
}
