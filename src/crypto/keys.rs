//! CCMP data key derivation
//!
//! The data key of a network is the MD5 digest of the passphrase, encrypted
//! with AES-128-CTR under the hardware key in slot 0x2D. The initial counter
//! block is the MD5 digest of the network identity:
//!
//! ```text
//! [ host MAC (6) | wlan_comm_id (LE32) | id (1) | 0 (1) | network_id (LE32) ]
//! ```
//!
//! Unlike the transmitted headers, the two 32-bit ids are little-endian here.
//!
//! MD5 is required for compatibility with the hardware; it carries no
//! security claim here.

use std::collections::HashMap;
use std::fmt;

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use md5::{Digest, Md5};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::aead::CcmpKey;
use crate::core::{
    AES_BLOCK_SIZE, CRYPTO_CTR_INPUT_SIZE, CryptoError, CryptoResult, KeyProvider, KeySlot,
    MD5_DIGEST_SIZE, NetworkInfo,
};

/// AES-128 in CTR mode with a 128-bit big-endian counter.
type Aes128Ctr = ctr::Ctr128BE<Aes128>;

fn md5_digest(data: &[u8]) -> [u8; MD5_DIGEST_SIZE] {
    let digest = Md5::digest(data);
    let mut out = [0u8; MD5_DIGEST_SIZE];
    out.copy_from_slice(&digest);
    out
}

/// Serialize the network identity hashed into the crypto counter.
fn crypto_ctr_input(network_info: &NetworkInfo) -> [u8; CRYPTO_CTR_INPUT_SIZE] {
    let mut buf = [0u8; CRYPTO_CTR_INPUT_SIZE];
    buf[0..6].copy_from_slice(network_info.host_mac_address.as_bytes());
    buf[6..10].copy_from_slice(&network_info.wlan_comm_id.to_le_bytes());
    buf[10] = network_info.id;
    // Reserved (byte 11) - zero
    buf[12..16].copy_from_slice(&network_info.network_id.to_le_bytes());
    buf
}

/// Compute the initial AES-CTR counter block for a network.
pub fn compute_crypto_counter(network_info: &NetworkInfo) -> [u8; AES_BLOCK_SIZE] {
    md5_digest(&crypto_ctr_input(network_info))
}

/// Derive the CCMP data key of a network.
///
/// Deterministic for a given passphrase, network and provider response.
/// Fails with [`CryptoError::KeyUnavailable`] if the provider has no key for
/// [`KeySlot::UDS_DATA`]; this is a configuration problem and not retried.
pub fn derive_data_key<P>(
    passphrase: &[u8],
    network_info: &NetworkInfo,
    provider: &P,
) -> CryptoResult<CcmpKey>
where
    P: KeyProvider + ?Sized,
{
    let hardware_key = provider
        .normal_key(KeySlot::UDS_DATA)
        .map(Zeroizing::new)
        .ok_or_else(|| {
            warn!(slot = %KeySlot::UDS_DATA, "hardware key not loaded");
            CryptoError::KeyUnavailable(KeySlot::UDS_DATA)
        })?;

    let counter = compute_crypto_counter(network_info);
    let mut key = Zeroizing::new(md5_digest(passphrase));

    let mut cipher = Aes128Ctr::new((&*hardware_key).into(), (&counter).into());
    cipher.apply_keystream(&mut key[..]);

    debug!(
        host = %network_info.host_mac_address,
        network_id = network_info.network_id,
        "derived CCMP data key"
    );

    Ok(CcmpKey::from_bytes(*key))
}

/// Key provider backed by an in-memory slot table.
///
/// Suitable for hosts that load keys from a dump at startup, and for tests.
#[derive(Clone, Default)]
pub struct StaticKeyProvider {
    keys: HashMap<KeySlot, Zeroizing<[u8; AES_BLOCK_SIZE]>>,
}

impl StaticKeyProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_key(mut self, slot: KeySlot, key: [u8; AES_BLOCK_SIZE]) -> Self {
        self.insert(slot, key);
        self
    }

    /// Store the normal key of `slot`, replacing any previous one.
    pub fn insert(&mut self, slot: KeySlot, key: [u8; AES_BLOCK_SIZE]) {
        self.keys.insert(slot, Zeroizing::new(key));
    }

    /// Check if `slot` has a key.
    pub fn contains(&self, slot: KeySlot) -> bool {
        self.keys.contains_key(&slot)
    }
}

impl KeyProvider for StaticKeyProvider {
    fn normal_key(&self, slot: KeySlot) -> Option<[u8; AES_BLOCK_SIZE]> {
        self.keys.get(&slot).map(|key| **key)
    }
}

impl fmt::Debug for StaticKeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut slots: Vec<_> = self.keys.keys().collect();
        slots.sort();
        f.debug_struct("StaticKeyProvider")
            .field("slots", &slots)
            .finish()
    }
}
