//! UDS Protocol - CCMP Layer
//!
//! Implements the data frame protection used by the hardware:
//! - AAD construction from 802.11 addressing
//! - 13-byte CCM nonce construction
//! - AES-128-CCM encrypt/decrypt with an 8-byte tag
//! - Data key derivation (MD5 + AES-CTR under a hardware key)
//!
//! Everything here is a pure function of its arguments. Callers must keep a
//! strictly increasing sequence number per sender so that no nonce is reused
//! under a key.

mod aad;
mod aead;
mod keys;
mod nonce;

pub use aad::*;
pub use aead::*;
pub use keys::*;
pub use nonce::*;
