//! Core traits for the UDS link layer.
//!
//! The only collaborator this crate calls out to is the hardware key store.

use std::fmt;

use super::constants::{AES_BLOCK_SIZE, UDS_DATA_KEY_SLOT};

/// Identifier of a hardware AES key slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeySlot(pub u8);

impl KeySlot {
    /// Slot holding the normal key used to derive UDS data keys.
    pub const UDS_DATA: Self = Self(UDS_DATA_KEY_SLOT);

    /// Get the raw slot id.
    pub fn as_byte(self) -> u8 {
        self.0
    }
}

impl fmt::Display for KeySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key slot 0x{:02x}", self.0)
    }
}

/// Source of hardware-resident AES key material.
///
/// Implementations are read-only from this crate's point of view; they are
/// queried once per key derivation and never mutated.
///
/// # Example
///
/// ```ignore
/// struct Dumped([u8; 16]);
///
/// impl KeyProvider for Dumped {
///     fn normal_key(&self, slot: KeySlot) -> Option<[u8; 16]> {
///         (slot == KeySlot::UDS_DATA).then_some(self.0)
///     }
/// }
/// ```
pub trait KeyProvider {
    /// Return the normal key stored in `slot`, or `None` if it was never loaded.
    fn normal_key(&self, slot: KeySlot) -> Option<[u8; AES_BLOCK_SIZE]>;
}

impl<P: KeyProvider + ?Sized> KeyProvider for &P {
    fn normal_key(&self, slot: KeySlot) -> Option<[u8; AES_BLOCK_SIZE]> {
        (**self).normal_key(slot)
    }
}
