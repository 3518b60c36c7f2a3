//! Value types shared by the framing and crypto layers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::constants::{MAC_ADDRESS_SIZE, USERNAME_LENGTH};
use super::error::{FrameError, FrameResult};

/// 48-bit IEEE 802 MAC address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress(pub [u8; MAC_ADDRESS_SIZE]);

impl MacAddress {
    /// Broadcast address `FF:FF:FF:FF:FF:FF`.
    pub const BROADCAST: Self = Self([0xFF; MAC_ADDRESS_SIZE]);

    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; MAC_ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; MAC_ADDRESS_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for MacAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; MAC_ADDRESS_SIZE]> for MacAddress {
    fn from(bytes: [u8; MAC_ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// Error returned when parsing a textual MAC address.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid mac address: {0:?}")]
pub struct ParseMacAddressError(pub String);

impl FromStr for MacAddress {
    type Err = ParseMacAddressError;

    /// Parse `AA:BB:CC:DD:EE:FF` (`-` is accepted as separator too).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMacAddressError(s.to_owned());

        let mut bytes = [0u8; MAC_ADDRESS_SIZE];
        let mut parts = s.split([':', '-']);
        for byte in bytes.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 {
                return Err(invalid());
            }
            *byte = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self(bytes))
    }
}

/// Identity of an emulated network.
///
/// Owned by the session layer; only read here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NetworkInfo {
    /// MAC address of the host console.
    pub host_mac_address: MacAddress,
    /// Local wireless communication id of the application.
    pub wlan_comm_id: u32,
    /// Network instance id.
    pub id: u8,
    /// Network id chosen by the host.
    pub network_id: u32,
}

impl NetworkInfo {
    /// Create a network identity.
    pub fn new(host_mac_address: MacAddress, wlan_comm_id: u32, id: u8, network_id: u32) -> Self {
        Self {
            host_mac_address,
            wlan_comm_id,
            id,
            network_id,
        }
    }
}

/// A participant of a network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeInfo {
    /// Seed derived from the console's friend code.
    pub friend_code_seed: u64,
    /// Username, UTF-16, zero padded.
    pub username: [u16; USERNAME_LENGTH],
    /// Node id assigned by the host (1-based, 0 when unassigned).
    pub network_node_id: u16,
}

impl NodeInfo {
    /// Create a node entry from a textual username.
    ///
    /// Fails with [`FrameError::UsernameTooLong`] if the name needs more than
    /// [`USERNAME_LENGTH`] UTF-16 code units; names are never truncated.
    pub fn new(friend_code_seed: u64, username: &str, network_node_id: u16) -> FrameResult<Self> {
        Ok(Self {
            friend_code_seed,
            username: encode_username(username)?,
            network_node_id,
        })
    }

    /// Decode the username up to the first NUL.
    pub fn username_string(&self) -> String {
        let end = self
            .username
            .iter()
            .position(|&unit| unit == 0)
            .unwrap_or(USERNAME_LENGTH);
        String::from_utf16_lossy(&self.username[..end])
    }
}

/// Encode a username into the fixed-width UTF-16 field.
pub fn encode_username(username: &str) -> FrameResult<[u16; USERNAME_LENGTH]> {
    let length = username.encode_utf16().count();
    if length > USERNAME_LENGTH {
        return Err(FrameError::UsernameTooLong { length });
    }

    let mut field = [0u16; USERNAME_LENGTH];
    for (slot, unit) in field.iter_mut().zip(username.encode_utf16()) {
        *slot = unit;
    }
    Ok(field)
}
