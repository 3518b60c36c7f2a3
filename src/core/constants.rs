//! Protocol constants for the UDS link layer.
//!
//! These values are fixed by the hardware and MUST NOT be changed.

// =============================================================================
// LLC / SNAP
// =============================================================================

/// SNAP extension service access point (DSAP and SSAP).
pub const LLC_SAP_SNAP: u8 = 0xAA;

/// Unnumbered information PDU control byte.
pub const LLC_CONTROL_UI: u8 = 0x03;

/// LLC header size (DSAP + SSAP + control + OUI + EtherType).
pub const LLC_HEADER_SIZE: usize = 8;

/// EtherType of UDS SecureData frames.
pub const ETHER_TYPE_SECURE_DATA: u16 = 0x876D;

/// EtherType of EAPoL handshake frames.
pub const ETHER_TYPE_EAPOL: u16 = 0x888E;

// =============================================================================
// SECUREDATA
// =============================================================================

/// SecureData header size, including the two reserved bytes after `protocol_size`.
pub const SECURE_DATA_HEADER_SIZE: usize = 14;

/// Bytes of the SecureData header not counted in `securedata_size`.
pub const SECURE_DATA_CONTAINER_PREFIX: usize = 4;

/// Largest payload a SecureData header can describe.
pub const MAX_SECURE_DATA_PAYLOAD: usize = u16::MAX as usize - SECURE_DATA_HEADER_SIZE;

// =============================================================================
// EAPOL
// =============================================================================

/// First field of an EAPoL-Start packet.
pub const EAPOL_START_MAGIC: u16 = 0x0201;

/// First field of an EAPoL-Logoff packet.
pub const EAPOL_LOGOFF_MAGIC: u16 = 0x0202;

/// Value the hardware writes into the EAPoL-Start `unknown` field.
pub const EAPOL_START_UNKNOWN: u16 = 0x0001;

/// Maximum number of nodes in a UDS network.
pub const UDS_MAX_NODES: usize = 16;

/// Username length in UTF-16 code units.
pub const USERNAME_LENGTH: usize = 10;

/// Serialized node entry size.
pub const EAPOL_NODE_INFO_SIZE: usize = 0x28;

/// EAPoL-Start packet size (without the LLC header).
pub const EAPOL_START_PACKET_SIZE: usize = 0x30;

/// EAPoL-Logoff packet size (without the LLC header).
pub const EAPOL_LOGOFF_PACKET_SIZE: usize = 0x298;

// =============================================================================
// ADDRESSING
// =============================================================================

/// MAC address size.
pub const MAC_ADDRESS_SIZE: usize = 6;

/// ToDS bit of the frame control field.
pub const FRAME_CONTROL_TO_DS: u16 = 1 << 0;

/// FromDS bit of the frame control field.
pub const FRAME_CONTROL_FROM_DS: u16 = 1 << 1;

// =============================================================================
// CCMP
// =============================================================================

/// AES block size.
pub const AES_BLOCK_SIZE: usize = 16;

/// CCMP data key size (AES-128).
pub const CCMP_KEY_SIZE: usize = 16;

/// CCM nonce size (priority + transmitter address + packet number).
pub const CCMP_NONCE_SIZE: usize = 13;

/// CCM authentication tag size.
pub const CCMP_TAG_SIZE: usize = 8;

/// AAD size (FC + A1 + A2 + A3 + SC).
pub const CCMP_AAD_SIZE: usize = 22;

/// Packet number size inside the nonce.
pub const CCMP_PN_SIZE: usize = 6;

/// Frame control subfields covered by the MIC.
pub const AAD_FRAME_CONTROL_MASK: u16 = 0x8FC7;

/// MD5 digest size.
pub const MD5_DIGEST_SIZE: usize = 16;

/// Serialized crypto counter input (MAC + comm id + id + pad + network id).
pub const CRYPTO_CTR_INPUT_SIZE: usize = 16;

/// Hardware AES key slot holding the UDS data key.
pub const UDS_DATA_KEY_SLOT: u8 = 0x2D;
