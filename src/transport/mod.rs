//! UDS Protocol - Link Layer Framing
//!
//! This module builds and parses the plaintext frames exchanged between
//! consoles in a UDS network:
//!
//! - **LLC/SNAP header**: [`LlcHeader`], demultiplexing by [`EtherType`]
//! - **SecureData header**: [`SecureDataHeader`] in front of application data
//! - **EAPoL handshake**: [`EapolStartPacket`] and [`EapolLogoffPacket`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Session / Service Layer         │
//! ├─────────────────────────────────────────┤
//! │         Framing                         │  ← This module
//! │   LLC/SNAP, SecureData, EAPoL           │
//! ├─────────────────────────────────────────┤
//! │         CCMP (crypto)                   │
//! ├─────────────────────────────────────────┤
//! │         802.11 data frame               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! All multi-byte fields are big-endian and every structure is packed
//! field-by-field at fixed offsets; parsers check the length before reading.

mod eapol;
mod frame;

pub use eapol::*;
pub use frame::{
    EtherType, LlcHeader, SecureDataHeader, build_data_frame, encode_llc_header,
    encode_secure_data_header, get_frame_ether_type, parse_data_frame, parse_secure_data_header,
};
