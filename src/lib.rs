//! # UDS Protocol
//!
//! Link layer of the console's local ad-hoc wireless networking (UDS),
//! reproduced byte-for-byte so that emulated consoles can talk to each other
//! and to real hardware. It provides:
//!
//! - **Framing**: LLC/SNAP demultiplexing, the SecureData transport header and
//!   the EAPoL join/leave handshake frames
//! - **CCMP**: AES-128-CCM protection of data frames with 802.11 AAD and nonce
//!   construction
//! - **Key derivation**: the vendor scheme turning a passphrase and network
//!   identity into the CCMP data key
//!
//! Sockets, node membership and sequence number bookkeeping belong to the
//! session layer using this crate.
//!
//! ## Feature Flags
//!
//! - `transport` (default): Framing (LLC/SNAP, SecureData, EAPoL)
//! - `crypto` (default): CCMP layer (AES-CCM, key derivation)
//!
//! ## Modules
//!
//! - [`core`]: Constants, error types, key provider trait and value types (always included)
//! - [`transport`]: Framing (requires `transport` feature)
//! - [`crypto`]: CCMP layer (requires `crypto` feature)
//!
//! ## Example Usage
//!
//! ```rust
//! use uds_protocol::prelude::*;
//!
//! let provider = StaticKeyProvider::new().with_key(KeySlot::UDS_DATA, [0x5A; 16]);
//! let host: MacAddress = "02:00:00:00:00:01".parse().unwrap();
//! let network = NetworkInfo::new(host, 0x0004_1000, 1, 0x1234_5678);
//! let key = derive_data_key(b"passphrase", &network, &provider).unwrap();
//!
//! let client: MacAddress = "02:00:00:00:00:02".parse().unwrap();
//! let frame = build_data_frame(b"hello", 1, 0xFFFF, 2, 7).unwrap();
//! let sealed = encrypt(&frame, &key, &client, &host, &host, 7, FRAME_CONTROL_TO_DS).unwrap();
//!
//! let opened = decrypt(&sealed, &key, &client, &host, &host, 7, FRAME_CONTROL_TO_DS).unwrap();
//! let (header, data) = parse_data_frame(&opened).unwrap();
//! assert_eq!(header.src_node_id, 2);
//! assert_eq!(data, b"hello");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

// Framing (feature-gated)
#[cfg(feature = "transport")]
#[cfg_attr(docsrs, doc(cfg(feature = "transport")))]
pub mod transport;

// CCMP layer (feature-gated)
#[cfg(feature = "crypto")]
#[cfg_attr(docsrs, doc(cfg(feature = "crypto")))]
pub mod crypto;

/// Prelude module for convenient imports.
pub mod prelude {
    // Core constants, errors and types
    pub use crate::core::*;

    // Framing (when enabled)
    #[cfg(feature = "transport")]
    pub use crate::transport::*;

    // CCMP (when enabled)
    #[cfg(feature = "crypto")]
    pub use crate::crypto::*;
}

// Re-export commonly used items at crate root
pub use crate::core::{
    CryptoError, FrameError, KeyProvider, KeySlot, MacAddress, NetworkInfo, NodeInfo, UdsError,
};

#[cfg(feature = "transport")]
pub use crate::transport::{EtherType, SecureDataHeader};

#[cfg(feature = "crypto")]
pub use crate::crypto::{CcmpKey, FrameControl};
