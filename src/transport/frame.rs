//! LLC/SNAP and SecureData framing.
//!
//! Every UDS frame starts with an 802.2 LLC header using the SNAP extension.
//! Data frames carry a SecureData header right after it:
//!
//! ```text
//! +------+------+------+----------+-----------+
//! | DSAP | SSAP | Ctrl | OUI      | EtherType |
//! | 0xAA | 0xAA | 0x03 | 00 00 00 | BE16      |
//! +------+------+------+----------+-----------+
//!
//! +---------------+--------+-----------------+------+---------+--------+---------+--------+
//! | protocol_size | rsvd   | securedata_size | mgmt | channel | seq    | dest    | src    |
//! | BE16          | 2 bytes| BE16            | u8   | u8      | BE16   | BE16    | BE16   |
//! +---------------+--------+-----------------+------+---------+--------+---------+--------+
//! ```

use tracing::trace;

use crate::core::{
    ETHER_TYPE_EAPOL, ETHER_TYPE_SECURE_DATA, FrameError, FrameResult, LLC_CONTROL_UI,
    LLC_HEADER_SIZE, LLC_SAP_SNAP, MAX_SECURE_DATA_PAYLOAD, SECURE_DATA_CONTAINER_PREFIX,
    SECURE_DATA_HEADER_SIZE,
};

/// Protocol discriminator carried in the LLC header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EtherType {
    /// UDS SecureData (application data).
    SecureData = ETHER_TYPE_SECURE_DATA,
    /// EAPoL (join/leave handshake).
    Eapol = ETHER_TYPE_EAPOL,
}

impl EtherType {
    /// Parse an EtherType from its wire value.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            ETHER_TYPE_SECURE_DATA => Some(Self::SecureData),
            ETHER_TYPE_EAPOL => Some(Self::Eapol),
            _ => None,
        }
    }

    /// Wire value.
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

/// SNAP-enabled 802.2 LLC header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlcHeader {
    /// Protocol of the payload that follows.
    pub protocol: EtherType,
}

impl LlcHeader {
    /// Create a header for `protocol`.
    pub fn new(protocol: EtherType) -> Self {
        Self { protocol }
    }

    /// Serialize header to bytes (8 bytes).
    pub fn to_bytes(&self) -> [u8; LLC_HEADER_SIZE] {
        let mut buf = [0u8; LLC_HEADER_SIZE];
        buf[0] = LLC_SAP_SNAP;
        buf[1] = LLC_SAP_SNAP;
        buf[2] = LLC_CONTROL_UI;
        // OUI (bytes 3-5) - zero
        buf[6..8].copy_from_slice(&self.protocol.as_u16().to_be_bytes());
        buf
    }

    /// Parse header from the start of `bytes`.
    ///
    /// Only the EtherType is interpreted; the SAP/control/OUI bytes are not
    /// validated, matching what the hardware accepts.
    pub fn from_bytes(bytes: &[u8]) -> FrameResult<Self> {
        ensure_len(bytes, LLC_HEADER_SIZE)?;

        let raw = u16::from_be_bytes([bytes[6], bytes[7]]);
        let protocol = EtherType::from_u16(raw).ok_or(FrameError::UnknownEtherType(raw))?;

        Ok(Self { protocol })
    }
}

/// UDS SecureData transport header.
///
/// `protocol_size` counts the header and the payload; `securedata_size`
/// excludes the first four bytes of the header, which behave like the header
/// of an outer container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecureDataHeader {
    /// Header + payload size.
    pub protocol_size: u16,
    /// `protocol_size - 4`.
    pub securedata_size: u16,
    /// Set on UDS management frames.
    pub is_management: bool,
    /// Data channel the payload belongs to.
    pub data_channel: u8,
    /// Per-sender sequence number.
    pub sequence_number: u16,
    /// Destination node id (0xFFFF broadcasts).
    pub dest_node_id: u16,
    /// Source node id.
    pub src_node_id: u16,
}

impl SecureDataHeader {
    /// Create the header for an application data payload of `data_size` bytes.
    ///
    /// Application frames are never management frames.
    pub fn new(
        data_size: usize,
        data_channel: u8,
        dest_node_id: u16,
        src_node_id: u16,
        sequence_number: u16,
    ) -> FrameResult<Self> {
        if data_size > MAX_SECURE_DATA_PAYLOAD {
            return Err(FrameError::PayloadTooLarge(data_size));
        }

        let protocol_size = (data_size + SECURE_DATA_HEADER_SIZE) as u16;
        Ok(Self {
            protocol_size,
            securedata_size: protocol_size - SECURE_DATA_CONTAINER_PREFIX as u16,
            is_management: false,
            data_channel,
            sequence_number,
            dest_node_id,
            src_node_id,
        })
    }

    /// Size of the payload described by this header.
    pub fn actual_data_size(&self) -> usize {
        (self.protocol_size as usize).saturating_sub(SECURE_DATA_HEADER_SIZE)
    }

    /// Serialize header to bytes (14 bytes).
    pub fn to_bytes(&self) -> [u8; SECURE_DATA_HEADER_SIZE] {
        let mut buf = [0u8; SECURE_DATA_HEADER_SIZE];
        buf[0..2].copy_from_slice(&self.protocol_size.to_be_bytes());
        // Reserved (bytes 2-3) - zero
        buf[4..6].copy_from_slice(&self.securedata_size.to_be_bytes());
        buf[6] = u8::from(self.is_management);
        buf[7] = self.data_channel;
        buf[8..10].copy_from_slice(&self.sequence_number.to_be_bytes());
        buf[10..12].copy_from_slice(&self.dest_node_id.to_be_bytes());
        buf[12..14].copy_from_slice(&self.src_node_id.to_be_bytes());
        buf
    }

    /// Parse header from the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> FrameResult<Self> {
        ensure_len(bytes, SECURE_DATA_HEADER_SIZE)?;

        Ok(Self {
            protocol_size: u16::from_be_bytes([bytes[0], bytes[1]]),
            securedata_size: u16::from_be_bytes([bytes[4], bytes[5]]),
            is_management: bytes[6] != 0,
            data_channel: bytes[7],
            sequence_number: u16::from_be_bytes([bytes[8], bytes[9]]),
            dest_node_id: u16::from_be_bytes([bytes[10], bytes[11]]),
            src_node_id: u16::from_be_bytes([bytes[12], bytes[13]]),
        })
    }
}

/// Generate a SNAP-enabled LLC header for `protocol`.
pub fn encode_llc_header(protocol: EtherType) -> [u8; LLC_HEADER_SIZE] {
    LlcHeader::new(protocol).to_bytes()
}

/// Generate a SecureData header for a payload of `data_size` bytes.
pub fn encode_secure_data_header(
    data_size: usize,
    channel: u8,
    dest_node_id: u16,
    src_node_id: u16,
    sequence_number: u16,
) -> FrameResult<[u8; SECURE_DATA_HEADER_SIZE]> {
    SecureDataHeader::new(data_size, channel, dest_node_id, src_node_id, sequence_number)
        .map(|header| header.to_bytes())
}

/// Build a plaintext data frame: LLC header, SecureData header, payload.
pub fn build_data_frame(
    data: &[u8],
    channel: u8,
    dest_node_id: u16,
    src_node_id: u16,
    sequence_number: u16,
) -> FrameResult<Vec<u8>> {
    let header = encode_secure_data_header(
        data.len(),
        channel,
        dest_node_id,
        src_node_id,
        sequence_number,
    )?;

    let mut frame = Vec::with_capacity(LLC_HEADER_SIZE + SECURE_DATA_HEADER_SIZE + data.len());
    frame.extend_from_slice(&encode_llc_header(EtherType::SecureData));
    frame.extend_from_slice(&header);
    frame.extend_from_slice(data);

    trace!(
        len = frame.len(),
        channel,
        dest_node_id,
        src_node_id,
        sequence_number,
        "built data frame"
    );
    Ok(frame)
}

/// Read the SecureData header that follows the LLC header of `frame`.
pub fn parse_secure_data_header(frame: &[u8]) -> FrameResult<SecureDataHeader> {
    ensure_len(frame, LLC_HEADER_SIZE + SECURE_DATA_HEADER_SIZE)?;
    SecureDataHeader::from_bytes(&frame[LLC_HEADER_SIZE..])
}

/// Split a SecureData frame into its header and payload.
///
/// The payload is bounded by `protocol_size`; trailing bytes are ignored.
pub fn parse_data_frame(frame: &[u8]) -> FrameResult<(SecureDataHeader, &[u8])> {
    let llc = LlcHeader::from_bytes(frame)?;
    if llc.protocol != EtherType::SecureData {
        return Err(FrameError::UnexpectedEtherType {
            expected: EtherType::SecureData.as_u16(),
            actual: llc.protocol.as_u16(),
        });
    }

    let header = parse_secure_data_header(frame)?;
    if (header.protocol_size as usize) < SECURE_DATA_HEADER_SIZE {
        return Err(FrameError::TooShort {
            expected: SECURE_DATA_HEADER_SIZE,
            actual: header.protocol_size as usize,
        });
    }

    let start = LLC_HEADER_SIZE + SECURE_DATA_HEADER_SIZE;
    let end = LLC_HEADER_SIZE + header.protocol_size as usize;
    ensure_len(frame, end)?;

    trace!(
        len = end - start,
        src_node_id = header.src_node_id,
        sequence_number = header.sequence_number,
        "parsed data frame"
    );
    Ok((header, &frame[start..end]))
}

/// Read the EtherType of a frame.
pub fn get_frame_ether_type(frame: &[u8]) -> FrameResult<EtherType> {
    LlcHeader::from_bytes(frame).map(|header| header.protocol)
}

pub(crate) fn ensure_len(bytes: &[u8], expected: usize) -> FrameResult<()> {
    if bytes.len() < expected {
        return Err(FrameError::TooShort {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}
