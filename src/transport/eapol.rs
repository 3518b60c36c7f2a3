//! EAPoL handshake frames.
//!
//! Clients announce themselves to the host with an EAPoL-Start frame; the host
//! answers with an EAPoL-Logoff frame carrying the assigned node id and the
//! full node table. Both packets follow an LLC header with EtherType EAPoL.
//!
//! Node entry (0x28 bytes):
//! ```text
//! +------------------+----------------+--------+-----------------+--------+
//! | friend_code_seed | username       | rsvd   | network_node_id | rsvd   |
//! | BE64             | 10 x BE16      | 4      | BE16            | 6      |
//! +------------------+----------------+--------+-----------------+--------+
//! ```

use tracing::trace;

use super::frame::{EtherType, encode_llc_header, ensure_len};
use crate::core::{
    EAPOL_LOGOFF_MAGIC, EAPOL_LOGOFF_PACKET_SIZE, EAPOL_NODE_INFO_SIZE, EAPOL_START_MAGIC,
    EAPOL_START_PACKET_SIZE, EAPOL_START_UNKNOWN, FrameError, FrameResult, LLC_HEADER_SIZE,
    MAC_ADDRESS_SIZE, MacAddress, NodeInfo, UDS_MAX_NODES, USERNAME_LENGTH,
};

/// Offset of the node table inside an EAPoL-Logoff packet.
const LOGOFF_NODES_OFFSET: usize = 24;

/// Offset of the node entry inside an EAPoL-Start packet.
const START_NODE_OFFSET: usize = 8;

/// Node entry as carried inside EAPoL packets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EapolNodeInfo {
    /// Seed derived from the console's friend code.
    pub friend_code_seed: u64,
    /// Username, UTF-16, zero padded.
    pub username: [u16; USERNAME_LENGTH],
    /// Node id assigned by the host.
    pub network_node_id: u16,
}

impl EapolNodeInfo {
    /// Serialize entry to bytes (0x28 bytes).
    pub fn to_bytes(&self) -> [u8; EAPOL_NODE_INFO_SIZE] {
        let mut buf = [0u8; EAPOL_NODE_INFO_SIZE];
        buf[0..8].copy_from_slice(&self.friend_code_seed.to_be_bytes());
        for (i, unit) in self.username.iter().enumerate() {
            let offset = 8 + i * 2;
            buf[offset..offset + 2].copy_from_slice(&unit.to_be_bytes());
        }
        // Reserved (bytes 28-31) - zero
        buf[32..34].copy_from_slice(&self.network_node_id.to_be_bytes());
        // Reserved (bytes 34-39) - zero
        buf
    }

    /// Parse entry from the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> FrameResult<Self> {
        ensure_len(bytes, EAPOL_NODE_INFO_SIZE)?;

        let mut seed = [0u8; 8];
        seed.copy_from_slice(&bytes[0..8]);

        let mut username = [0u16; USERNAME_LENGTH];
        for (i, unit) in username.iter_mut().enumerate() {
            let offset = 8 + i * 2;
            *unit = u16::from_be_bytes([bytes[offset], bytes[offset + 1]]);
        }

        Ok(Self {
            friend_code_seed: u64::from_be_bytes(seed),
            username,
            network_node_id: u16::from_be_bytes([bytes[32], bytes[33]]),
        })
    }
}

impl From<&NodeInfo> for EapolNodeInfo {
    fn from(node: &NodeInfo) -> Self {
        Self {
            friend_code_seed: node.friend_code_seed,
            username: node.username,
            network_node_id: node.network_node_id,
        }
    }
}

/// EAPoL-Start packet (client -> host).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EapolStartPacket {
    /// Association id given by the host during 802.11 association.
    pub association_id: u16,
    /// The joining node.
    pub node: EapolNodeInfo,
}

impl EapolStartPacket {
    /// Serialize packet to bytes (0x30 bytes).
    pub fn to_bytes(&self) -> [u8; EAPOL_START_PACKET_SIZE] {
        let mut buf = [0u8; EAPOL_START_PACKET_SIZE];
        buf[0..2].copy_from_slice(&EAPOL_START_MAGIC.to_be_bytes());
        buf[2..4].copy_from_slice(&self.association_id.to_be_bytes());
        buf[4..6].copy_from_slice(&EAPOL_START_UNKNOWN.to_be_bytes());
        // Reserved (bytes 6-7) - zero
        buf[START_NODE_OFFSET..].copy_from_slice(&self.node.to_bytes());
        buf
    }

    /// Parse packet from the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> FrameResult<Self> {
        ensure_len(bytes, EAPOL_START_PACKET_SIZE)?;
        expect_magic(bytes, EAPOL_START_MAGIC)?;

        Ok(Self {
            association_id: u16::from_be_bytes([bytes[2], bytes[3]]),
            node: EapolNodeInfo::from_bytes(&bytes[START_NODE_OFFSET..])?,
        })
    }
}

/// EAPoL-Logoff packet (host -> client).
///
/// `nodes` holds exactly `max_nodes` entries; the remaining slots of the
/// fixed [`UDS_MAX_NODES`] table are zero on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EapolLogoffPacket {
    /// Node id the host assigned to the receiving client.
    pub assigned_node_id: u16,
    /// MAC address of the receiving client.
    pub client_mac_address: MacAddress,
    /// Number of nodes currently connected.
    pub connected_nodes: u8,
    /// Node capacity of the network.
    pub max_nodes: u8,
    /// Node table.
    pub nodes: Vec<EapolNodeInfo>,
}

impl EapolLogoffPacket {
    /// Serialize packet to bytes (0x298 bytes).
    pub fn to_bytes(&self) -> FrameResult<Vec<u8>> {
        check_node_counts(self.connected_nodes, self.max_nodes)?;
        if self.nodes.len() < self.max_nodes as usize {
            return Err(FrameError::TooShort {
                expected: self.max_nodes as usize,
                actual: self.nodes.len(),
            });
        }

        let mut buf = vec![0u8; EAPOL_LOGOFF_PACKET_SIZE];
        buf[0..2].copy_from_slice(&EAPOL_LOGOFF_MAGIC.to_be_bytes());
        // Reserved (bytes 2-3) - zero
        buf[4..6].copy_from_slice(&self.assigned_node_id.to_be_bytes());
        buf[6..12].copy_from_slice(self.client_mac_address.as_bytes());
        // Reserved (bytes 12-17) - zero
        buf[18] = self.connected_nodes;
        buf[19] = self.max_nodes;
        // Reserved (bytes 20-23) - zero
        for (i, node) in self.nodes.iter().take(self.max_nodes as usize).enumerate() {
            let offset = LOGOFF_NODES_OFFSET + i * EAPOL_NODE_INFO_SIZE;
            buf[offset..offset + EAPOL_NODE_INFO_SIZE].copy_from_slice(&node.to_bytes());
        }
        Ok(buf)
    }

    /// Parse packet from the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> FrameResult<Self> {
        ensure_len(bytes, EAPOL_LOGOFF_PACKET_SIZE)?;
        expect_magic(bytes, EAPOL_LOGOFF_MAGIC)?;

        let connected_nodes = bytes[18];
        let max_nodes = bytes[19];
        check_node_counts(connected_nodes, max_nodes)?;

        let mut mac = [0u8; MAC_ADDRESS_SIZE];
        mac.copy_from_slice(&bytes[6..12]);

        let nodes = (0..max_nodes as usize)
            .map(|i| {
                let offset = LOGOFF_NODES_OFFSET + i * EAPOL_NODE_INFO_SIZE;
                EapolNodeInfo::from_bytes(&bytes[offset..])
            })
            .collect::<FrameResult<Vec<_>>>()?;

        Ok(Self {
            assigned_node_id: u16::from_be_bytes([bytes[4], bytes[5]]),
            client_mac_address: MacAddress(mac),
            connected_nodes,
            max_nodes,
            nodes,
        })
    }
}

fn expect_magic(bytes: &[u8], expected: u16) -> FrameResult<()> {
    let actual = u16::from_be_bytes([bytes[0], bytes[1]]);
    if actual != expected {
        return Err(FrameError::UnexpectedMagic { expected, actual });
    }
    Ok(())
}

fn check_node_counts(connected: u8, max: u8) -> FrameResult<()> {
    if connected > max || max as usize > UDS_MAX_NODES {
        return Err(FrameError::NodeCountOutOfRange { connected, max });
    }
    Ok(())
}

/// Build an EAPoL-Start frame announcing `node_info`.
///
/// Only the friend code seed and username are sent; the node id and reserved
/// fields are zero.
pub fn build_eapol_start_frame(association_id: u16, node_info: &NodeInfo) -> Vec<u8> {
    let packet = EapolStartPacket {
        association_id,
        node: EapolNodeInfo {
            friend_code_seed: node_info.friend_code_seed,
            username: node_info.username,
            network_node_id: 0,
        },
    };

    let mut frame = Vec::with_capacity(LLC_HEADER_SIZE + EAPOL_START_PACKET_SIZE);
    frame.extend_from_slice(&encode_llc_header(EtherType::Eapol));
    frame.extend_from_slice(&packet.to_bytes());

    trace!(association_id, "built eapol-start frame");
    frame
}

/// Build an EAPoL-Logoff frame for the client `mac_address`.
///
/// `nodes` must hold at least `max_nodes` entries and
/// `total_nodes <= max_nodes <= UDS_MAX_NODES`.
pub fn build_eapol_logoff_frame(
    mac_address: MacAddress,
    network_node_id: u16,
    nodes: &[NodeInfo],
    max_nodes: u8,
    total_nodes: u8,
) -> FrameResult<Vec<u8>> {
    check_node_counts(total_nodes, max_nodes)?;
    if nodes.len() < max_nodes as usize {
        return Err(FrameError::TooShort {
            expected: max_nodes as usize,
            actual: nodes.len(),
        });
    }

    let packet = EapolLogoffPacket {
        assigned_node_id: network_node_id,
        client_mac_address: mac_address,
        connected_nodes: total_nodes,
        max_nodes,
        nodes: nodes[..max_nodes as usize]
            .iter()
            .map(EapolNodeInfo::from)
            .collect(),
    };

    let mut frame = Vec::with_capacity(LLC_HEADER_SIZE + EAPOL_LOGOFF_PACKET_SIZE);
    frame.extend_from_slice(&encode_llc_header(EtherType::Eapol));
    frame.extend_from_slice(&packet.to_bytes()?);

    trace!(%mac_address, network_node_id, total_nodes, max_nodes, "built eapol-logoff frame");
    Ok(frame)
}

/// Read the EAPoL packet type (its magic) of an EAPoL frame.
pub fn get_eapol_frame_type(frame: &[u8]) -> FrameResult<u16> {
    ensure_len(frame, LLC_HEADER_SIZE + 2)?;
    Ok(u16::from_be_bytes([
        frame[LLC_HEADER_SIZE],
        frame[LLC_HEADER_SIZE + 1],
    ]))
}

/// Parse the EAPoL-Logoff packet of a frame.
pub fn parse_eapol_logoff_frame(frame: &[u8]) -> FrameResult<EapolLogoffPacket> {
    ensure_len(frame, LLC_HEADER_SIZE + EAPOL_LOGOFF_PACKET_SIZE)?;
    EapolLogoffPacket::from_bytes(&frame[LLC_HEADER_SIZE..])
}

/// Extract the announcing node from an EAPoL-Start frame.
///
/// The node id is not taken from the frame; it is assigned by the host.
pub fn deserialize_node_info_from_frame(frame: &[u8]) -> FrameResult<NodeInfo> {
    ensure_len(frame, LLC_HEADER_SIZE + EAPOL_START_PACKET_SIZE)?;
    let packet = EapolStartPacket::from_bytes(&frame[LLC_HEADER_SIZE..])?;

    Ok(NodeInfo {
        friend_code_seed: packet.node.friend_code_seed,
        username: packet.node.username,
        network_node_id: 0,
    })
}

/// Convert a node table entry into a [`NodeInfo`].
pub fn deserialize_node_info(node: &EapolNodeInfo) -> NodeInfo {
    NodeInfo {
        friend_code_seed: node.friend_code_seed,
        username: node.username,
        network_node_id: node.network_node_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::get_frame_ether_type;

    fn node(seed: u64, name: &str, id: u16) -> NodeInfo {
        NodeInfo::new(seed, name, id).unwrap()
    }

    #[test]
    fn test_node_info_layout() {
        let entry = EapolNodeInfo::from(&node(0x0102_0304_0506_0708, "AB", 3));
        let bytes = entry.to_bytes();

        assert_eq!(&bytes[0..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&bytes[8..12], &[0x00, 0x41, 0x00, 0x42]);
        assert_eq!(&bytes[12..32], &[0u8; 20]);
        assert_eq!(&bytes[32..34], &[0x00, 0x03]);
        assert_eq!(&bytes[34..40], &[0u8; 6]);

        assert_eq!(EapolNodeInfo::from_bytes(&bytes), Ok(entry));
    }

    #[test]
    fn test_start_frame_layout() {
        let frame = build_eapol_start_frame(0x1234, &node(0xAABB, "Mii", 7));

        assert_eq!(frame.len(), LLC_HEADER_SIZE + EAPOL_START_PACKET_SIZE);
        assert_eq!(get_frame_ether_type(&frame), Ok(EtherType::Eapol));
        assert_eq!(get_eapol_frame_type(&frame), Ok(EAPOL_START_MAGIC));
        assert_eq!(
            hex::encode(&frame[LLC_HEADER_SIZE..LLC_HEADER_SIZE + 8]),
            "0201123400010000"
        );
        // Node id is never sent in a start frame
        let node_bytes = &frame[LLC_HEADER_SIZE + START_NODE_OFFSET..];
        assert_eq!(&node_bytes[32..34], &[0, 0]);
    }

    #[test]
    fn test_start_frame_node_roundtrip() {
        let sent = node(0xDEAD_BEEF_0000_0001, "Player", 5);
        let frame = build_eapol_start_frame(1, &sent);

        let received = deserialize_node_info_from_frame(&frame).unwrap();
        assert_eq!(received.friend_code_seed, sent.friend_code_seed);
        assert_eq!(received.username_string(), "Player");
        assert_eq!(received.network_node_id, 0);
    }

    #[test]
    fn test_logoff_frame_roundtrip() {
        let nodes = [
            node(1, "Host", 1),
            node(2, "Guest", 2),
            NodeInfo::default(),
            NodeInfo::default(),
        ];
        let mac = MacAddress([0x02, 0x11, 0x22, 0x33, 0x44, 0x55]);

        let frame = build_eapol_logoff_frame(mac, 2, &nodes, 4, 2).unwrap();
        assert_eq!(frame.len(), LLC_HEADER_SIZE + EAPOL_LOGOFF_PACKET_SIZE);
        assert_eq!(get_eapol_frame_type(&frame), Ok(EAPOL_LOGOFF_MAGIC));

        let packet = parse_eapol_logoff_frame(&frame).unwrap();
        assert_eq!(packet.assigned_node_id, 2);
        assert_eq!(packet.client_mac_address, mac);
        assert_eq!(packet.connected_nodes, 2);
        assert_eq!(packet.max_nodes, 4);
        assert_eq!(packet.nodes.len(), 4);

        let guest = deserialize_node_info(&packet.nodes[1]);
        assert_eq!(guest, nodes[1]);
    }

    #[test]
    fn test_logoff_unused_slots_zero() {
        let nodes = [node(1, "Host", 1), node(2, "Guest", 2)];
        let frame = build_eapol_logoff_frame(MacAddress::default(), 1, &nodes, 1, 1).unwrap();

        let table = &frame[LLC_HEADER_SIZE + LOGOFF_NODES_OFFSET + EAPOL_NODE_INFO_SIZE..];
        assert!(table.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_logoff_node_list_too_short() {
        let nodes = [node(1, "Host", 1)];
        assert_eq!(
            build_eapol_logoff_frame(MacAddress::default(), 1, &nodes, 2, 1),
            Err(FrameError::TooShort {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_logoff_node_counts() {
        let nodes = vec![NodeInfo::default(); 17];
        assert_eq!(
            build_eapol_logoff_frame(MacAddress::default(), 1, &nodes, 2, 3),
            Err(FrameError::NodeCountOutOfRange {
                connected: 3,
                max: 2
            })
        );
        assert_eq!(
            build_eapol_logoff_frame(MacAddress::default(), 1, &nodes, 17, 1),
            Err(FrameError::NodeCountOutOfRange {
                connected: 1,
                max: 17
            })
        );
        assert!(build_eapol_logoff_frame(MacAddress::default(), 1, &nodes, 16, 16).is_ok());
    }

    #[test]
    fn test_parse_logoff_rejects_bad_counts() {
        let nodes = [NodeInfo::default()];
        let mut tampered =
            build_eapol_logoff_frame(MacAddress::default(), 1, &nodes, 1, 1).unwrap();
        tampered[LLC_HEADER_SIZE + 18] = 9;
        assert_eq!(
            parse_eapol_logoff_frame(&tampered),
            Err(FrameError::NodeCountOutOfRange {
                connected: 9,
                max: 1
            })
        );
    }

    #[test]
    fn test_parse_wrong_magic() {
        let mut padded = build_eapol_start_frame(1, &NodeInfo::default());
        padded.resize(LLC_HEADER_SIZE + EAPOL_LOGOFF_PACKET_SIZE, 0);
        assert_eq!(
            parse_eapol_logoff_frame(&padded),
            Err(FrameError::UnexpectedMagic {
                expected: EAPOL_LOGOFF_MAGIC,
                actual: EAPOL_START_MAGIC
            })
        );
    }

    #[test]
    fn test_parse_too_short() {
        let frame = build_eapol_start_frame(1, &NodeInfo::default());
        assert!(matches!(
            deserialize_node_info_from_frame(&frame[..frame.len() - 1]),
            Err(FrameError::TooShort { .. })
        ));
        assert!(matches!(
            parse_eapol_logoff_frame(&frame),
            Err(FrameError::TooShort { .. })
        ));
        assert!(matches!(
            get_eapol_frame_type(&frame[..LLC_HEADER_SIZE + 1]),
            Err(FrameError::TooShort { .. })
        ));
    }
}
