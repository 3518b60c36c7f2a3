use proptest::prelude::*;
use uds_protocol::prelude::*;

fn arb_mac() -> impl Strategy<Value = MacAddress> {
    any::<[u8; 6]>().prop_map(MacAddress)
}

fn arb_node() -> impl Strategy<Value = NodeInfo> {
    (any::<u64>(), any::<[u16; USERNAME_LENGTH]>(), any::<u16>()).prop_map(
        |(friend_code_seed, username, network_node_id)| NodeInfo {
            friend_code_seed,
            username,
            network_node_id,
        },
    )
}

fn arb_data_size() -> impl Strategy<Value = usize> {
    prop_oneof![
        Just(0usize),
        Just(1usize),
        Just(1024usize),
        Just(MAX_SECURE_DATA_PAYLOAD - 1),
        0..=MAX_SECURE_DATA_PAYLOAD,
    ]
}

proptest! {
    #[test]
    fn secure_data_header_sizes(
        data_size in arb_data_size(),
        channel in any::<u8>(),
        dest in any::<u16>(),
        src in any::<u16>(),
        seq in any::<u16>(),
    ) {
        let mut frame = encode_llc_header(EtherType::SecureData).to_vec();
        let header = encode_secure_data_header(data_size, channel, dest, src, seq).unwrap();
        frame.extend_from_slice(&header);

        let header = parse_secure_data_header(&frame).unwrap();
        prop_assert_eq!(header.protocol_size as usize, data_size + SECURE_DATA_HEADER_SIZE);
        prop_assert_eq!(header.securedata_size, header.protocol_size - 4);
        prop_assert_eq!(header.actual_data_size(), data_size);
        prop_assert!(!header.is_management);
        prop_assert_eq!(header.data_channel, channel);
        prop_assert_eq!(header.dest_node_id, dest);
        prop_assert_eq!(header.src_node_id, src);
        prop_assert_eq!(header.sequence_number, seq);
    }

    #[test]
    fn data_frame_roundtrip(
        data in prop::collection::vec(any::<u8>(), 0..2048),
        channel in any::<u8>(),
        seq in any::<u16>(),
    ) {
        let frame = build_data_frame(&data, channel, 0xFFFF, 1, seq).unwrap();
        let (header, payload) = parse_data_frame(&frame).unwrap();
        prop_assert_eq!(payload, &data[..]);
        prop_assert_eq!(header.sequence_number, seq);
    }

    #[test]
    fn truncated_frames_never_panic(data in prop::collection::vec(any::<u8>(), 0..64)) {
        // Arbitrary input must yield a value or an error, never a panic
        let _ = get_frame_ether_type(&data);
        let _ = get_eapol_frame_type(&data);
        let _ = parse_secure_data_header(&data);
        let _ = parse_data_frame(&data);
        let _ = deserialize_node_info_from_frame(&data);
        let _ = parse_eapol_logoff_frame(&data);
    }

    #[test]
    fn logoff_frame_roundtrip(
        mac in arb_mac(),
        node_id in any::<u16>(),
        nodes in prop::collection::vec(arb_node(), UDS_MAX_NODES),
        max in 0..=UDS_MAX_NODES as u8,
        connected_seed in any::<u8>(),
    ) {
        let connected = if max == 0 { 0 } else { connected_seed % (max + 1) };

        let frame = build_eapol_logoff_frame(mac, node_id, &nodes, max, connected).unwrap();
        let packet = parse_eapol_logoff_frame(&frame).unwrap();

        prop_assert_eq!(packet.client_mac_address, mac);
        prop_assert_eq!(packet.assigned_node_id, node_id);
        prop_assert_eq!(packet.connected_nodes, connected);
        prop_assert_eq!(packet.max_nodes, max);
        prop_assert_eq!(packet.nodes.len(), max as usize);
        for (sent, received) in nodes.iter().zip(packet.nodes.iter()) {
            prop_assert_eq!(&deserialize_node_info(received), sent);
        }
    }

    #[test]
    fn start_frame_roundtrip(association_id in any::<u16>(), node in arb_node()) {
        let frame = build_eapol_start_frame(association_id, &node);
        prop_assert_eq!(get_eapol_frame_type(&frame).unwrap(), EAPOL_START_MAGIC);

        let received = deserialize_node_info_from_frame(&frame).unwrap();
        prop_assert_eq!(received.friend_code_seed, node.friend_code_seed);
        prop_assert_eq!(received.username, node.username);
    }

    #[test]
    fn aad_address_roles(
        sender in arb_mac(),
        receiver in arb_mac(),
        bssid in arb_mac(),
        high in any::<u16>(),
    ) {
        let base = high & !(FRAME_CONTROL_TO_DS | FRAME_CONTROL_FROM_DS);

        let from_ds = build_aad(&sender, &receiver, &bssid, base | FRAME_CONTROL_FROM_DS).unwrap();
        prop_assert_eq!(&from_ds[2..8], receiver.as_bytes());
        prop_assert_eq!(&from_ds[8..14], bssid.as_bytes());
        prop_assert_eq!(&from_ds[14..20], sender.as_bytes());

        let to_ds = build_aad(&sender, &receiver, &bssid, base | FRAME_CONTROL_TO_DS).unwrap();
        prop_assert_eq!(&to_ds[2..8], bssid.as_bytes());
        prop_assert_eq!(&to_ds[8..14], sender.as_bytes());
        prop_assert_eq!(&to_ds[14..20], receiver.as_bytes());

        prop_assert_eq!(
            build_aad(&sender, &receiver, &bssid, base),
            Err(CryptoError::InvalidFrameControl(base))
        );
        let both = base | FRAME_CONTROL_TO_DS | FRAME_CONTROL_FROM_DS;
        prop_assert_eq!(
            build_aad(&sender, &receiver, &bssid, both),
            Err(CryptoError::InvalidFrameControl(both))
        );
    }
}
