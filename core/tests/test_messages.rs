// Record-level decoding:
//
// * bit-exact field placement for the state record
// * address formatting from 16-byte pf_addr unions
// * NAT detection, protocol names, textual summaries
// * truncation of every record type

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use pfsync_core::messages::{
        ClearMessage, DeleteCompressedMessage, InsertAckMessage, Message, StateKey, StateMessage,
        StatePeer, StateScrub, UpdateCompressedMessage, UpdateRequestMessage, WireRecord,
    };
    use pfsync_core::types::DecodeError;

    fn key(dst: [u8; 4], dport: u16, src: [u8; 4], sport: u16) -> StateKey {
        StateKey::new([Ipv4Addr::from(dst), Ipv4Addr::from(src)], [dport, sport])
    }

    fn sample_state(nat: bool) -> StateMessage {
        let wire = key([10, 0, 0, 2], 80, [192, 168, 1, 10], 51000);
        let stack = if nat {
            key([10, 0, 0, 2], 80, [10, 1, 1, 5], 40000)
        } else {
            wire
        };
        StateMessage {
            id: 0x0102_0304_0506_0708,
            creator: 0xDEAD_BEEF,
            interface: b"em0".to_vec(),
            key: [wire, stack],
            src: StatePeer { seqlo: 1000, seqhi: 2000, max_win: 512, ..Default::default() },
            dst: StatePeer {
                scrub: StateScrub { flags: 1, ttl: 64, scrub_flag: 0, ts_mod: 9 },
                ..Default::default()
            },
            rt_addr: Ipv4Addr::UNSPECIFIED,
            rule: 3,
            anchor: u32::MAX,
            nat_rule: u32::MAX,
            creation: 120,
            expire: 86400,
            packets: [[1, 2], [3, 4]],
            bytes: [[10, 20], [30, 40]],
            af: 2,
            protocol: 6,
            direction: 1,
            log: 0,
            state_flags: 0,
            timeout: 4,
            sync_flags: 0,
            updates: 0,
        }
    }

    fn encoded<M: WireRecord>(msg: &M) -> Vec<u8> {
        let mut out = Vec::new();
        msg.encode(&mut out).unwrap();
        out
    }

// # 1. Address formatting

    #[test]
    fn pf_addr_uses_first_four_bytes_only() {
        let mut buf = vec![0u8; StateKey::SIZE];
        buf[0..4].copy_from_slice(&[0x0A, 0x00, 0x00, 0x01]);
        buf[4..16].copy_from_slice(&[0xFF; 12]);
        buf[16..20].copy_from_slice(&[172, 16, 0, 9]);
        buf[32..34].copy_from_slice(&443u16.to_be_bytes());
        buf[34..36].copy_from_slice(&1234u16.to_be_bytes());

        let (k, rest) = StateKey::decode(&buf).unwrap();
        assert_eq!(k.addr[0].to_string(), "10.0.0.1");
        assert_eq!(k.addr[1].to_string(), "172.16.0.9");
        assert_eq!(k.port, [443, 1234]);
        assert!(rest.is_empty());
    }

// # 2. State record: exact byte placement

    #[test]
    fn state_fields_land_at_kernel_offsets() {
        let mut buf = vec![0u8; StateMessage::SIZE];
        buf[0..8].copy_from_slice(&0x0102_0304_0506_0708u64.to_be_bytes());
        buf[8..11].copy_from_slice(b"em0");
        buf[24..28].copy_from_slice(&[10, 0, 0, 2]); // key[0].addr[0]
        buf[40..44].copy_from_slice(&[192, 168, 1, 10]); // key[0].addr[1]
        buf[56..58].copy_from_slice(&80u16.to_be_bytes());
        buf[58..60].copy_from_slice(&51000u16.to_be_bytes());
        buf[76..80].copy_from_slice(&[192, 168, 1, 10]); // key[1].addr[1]
        buf[104..108].copy_from_slice(&777u32.to_be_bytes()); // src.seqlo
        buf[176..180].copy_from_slice(&5u32.to_be_bytes()); // rule
        buf[188..192].copy_from_slice(&60u32.to_be_bytes()); // creation
        buf[192..196].copy_from_slice(&90u32.to_be_bytes()); // expire
        buf[200..204].copy_from_slice(&11u32.to_be_bytes()); // packets[0][1]
        buf[224..228].copy_from_slice(&99u32.to_be_bytes()); // bytes[1][1]
        buf[228..232].copy_from_slice(&0xCAFEu32.to_be_bytes()); // creatorid
        buf[233] = 17; // proto
        buf[234] = 1; // direction
        buf[235] = 0xEE; // __spare
        buf[237] = 1; // log
        buf[239] = 7; // timeout

        let (s, rest) = StateMessage::decode(&buf).unwrap();
        assert!(rest.is_empty());
        assert_eq!(s.id, 0x0102_0304_0506_0708);
        assert_eq!(s.interface, b"em0");
        assert_eq!(s.key[0].addr, [Ipv4Addr::new(10, 0, 0, 2), Ipv4Addr::new(192, 168, 1, 10)]);
        assert_eq!(s.key[0].port, [80, 51000]);
        assert_eq!(s.src.seqlo, 777);
        assert_eq!(s.rule, 5);
        assert_eq!(s.creation, 60);
        assert_eq!(s.expire, 90);
        assert_eq!(s.packets, [[0, 11], [0, 0]]);
        assert_eq!(s.bytes, [[0, 0], [0, 99]]);
        assert_eq!(s.creator, 0xCAFE);
        assert_eq!(s.protocol, 17);
        assert_eq!(s.direction, 1);
        assert_eq!(s.log, 1);
        assert_eq!(s.timeout, 7);
        assert!(!s.is_nat());
    }

    #[test]
    fn state_encode_matches_decode_layout() {
        let s = sample_state(true);
        let wire = encoded(&s);
        assert_eq!(wire.len(), StateMessage::SIZE);
        assert_eq!(&wire[228..232], &0xDEAD_BEEFu32.to_be_bytes());

        let (back, rest) = StateMessage::decode(&wire).unwrap();
        assert!(rest.is_empty());
        assert_eq!(back, s);
    }

    #[test]
    fn interface_is_cut_at_first_nul() {
        let mut wire = encoded(&sample_state(false));
        wire[8..24].copy_from_slice(b"vlan12\0garbage!!");
        let (s, _) = StateMessage::decode(&wire).unwrap();
        assert_eq!(s.interface, b"vlan12");
    }

// # 3. NAT and protocol

    #[test]
    fn nat_detected_when_stack_source_differs() {
        assert!(sample_state(true).is_nat());
        assert!(!sample_state(false).is_nat());
    }

    #[test]
    fn nat_ignores_destination_side() {
        let mut s = sample_state(false);
        s.key[1].addr[0] = Ipv4Addr::new(8, 8, 8, 8);
        assert!(!s.is_nat());
    }

    #[test]
    fn protocol_names() {
        let mut s = sample_state(false);
        for (proto, name) in [(6, "TCP"), (17, "UDP"), (1, "ICMP"), (112, "VRRP"), (250, "250")] {
            s.protocol = proto;
            assert_eq!(s.protocol_name(), name);
        }
    }

// # 4. Summaries

    #[test]
    fn non_nat_summary_uses_direction_arrow() {
        let mut s = sample_state(false);
        assert_eq!(
            s.to_string(),
            "0x102030405060708 (created by 0xdeadbeef) - em0 TCP 192.168.1.10:51000 -> 10.0.0.2:80"
        );
        s.direction = 0;
        assert!(s.to_string().ends_with("192.168.1.10:51000 <- 10.0.0.2:80"));
    }

    #[test]
    fn nat_summary_shows_private_endpoint() {
        let s = sample_state(true);
        assert!(s
            .to_string()
            .ends_with("TCP 192.168.1.10:51000 (10.1.1.5:40000) -> 10.0.0.2:80"));
    }

    #[test]
    fn compact_summaries() {
        assert_eq!(
            DeleteCompressedMessage::new(0x10, 0x2).to_string(),
            "Delete state 0x10 (created by 0x2)"
        );
        assert_eq!(
            InsertAckMessage::new(0x10, 0x2).to_string(),
            "Ack of inserted state 0x10 (created by 0x2)"
        );
        assert_eq!(
            ClearMessage::new(&b"pfsync0"[..], 42).to_string(),
            "Deleted all states on pfsync0 (created by 0x2a)"
        );
    }

// # 5. Small records

    #[test]
    fn id_creator_records_share_shape_but_not_type() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0xAABB_CCDD_0011_2233u64.to_be_bytes());
        buf.extend_from_slice(&0x0102_0304u32.to_be_bytes());
        buf.push(0x55);

        let (d, rest) = DeleteCompressedMessage::decode(&buf).unwrap();
        assert_eq!(d, DeleteCompressedMessage::new(0xAABB_CCDD_0011_2233, 0x0102_0304));
        assert_eq!(rest, &[0x55]);

        let (a, _) = InsertAckMessage::decode(&buf).unwrap();
        let (r, _) = UpdateRequestMessage::decode(&buf).unwrap();
        assert_eq!((a.id, a.creator), (d.id, d.creator));
        assert_eq!((r.id, r.creator), (d.id, d.creator));
    }

    #[test]
    fn clear_decodes_interface_and_creator() {
        let mut buf = vec![0u8; ClearMessage::SIZE];
        buf[0..4].copy_from_slice(b"em1\0");
        buf[16..20].copy_from_slice(&9u32.to_be_bytes());
        let (c, rest) = ClearMessage::decode(&buf).unwrap();
        assert_eq!(c, ClearMessage::new(&b"em1"[..], 9));
        assert_eq!(c.interface.len(), 16);
        assert_eq!(c.interface_name(), b"em1");
        assert!(rest.is_empty());
    }

    #[test]
    fn clear_keeps_every_ifname_byte() {
        let mut buf = vec![0u8; ClearMessage::SIZE];
        buf[0..16].copy_from_slice(b"em1\0\0xyz_junk!!!");
        buf[16..20].copy_from_slice(&3u32.to_be_bytes());

        let (c, _) = ClearMessage::decode(&buf).unwrap();
        assert_eq!(c.interface, b"em1\0\0xyz_junk!!!");
        assert_eq!(c.interface_name(), b"em1");
        assert_eq!(c.to_string(), "Deleted all states on em1 (created by 0x3)");
        assert_eq!(encoded(&c), buf);
    }

    #[test]
    fn update_compressed_keeps_peers() {
        let msg = UpdateCompressedMessage {
            id: 77,
            creator: 5,
            expire: 30,
            timeout: 2,
            src: StatePeer { seqlo: 1, seqhi: 2, seqdiff: 3, mss: 1460, state: 4, wscale: 7, ..Default::default() },
            dst: StatePeer { max_win: 65535, ..Default::default() },
        };
        let wire = encoded(&msg);
        assert_eq!(wire.len(), 84);
        assert_eq!(&wire[72..76], &5u32.to_be_bytes());
        assert_eq!(wire[80], 2);
        assert_eq!(&wire[81..84], &[0, 0, 0]);

        let (back, _) = UpdateCompressedMessage::decode(&wire).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn oversized_interface_is_rejected_not_cut() {
        let long = &b"interface_name_longer_than_16"[..];
        let mut out = Vec::new();

        let err = ClearMessage::new(long, 1).encode(&mut out).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Oversize { layout: "pfsync_clr", field: "ifname", width: 16, have: long.len() }
        );

        let mut s = sample_state(false);
        s.interface = long.to_vec();
        assert!(matches!(
            s.encode(&mut out),
            Err(DecodeError::Oversize { layout: "pfsync_state_1301", field: "ifname", .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn sixteen_byte_interface_fits_exactly() {
        let name = &b"abcdefghijklmnop"[..];
        let c = ClearMessage::new(name, 1);
        let (back, _) = ClearMessage::decode(&encoded(&c)).unwrap();
        assert_eq!(back, c);
        assert_eq!(back.interface_name(), name);
    }

// # 6. Truncation, one byte short for every record

    fn assert_truncated<M: WireRecord + std::fmt::Debug>() {
        let buf = vec![0u8; M::SIZE - 1];
        match M::decode(&buf) {
            Err(DecodeError::Truncated { need, have, .. }) => {
                assert_eq!(need, M::SIZE);
                assert_eq!(have, M::SIZE - 1);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn every_record_rejects_one_byte_short() {
        assert_truncated::<StateKey>();
        assert_truncated::<StatePeer>();
        assert_truncated::<StateMessage>();
        assert_truncated::<ClearMessage>();
        assert_truncated::<DeleteCompressedMessage>();
        assert_truncated::<InsertAckMessage>();
        assert_truncated::<UpdateRequestMessage>();
        assert_truncated::<UpdateCompressedMessage>();
    }

// # 7. Message wrapper

    #[test]
    fn message_wrapper_exposes_ids() {
        let m: Message = sample_state(false).into();
        assert_eq!(m.state_id(), Some(0x0102_0304_0506_0708));
        assert_eq!(m.creator(), 0xDEAD_BEEF);

        let c: Message = ClearMessage::new(&b"em0"[..], 1).into();
        assert_eq!(c.state_id(), None);
        assert_eq!(c.to_string(), "Deleted all states on em0 (created by 0x1)");
    }
}
