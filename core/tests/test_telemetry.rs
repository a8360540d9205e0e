#[cfg(test)]
mod telemetry_tests {
    use pfsync_core::actions::{dispatch, SubHeader};
    use pfsync_core::constants::action_ids;
    use pfsync_core::messages::{DeleteCompressedMessage, InsertAckMessage, WireRecord};
    use pfsync_core::telemetry::{DecodeCounters, DecodeSnapshot};

    fn two_del_c_plus_tail() -> Vec<u8> {
        let mut buf = Vec::new();
        DeleteCompressedMessage::new(1, 1).encode(&mut buf).unwrap();
        DeleteCompressedMessage::new(2, 1).encode(&mut buf).unwrap();
        buf.extend_from_slice(&[0xFF; 5]);
        buf
    }

    /// One decoded action, one unmapped id, one truncated action.
    fn walk() -> DecodeCounters {
        let mut counters = DecodeCounters::new();
        let buf = two_del_c_plus_tail();

        let header = SubHeader::new(action_ids::DEL_C, 2);
        let outcome = dispatch(header, &buf);
        counters.record(header, buf.len(), &outcome);
        let rest = outcome.unwrap().1;

        let header = SubHeader::new(action_ids::BUS, 1);
        let outcome = dispatch(header, rest);
        counters.record(header, rest.len(), &outcome);

        let header = SubHeader::new(action_ids::INS_ACK, 1);
        let short = [0u8; InsertAckMessage::SIZE - 1];
        let outcome = dispatch(header, &short);
        counters.record(header, short.len(), &outcome);

        counters
    }

    #[test]
    fn record_counts_each_outcome() {
        let c = walk();
        assert_eq!(c.actions_decoded, 1);
        assert_eq!(c.messages_decoded, 2);
        assert_eq!(c.bytes_consumed, 24);
        assert_eq!(c.actions_unmapped, 1);
        assert_eq!(c.bytes_discarded, 5);
        assert_eq!(c.decode_errors, 1);
        assert_eq!(c.per_action_id[action_ids::DEL_C as usize], 1);
        assert_eq!(c.per_action_id[action_ids::BUS as usize], 1);
        // failed decodes are not attributed to an id
        assert_eq!(c.per_action_id[action_ids::INS_ACK as usize], 0);
    }

    #[test]
    fn short_input_len_does_not_underflow() {
        let buf = two_del_c_plus_tail();
        let header = SubHeader::new(action_ids::DEL_C, 2);
        let outcome = dispatch(header, &buf);

        let mut c = DecodeCounters::new();
        c.record(header, 0, &outcome);
        assert_eq!(c.actions_decoded, 1);
        assert_eq!(c.messages_decoded, 2);
        assert_eq!(c.bytes_consumed, 0);
    }

    #[test]
    fn out_of_table_id_counts_as_unmapped_only() {
        let mut c = DecodeCounters::new();
        c.add_unmapped(SubHeader::new(200, 1), 10);
        assert_eq!(c.actions_unmapped, 1);
        assert!(c.per_action_id.iter().all(|n| *n == 0));
    }

    #[test]
    fn merge_and_add_assign_agree() {
        let mut merged = walk();
        merged.merge(&walk());

        let mut summed = walk();
        summed += walk();

        assert_eq!(merged, summed);
        assert_eq!(merged.actions_decoded, 2);
        assert_eq!(merged.bytes_discarded, 10);
    }

    #[test]
    fn snapshot_names_actions_and_averages() {
        let snap = DecodeSnapshot::from(&walk());
        assert_eq!(snap.messages_per_action, 2.0);
        assert_eq!(snap.bytes_seen(), 29);
        assert_eq!(
            snap.per_action,
            vec![("DEL_C".to_string(), 1), ("BUS".to_string(), 1)]
        );
    }

    #[test]
    fn empty_snapshot_has_zero_average() {
        let snap = DecodeSnapshot::from(&DecodeCounters::default());
        assert_eq!(snap.messages_per_action, 0.0);
        assert!(snap.per_action.is_empty());
    }

    #[test]
    fn snapshot_exports_json() {
        let json = DecodeSnapshot::from(&walk()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["messages_decoded"], 2);
        assert_eq!(value["per_action"][0][0], "DEL_C");
    }

    #[test]
    fn counters_survive_bincode() {
        let c = walk();
        let cfg = bincode::config::standard();
        let bytes = bincode::encode_to_vec(&c, cfg).unwrap();
        let (back, used): (DecodeCounters, usize) = bincode::decode_from_slice(&bytes, cfg).unwrap();
        assert_eq!(used, bytes.len());
        assert_eq!(back, c);
    }
}
