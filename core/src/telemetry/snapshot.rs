//! telemetry/snapshot.rs
//! Immutable, exportable view of `DecodeCounters`.

use serde::{Deserialize, Serialize};

use crate::actions::ActionKind;
use crate::telemetry::counters::DecodeCounters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeSnapshot {
    pub actions_decoded: u64,
    pub actions_unmapped: u64,
    pub decode_errors: u64,
    pub messages_decoded: u64,
    pub bytes_consumed: u64,
    pub bytes_discarded: u64,
    pub messages_per_action: f64,
    /// `(mnemonic, count)` for every action id seen at least once.
    pub per_action: Vec<(String, u64)>,
}

impl DecodeSnapshot {
    pub fn from(counters: &DecodeCounters) -> Self {
        let messages_per_action = if counters.actions_decoded > 0 {
            counters.messages_decoded as f64 / counters.actions_decoded as f64
        } else {
            0.0
        };

        let per_action = counters
            .per_action_id
            .iter()
            .enumerate()
            .filter(|(_, n)| **n > 0)
            .map(|(id, n)| {
                let name = ActionKind::try_from(id as u8)
                    .map(|k| k.name().to_string())
                    .unwrap_or_else(|_| id.to_string());
                (name, *n)
            })
            .collect();

        Self {
            actions_decoded: counters.actions_decoded,
            actions_unmapped: counters.actions_unmapped,
            decode_errors: counters.decode_errors,
            messages_decoded: counters.messages_decoded,
            bytes_consumed: counters.bytes_consumed,
            bytes_discarded: counters.bytes_discarded,
            messages_per_action,
            per_action,
        }
    }

    /// Bytes consumed plus bytes discarded.
    pub fn bytes_seen(&self) -> u64 {
        self.bytes_consumed + self.bytes_discarded
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
