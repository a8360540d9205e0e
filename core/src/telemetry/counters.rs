//! telemetry/counters.rs
//! Mutable counters collected while walking pfsync frames.
//!
//! Summary: counts actions, messages and bytes per dispatch outcome.
//! Converted into an immutable `DecodeSnapshot` for reporting.

use std::ops::AddAssign;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::actions::{Action, SubHeader};
use crate::constants::ACTION_SLOTS;
use crate::types::Result;

/// Deterministic counters collected across dispatch calls.
#[derive(Default, Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct DecodeCounters {
    pub actions_decoded: u64,
    pub actions_unmapped: u64,
    pub decode_errors: u64,
    pub messages_decoded: u64,
    /// Bytes consumed by decoded actions (sub-headers excluded).
    pub bytes_consumed: u64,
    /// Bytes dropped after an unmapped action id.
    pub bytes_discarded: u64,
    /// Sub-headers seen per action id, mapped or not. Ids past the table
    /// are only counted in `actions_unmapped`.
    pub per_action_id: [u64; ACTION_SLOTS],
}

impl DecodeCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `dispatch` outcome for `header` over an input of
    /// `input_len` bytes. An `input_len` shorter than the remainder counts
    /// as zero bytes consumed.
    pub fn record(
        &mut self,
        header: SubHeader,
        input_len: usize,
        outcome: &Result<(Option<Action>, &[u8])>,
    ) {
        match outcome {
            Ok((Some(action), rest)) => {
                self.add_action(action, input_len.saturating_sub(rest.len()))
            }
            Ok((None, _)) => self.add_unmapped(header, input_len),
            Err(_) => self.decode_errors += 1,
        }
    }

    /// Record one decoded action that consumed `consumed` bytes.
    pub fn add_action(&mut self, action: &Action, consumed: usize) {
        self.actions_decoded += 1;
        self.messages_decoded += action.len() as u64;
        self.bytes_consumed += consumed as u64;
        self.bump_id(action.header().action_id);
    }

    /// Record an unmapped action id; everything after it was dropped.
    pub fn add_unmapped(&mut self, header: SubHeader, discarded: usize) {
        self.actions_unmapped += 1;
        self.bytes_discarded += discarded as u64;
        self.bump_id(header.action_id);
    }

    fn bump_id(&mut self, action_id: u8) {
        if let Some(slot) = self.per_action_id.get_mut(action_id as usize) {
            *slot += 1;
        }
    }

    pub fn merge(&mut self, other: &DecodeCounters) {
        self.actions_decoded += other.actions_decoded;
        self.actions_unmapped += other.actions_unmapped;
        self.decode_errors += other.decode_errors;
        self.messages_decoded += other.messages_decoded;
        self.bytes_consumed += other.bytes_consumed;
        self.bytes_discarded += other.bytes_discarded;
        for (dst, src) in self.per_action_id.iter_mut().zip(other.per_action_id.iter()) {
            *dst += *src;
        }
    }
}

impl AddAssign for DecodeCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
