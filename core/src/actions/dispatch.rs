//! actions/dispatch.rs
//!
//! Top-level decode entry point: action id -> decoder.
//!
//! Design notes:
//! - `ACTION_TABLE` is a read-only static indexed by action id. Ids 8..=14
//!   (fragments, bulk update status, TDB, EOF, 1400-format states) have no
//!   entry.
//! - An unmapped id cannot be skipped because its payload width is unknown,
//!   so the rest of the buffer is dropped instead of guessed at.

use std::fmt;

use crate::actions::types::{Action, ActionFrame, ActionKind, SubHeader};
use crate::constants::ACTION_SLOTS;
use crate::messages::{
    ClearMessage, DeleteCompressedMessage, InsertAckMessage, StateMessage,
    UpdateCompressedMessage, UpdateRequestMessage, WireRecord,
};
use crate::types::Result;

pub type DecodeFn = for<'a> fn(SubHeader, &'a [u8]) -> Result<(Action, &'a [u8])>;

/// One mapped slot of the action table.
#[derive(Clone, Copy)]
pub struct ActionEntry {
    pub kind: ActionKind,
    /// Width of one message of this action.
    pub message_size: usize,
    pub decode: DecodeFn,
}

impl fmt::Debug for ActionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionEntry")
            .field("kind", &self.kind)
            .field("message_size", &self.message_size)
            .finish_non_exhaustive()
    }
}

macro_rules! action_decoder {
    ($name:ident, $variant:ident) => {
        fn $name(header: SubHeader, buf: &[u8]) -> Result<(Action, &[u8])> {
            let (frame, rest) = ActionFrame::decode(header, buf)?;
            Ok((Action::$variant(frame), rest))
        }
    };
}

action_decoder!(decode_clear, Clear);
action_decoder!(decode_insert_state, InsertState);
action_decoder!(decode_insert_ack, InsertAck);
action_decoder!(decode_update_state, UpdateState);
action_decoder!(decode_update_compressed, UpdateCompressed);
action_decoder!(decode_update_request, UpdateRequest);
action_decoder!(decode_delete_state, DeleteState);
action_decoder!(decode_delete_compressed, DeleteCompressed);

const fn entry(kind: ActionKind, message_size: usize, decode: DecodeFn) -> Option<ActionEntry> {
    Some(ActionEntry { kind, message_size, decode })
}

pub static ACTION_TABLE: [Option<ActionEntry>; ACTION_SLOTS] = [
    entry(ActionKind::Clear, ClearMessage::SIZE, decode_clear),
    entry(ActionKind::InsertState, StateMessage::SIZE, decode_insert_state),
    entry(ActionKind::InsertAck, InsertAckMessage::SIZE, decode_insert_ack),
    entry(ActionKind::UpdateState, StateMessage::SIZE, decode_update_state),
    entry(ActionKind::UpdateCompressed, UpdateCompressedMessage::SIZE, decode_update_compressed),
    entry(ActionKind::UpdateRequest, UpdateRequestMessage::SIZE, decode_update_request),
    entry(ActionKind::DeleteState, StateMessage::SIZE, decode_delete_state),
    entry(ActionKind::DeleteCompressed, DeleteCompressedMessage::SIZE, decode_delete_compressed),
    None, // INS_F
    None, // DEL_F
    None, // BUS
    None, // TDB
    None, // EOF
    None, // INS_1400
    None, // UPD_1400
];

/// Table slot for `action_id`, if this core decodes it.
#[inline]
pub fn lookup(action_id: u8) -> Option<&'static ActionEntry> {
    ACTION_TABLE.get(action_id as usize).and_then(Option::as_ref)
}

/// Width of one message for `kind`, or `None` when unmapped.
pub fn message_size(kind: ActionKind) -> Option<usize> {
    lookup(kind.id()).map(|e| e.message_size)
}

/// Decode the action described by `header` from the front of `buf`.
///
/// # Returns
/// - `Ok((Some(action), rest))` for a mapped action id.
/// - `Ok((None, &[]))` for an unmapped or out-of-range id; the remaining
///   buffer is discarded and frame iteration should stop.
/// - `Err(DecodeError::Truncated)` if a mapped action runs past `buf`.
pub fn dispatch(header: SubHeader, buf: &[u8]) -> Result<(Option<Action>, &[u8])> {
    match lookup(header.action_id) {
        Some(entry) => {
            let (action, rest) = (entry.decode)(header, buf)?;
            Ok((Some(action), rest))
        }
        None => Ok((None, &buf[buf.len()..])),
    }
}
