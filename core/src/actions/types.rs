//! actions/types.rs
//! Sub-header, action identifiers and the typed action container.
//!
//! Design notes:
//! - `ActionKind` names every kernel action id, mapped or not.
//! - `Action` is a closed set: one variant per decodable action, each holding
//!   an `ActionFrame` of exactly one record type.

use std::fmt;

use num_enum::TryFromPrimitive;
use serde::Serialize;

use crate::constants::action_ids;
use crate::messages::{
    ClearMessage, DeleteCompressedMessage, InsertAckMessage, Message, StateMessage,
    UpdateCompressedMessage, UpdateRequestMessage, WireRecord,
};
use crate::types::Result;
use crate::utils::enum_name_or_hex;

/// Kernel action ids (`PFSYNC_ACT_*`).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize)]
pub enum ActionKind {
    Clear            = action_ids::CLR,
    InsertState      = action_ids::INS_1301,
    InsertAck        = action_ids::INS_ACK,
    UpdateState      = action_ids::UPD_1301,
    UpdateCompressed = action_ids::UPD_C,
    UpdateRequest    = action_ids::UPD_REQ,
    DeleteState      = action_ids::DEL,
    DeleteCompressed = action_ids::DEL_C,
    InsertFragment   = action_ids::INS_F,
    DeleteFragments  = action_ids::DEL_F,
    BulkUpdateStatus = action_ids::BUS,
    TdbReplay        = action_ids::TDB,
    EndOfFrame       = action_ids::EOF,
    InsertState1400  = action_ids::INS_1400,
    UpdateState1400  = action_ids::UPD_1400,
}

impl ActionKind {
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Kernel mnemonic, as printed by tcpdump.
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Clear => "CLR",
            ActionKind::InsertState => "INS",
            ActionKind::InsertAck => "INS_ACK",
            ActionKind::UpdateState => "UPD",
            ActionKind::UpdateCompressed => "UPD_C",
            ActionKind::UpdateRequest => "UPD_REQ",
            ActionKind::DeleteState => "DEL",
            ActionKind::DeleteCompressed => "DEL_C",
            ActionKind::InsertFragment => "INS_F",
            ActionKind::DeleteFragments => "DEL_F",
            ActionKind::BulkUpdateStatus => "BUS",
            ActionKind::TdbReplay => "TDB",
            ActionKind::EndOfFrame => "EOF",
            ActionKind::InsertState1400 => "INS_1400",
            ActionKind::UpdateState1400 => "UPD_1400",
        }
    }

    /// Whether this core can decode the action's payload.
    pub fn is_mapped(self) -> bool {
        crate::actions::dispatch::lookup(self.id()).is_some()
    }
}

/// Sub-header preceding each action: action id and message count.
///
/// Produced by the caller's frame parser; the decoder only reads it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SubHeader {
    pub action_id: u8,
    pub count: u32,
}

impl SubHeader {
    pub fn new(action_id: u8, count: u32) -> Self {
        Self { action_id, count }
    }

    pub fn kind(&self) -> Option<ActionKind> {
        ActionKind::try_from(self.action_id).ok()
    }
}

impl fmt::Display for SubHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "action {} count {}",
            enum_name_or_hex::<ActionKind>(self.action_id),
            self.count
        )
    }
}

/// Messages of one record type decoded under one sub-header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionFrame<M> {
    pub header: SubHeader,
    pub messages: Vec<M>,
}

impl<M: WireRecord> ActionFrame<M> {
    pub fn new(header: SubHeader) -> Self {
        Self { header, messages: Vec::new() }
    }

    /// Bytes this frame occupies on the wire (sub-header excluded).
    pub fn wire_len(&self) -> usize {
        self.messages.len() * M::SIZE
    }

    /// Write every message back to back in wire order.
    pub fn encode_messages(&self, out: &mut Vec<u8>) -> Result<()> {
        out.reserve(self.wire_len());
        for msg in &self.messages {
            msg.encode(out)?;
        }
        Ok(())
    }
}

/// A decoded action. One variant per action id this core understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Clear(ActionFrame<ClearMessage>),
    InsertState(ActionFrame<StateMessage>),
    InsertAck(ActionFrame<InsertAckMessage>),
    UpdateState(ActionFrame<StateMessage>),
    UpdateCompressed(ActionFrame<UpdateCompressedMessage>),
    UpdateRequest(ActionFrame<UpdateRequestMessage>),
    DeleteState(ActionFrame<StateMessage>),
    DeleteCompressed(ActionFrame<DeleteCompressedMessage>),
}

macro_rules! with_frame {
    ($action:expr, $frame:ident => $body:expr) => {
        match $action {
            Action::Clear($frame) => $body,
            Action::InsertState($frame) => $body,
            Action::InsertAck($frame) => $body,
            Action::UpdateState($frame) => $body,
            Action::UpdateCompressed($frame) => $body,
            Action::UpdateRequest($frame) => $body,
            Action::DeleteState($frame) => $body,
            Action::DeleteCompressed($frame) => $body,
        }
    };
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Clear(_) => ActionKind::Clear,
            Action::InsertState(_) => ActionKind::InsertState,
            Action::InsertAck(_) => ActionKind::InsertAck,
            Action::UpdateState(_) => ActionKind::UpdateState,
            Action::UpdateCompressed(_) => ActionKind::UpdateCompressed,
            Action::UpdateRequest(_) => ActionKind::UpdateRequest,
            Action::DeleteState(_) => ActionKind::DeleteState,
            Action::DeleteCompressed(_) => ActionKind::DeleteCompressed,
        }
    }

    pub fn header(&self) -> &SubHeader {
        with_frame!(self, frame => &frame.header)
    }

    pub fn len(&self) -> usize {
        with_frame!(self, frame => frame.messages.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn wire_len(&self) -> usize {
        with_frame!(self, frame => frame.wire_len())
    }

    /// Copies of the decoded messages, in wire order.
    pub fn to_messages(&self) -> Vec<Message> {
        with_frame!(self, frame => frame.messages.iter().cloned().map(Message::from).collect())
    }

    pub fn into_messages(self) -> Vec<Message> {
        with_frame!(self, frame => frame.messages.into_iter().map(Message::from).collect())
    }

    pub fn encode_messages(&self, out: &mut Vec<u8>) -> Result<()> {
        with_frame!(self, frame => frame.encode_messages(out))
    }

    /// Borrow the messages when the action carries full state records.
    pub fn states(&self) -> Option<&[StateMessage]> {
        match self {
            Action::InsertState(frame) | Action::UpdateState(frame) | Action::DeleteState(frame) => {
                Some(&frame.messages)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        write!(f, "{} ({} message{})", kind.name(), self.len(), if self.len() == 1 { "" } else { "s" })?;
        with_frame!(self, frame => {
            for msg in &frame.messages {
                write!(f, "\n\t{}", msg)?;
            }
        });
        Ok(())
    }
}
