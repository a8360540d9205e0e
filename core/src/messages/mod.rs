//! messages/mod.rs
//! Typed pfsync records and the contract they share.
//!
//! Responsibilities:
//! - Declare one byte-layout descriptor per kernel struct
//! - Decode a record from the front of a buffer and hand back the rest
//! - Encode a record back into its canonical wire form
//!
//! Non-responsibilities:
//! - Knowing which action carries which record (see `actions`)
//! - Frame and sub-header parsing

pub mod key;
pub mod peer;
pub mod state;
pub mod compact;
pub mod clear;
pub mod update_compressed;

use std::fmt;

use serde::Serialize;

use crate::layout::ByteLayout;
use crate::types::Result;

pub use key::*;
pub use peer::*;
pub use state::*;
pub use compact::*;
pub use clear::*;
pub use update_compressed::*;

/// A fixed-size kernel record with a declared layout.
///
/// `decode` consumes exactly `SIZE` bytes or fails with
/// `DecodeError::Truncated` without consuming anything.
pub trait WireRecord: Sized {
    const LAYOUT: &'static ByteLayout;
    const SIZE: usize = Self::LAYOUT.size();

    fn decode(buf: &[u8]) -> Result<(Self, &[u8])>;

    fn encode(&self, out: &mut Vec<u8>) -> Result<()>;
}

/// Any message an action can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    Clear(ClearMessage),
    State(StateMessage),
    InsertAck(InsertAckMessage),
    UpdateCompressed(UpdateCompressedMessage),
    UpdateRequest(UpdateRequestMessage),
    DeleteCompressed(DeleteCompressedMessage),
}

impl Message {
    pub fn creator(&self) -> u32 {
        match self {
            Message::Clear(m) => m.creator,
            Message::State(m) => m.creator,
            Message::InsertAck(m) => m.creator,
            Message::UpdateCompressed(m) => m.creator,
            Message::UpdateRequest(m) => m.creator,
            Message::DeleteCompressed(m) => m.creator,
        }
    }

    /// State id, for every kind except `Clear`.
    pub fn state_id(&self) -> Option<u64> {
        match self {
            Message::Clear(_) => None,
            Message::State(m) => Some(m.id),
            Message::InsertAck(m) => Some(m.id),
            Message::UpdateCompressed(m) => Some(m.id),
            Message::UpdateRequest(m) => Some(m.id),
            Message::DeleteCompressed(m) => Some(m.id),
        }
    }

    pub fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Message::Clear(m) => m.encode(out),
            Message::State(m) => m.encode(out),
            Message::InsertAck(m) => m.encode(out),
            Message::UpdateCompressed(m) => m.encode(out),
            Message::UpdateRequest(m) => m.encode(out),
            Message::DeleteCompressed(m) => m.encode(out),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Clear(m) => fmt::Display::fmt(m, f),
            Message::State(m) => fmt::Display::fmt(m, f),
            Message::InsertAck(m) => fmt::Display::fmt(m, f),
            Message::UpdateCompressed(m) => fmt::Display::fmt(m, f),
            Message::UpdateRequest(m) => fmt::Display::fmt(m, f),
            Message::DeleteCompressed(m) => fmt::Display::fmt(m, f),
        }
    }
}

macro_rules! impl_from_record {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Message {
                fn from(m: $ty) -> Self {
                    Message::$variant(m)
                }
            }
        )*
    };
}

impl_from_record!(
    Clear => ClearMessage,
    State => StateMessage,
    InsertAck => InsertAckMessage,
    UpdateCompressed => UpdateCompressedMessage,
    UpdateRequest => UpdateRequestMessage,
    DeleteCompressed => DeleteCompressedMessage,
);
