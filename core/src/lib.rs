//! pfsync-core
//!
//! Pure Rust decoder for pfsync action frames.
//! No capture, no IO, no global mutable state.
//!
//! Entry point: [`actions::dispatch`] takes one sub-header and the bytes that
//! follow it, and returns the typed action plus the unconsumed remainder.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Codec layers
pub mod layout;
pub mod messages;
pub mod actions;

pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::actions::{dispatch, Action, ActionFrame, ActionKind, SubHeader};
    pub use crate::messages::{
        ClearMessage, DeleteCompressedMessage, InsertAckMessage, Message, StateKey, StateMessage,
        StatePeer, UpdateCompressedMessage, UpdateRequestMessage, WireRecord,
    };
    pub use crate::telemetry::{DecodeCounters, DecodeSnapshot};
    pub use crate::types::{DecodeError, Result};
}
