//! Action decoding for pfsync frames.
//!
//! Responsibilities:
//! - Map a sub-header's action id to the record type it carries
//! - Decode exactly `count` records and return the unconsumed remainder
//!
//! Non-responsibilities:
//! - Frame header and sub-header parsing
//! - Capture, IO, reporting

pub mod types;
pub mod frame;
pub mod dispatch;

pub use types::{Action, ActionFrame, ActionKind, SubHeader};
pub use dispatch::{dispatch, lookup, message_size, ActionEntry, DecodeFn, ACTION_TABLE};
