//! actions/frame.rs
//!
//! Repeated-record decoding under one sub-header.
//!
//! Design notes:
//! - Exactly `header.count` records are decoded, threading the remainder
//!   through each call.
//! - All or nothing: the first failing record aborts the whole action and the
//!   partial frame is dropped.
//! - `count` comes off the wire, so the initial allocation is capped by how
//!   many records the buffer could possibly hold.

use crate::actions::types::{ActionFrame, SubHeader};
use crate::messages::WireRecord;
use crate::types::Result;

impl<M: WireRecord> ActionFrame<M> {
    /// Decode `header.count` records of type `M` from the front of `buf`.
    ///
    /// # Returns
    /// - `Ok((frame, rest))` with messages in wire order and the bytes after
    ///   the last record.
    /// - `Err(DecodeError::Truncated)` if any record runs past the buffer.
    ///
    /// `count == 0` yields an empty frame and returns `buf` untouched.
    pub fn decode(header: SubHeader, buf: &[u8]) -> Result<(Self, &[u8])> {
        let count = header.count as usize;
        let fits = buf.len() / M::SIZE.max(1);
        let mut frame = ActionFrame {
            header,
            messages: Vec::with_capacity(count.min(fits)),
        };

        let mut rest = buf;
        for _ in 0..count {
            let (msg, tail) = M::decode(rest)?;
            frame.messages.push(msg);
            rest = tail;
        }
        Ok((frame, rest))
    }
}
